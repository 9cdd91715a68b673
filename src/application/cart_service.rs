use crate::domain::cart::CartItem;
use crate::domain::repository::CartRepository;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct CartService {
    cart_repository: Arc<dyn CartRepository>,
}

impl CartService {
    pub fn new(cart_repository: Arc<dyn CartRepository>) -> Self {
        Self { cart_repository }
    }

    /// No validation of item content or quantity sign; the authenticated
    /// subject id is the only authorization boundary.
    #[instrument(skip(self), fields(user_id = user_id, item = %item))]
    pub async fn add_item(&self, user_id: i32, item: &str, quantity: i32) -> Result<()> {
        self.cart_repository
            .add_item(user_id, item, quantity)
            .await?;
        info!(user_id = user_id, item = %item, quantity = quantity, "Item added to cart");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = user_id))]
    pub async fn list_items(&self, user_id: i32) -> Result<Vec<CartItem>> {
        self.cart_repository.list_items(user_id).await
    }
}

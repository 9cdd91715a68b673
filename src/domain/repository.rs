use crate::domain::cart::CartItem;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user and returns its id. Fails with
    /// `DomainError::DuplicateEmail` when the email is already taken.
    async fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<i32>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn add_item(&self, user_id: i32, item: &str, quantity: i32) -> Result<()>;
    async fn list_items(&self, user_id: i32) -> Result<Vec<CartItem>>;
}

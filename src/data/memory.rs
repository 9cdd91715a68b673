use crate::domain::cart::CartItem;
use crate::domain::error::DomainError;
use crate::domain::repository::{CartRepository, UserRepository};
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

/// In-memory credential store. Mirrors the relational store's contract,
/// including the email uniqueness constraint, so tests can run without a
/// database.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<i32, User>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, password_hash), fields(email = email))]
    async fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<i32> {
        let mut storage = self.storage.write().await;
        if storage.values().any(|u| u.email == email) {
            trace!(email = email, "Duplicate email rejected");
            return Err(DomainError::DuplicateEmail.into());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        storage.insert(
            id,
            User {
                id,
                username: username.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                reset_token: None,
            },
        );
        debug!(user_id = id, email = email, "User saved to memory storage");
        Ok(id)
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        Ok(storage.values().find(|u| u.email == email).cloned())
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }
}

struct CartRow {
    user_id: i32,
    item: String,
    quantity: i32,
}

/// In-memory cart store. Rows are appended, never merged.
#[derive(Clone)]
pub struct InMemoryCartRepository {
    storage: Arc<RwLock<Vec<CartRow>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryCartRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    #[instrument(skip(self), fields(user_id = user_id, item = item))]
    async fn add_item(&self, user_id: i32, item: &str, quantity: i32) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.push(CartRow {
            user_id,
            item: item.to_string(),
            quantity,
        });
        debug!(user_id = user_id, item = item, "Cart row appended");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = user_id))]
    async fn list_items(&self, user_id: i32) -> Result<Vec<CartItem>> {
        let storage = self.storage.read().await;
        Ok(storage
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| CartItem {
                item: row.item.clone(),
                quantity: row.quantity,
            })
            .collect())
    }
}

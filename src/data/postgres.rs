use crate::domain::cart::CartItem;
use crate::domain::error::DomainError;
use crate::domain::repository::{CartRepository, UserRepository};
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::{debug, info, instrument, trace};

/// The `orders` table and the `reset_token` column back features that are
/// declared upstream but not implemented by any handler; they are created
/// here so the schema stays complete.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(255),
    email VARCHAR(255) UNIQUE,
    password VARCHAR(255),
    reset_token VARCHAR(255)
);
CREATE TABLE IF NOT EXISTS carts (
    id SERIAL PRIMARY KEY,
    user_id INTEGER REFERENCES users(id),
    item TEXT,
    quantity INTEGER
);
CREATE TABLE IF NOT EXISTS orders (
    id SERIAL PRIMARY KEY,
    user_id INTEGER REFERENCES users(id),
    total NUMERIC,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
";

pub async fn connect_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the tables if absent. Safe to run on every startup.
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Database schema ensured");
    Ok(())
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, password_hash), fields(email = email))]
    async fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return anyhow::Error::from(DomainError::DuplicateEmail);
            }
            anyhow::Error::from(e)
        })?;

        debug!(user_id = id, email = email, "User row inserted");
        Ok(id)
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password AS password_hash, reset_token \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        trace!(found = user.is_some(), "Looked up user by email");
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password AS password_hash, reset_token \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        trace!(found = user.is_some(), "Looked up user by id");
        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    #[instrument(skip(self), fields(user_id = user_id, item = item))]
    async fn add_item(&self, user_id: i32, item: &str, quantity: i32) -> Result<()> {
        // Unconditional insert: duplicates are allowed and quantities are
        // taken as-is, sign included.
        sqlx::query("INSERT INTO carts (user_id, item, quantity) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(item)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        debug!(user_id = user_id, item = item, quantity = quantity, "Cart row inserted");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = user_id))]
    async fn list_items(&self, user_id: i32) -> Result<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT item, quantity FROM carts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        trace!(count = items.len(), "Listed cart items");
        Ok(items)
    }
}

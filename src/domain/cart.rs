use serde::{Deserialize, Serialize};

/// One cart row as returned by the listing. Duplicate adds produce
/// duplicate rows; nothing merges quantities.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartItem {
    pub item: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub token: String,
    pub item: String,
    pub quantity: i32,
}

use crate::domain::cart::AddToCartRequest;
use crate::presentation::handlers::{ApiError, AppState, MessageResponse};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

/// Unlike the other protected routes, the token travels in the request
/// body here, so the bearer-header extractor does not apply.
#[instrument(skip(state, req), fields(item = %req.item))]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    req: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, ApiError> {
    let claims = state.auth.authenticate(&req.token)?;

    state
        .cart
        .add_item(claims.user_id, &req.item, req.quantity)
        .await?;

    info!(user_id = claims.user_id, item = %req.item, "Cart add handled");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Item added")))
}

#[instrument(skip(state, user), fields(user_id = user.user_id))]
pub async fn list_cart(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let items = state.cart.list_items(user.user_id).await?;

    info!(user_id = user.user_id, count = items.len(), "Cart listed");
    Ok(HttpResponse::Ok().json(items))
}

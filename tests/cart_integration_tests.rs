use actix_web::{App, test, web};
use pet_store_api::application::auth_service::AuthService;
use pet_store_api::application::cart_service::CartService;
use pet_store_api::data::memory::{InMemoryCartRepository, InMemoryUserRepository};
use pet_store_api::domain::user::{LoginRequest, SignupRequest};
use pet_store_api::presentation::auth::{login, profile, signup};
use pet_store_api::presentation::cart::{add_to_cart, list_cart};
use pet_store_api::presentation::handlers::{AppState, home, logout};
use std::sync::Arc;

macro_rules! setup_test {
    () => {{
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let cart_repository = Arc::new(InMemoryCartRepository::new());

        let state = web::Data::new(AppState {
            auth: AuthService::new(user_repository, "test-secret-for-cart-tests".to_string()),
            cart: CartService::new(cart_repository),
        });

        test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/", web::get().to(home))
                .service(
                    web::scope("/api")
                        .route("/signup", web::post().to(signup))
                        .route("/login", web::post().to(login))
                        .route("/profile", web::get().to(profile))
                        .route("/cart/add", web::post().to(add_to_cart))
                        .route("/cart", web::get().to(list_cart))
                        .route("/logout", web::post().to(logout)),
                ),
        )
        .await
    }};
}

/// Registers a user and returns a fresh session token.
macro_rules! signup_and_login {
    ($app:expr, $username:expr, $email:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/signup")
            .set_json(&SignupRequest {
                username: $username.to_string(),
                email: $email.to_string(),
                password: $password.to_string(),
            })
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(&LoginRequest {
                email: $email.to_string(),
                password: $password.to_string(),
            })
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&$app, req).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_leash_scenario() {
    let app = setup_test!();

    let token = signup_and_login!(app, "al", "a@x.com", "pw");

    // Fresh account: empty cart
    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let items: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items, serde_json::json!([]));

    // Add a leash
    let req = test::TestRequest::post()
        .uri("/api/cart/add")
        .set_json(serde_json::json!({
            "token": token,
            "item": "leash",
            "quantity": 2,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Item added");

    // And see it in the listing
    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let items: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items, serde_json::json!([{"item": "leash", "quantity": 2}]));
}

#[actix_web::test]
async fn test_duplicate_adds_produce_two_rows() {
    let app = setup_test!();

    let token = signup_and_login!(app, "al", "a@x.com", "pw");

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/cart/add")
            .set_json(serde_json::json!({
                "token": token,
                "item": "leash",
                "quantity": 2,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let items: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    // Two distinct rows, not a merged quantity of 4
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["quantity"] == 2));
}

#[actix_web::test]
async fn test_carts_are_isolated_between_users() {
    let app = setup_test!();

    let token_a = signup_and_login!(app, "alice", "alice@example.com", "pw-a");
    let token_b = signup_and_login!(app, "bob", "bob@example.com", "pw-b");

    let req = test::TestRequest::post()
        .uri("/api/cart/add")
        .set_json(serde_json::json!({
            "token": token_a,
            "item": "leash",
            "quantity": 1,
        }))
        .to_request();
    test::call_service(&app, req).await;

    // Bob's listing never contains Alice's items
    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let items: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items, serde_json::json!([]));

    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {}", token_a)))
        .to_request();
    let items: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_cart_add_with_invalid_token_returns_403() {
    let app = setup_test!();

    let req = test::TestRequest::post()
        .uri("/api/cart/add")
        .set_json(serde_json::json!({
            "token": "bogus.token.value",
            "item": "leash",
            "quantity": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid token");
}

#[actix_web::test]
async fn test_cart_list_without_header_returns_403() {
    let app = setup_test!();

    // Unlike profile, a missing header here collapses into the generic
    // invalid-token response.
    let req = test::TestRequest::get().uri("/api/cart").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid token");
}

#[actix_web::test]
async fn test_cart_list_with_invalid_token_returns_403() {
    let app = setup_test!();

    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(("Authorization", "Bearer nope"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_cart_accepts_unvalidated_quantities() {
    let app = setup_test!();

    let token = signup_and_login!(app, "al", "a@x.com", "pw");

    // No positivity constraint exists on quantity
    let req = test::TestRequest::post()
        .uri("/api/cart/add")
        .set_json(serde_json::json!({
            "token": token,
            "item": "refund-voucher",
            "quantity": -5,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let items: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items[0]["quantity"], -5);
}

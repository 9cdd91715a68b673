use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use pet_store_api::application::auth_service::AuthService;
use pet_store_api::application::cart_service::CartService;
use pet_store_api::data::postgres::{PgCartRepository, PgUserRepository, connect_pool, ensure_schema};
use pet_store_api::infrastructure::config::AppConfig;
use pet_store_api::infrastructure::logging::init_logging;
use pet_store_api::presentation::auth::{login, profile, signup};
use pet_store_api::presentation::cart::{add_to_cart, list_cart};
use pet_store_api::presentation::handlers::{AppState, home, logout};
use pet_store_api::presentation::middleware::RequestTraceMiddleware;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    info!("Connecting to database");
    let pool = connect_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;

    let state = web::Data::new(AppState {
        auth: AuthService::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            config.jwt_secret.clone(),
        ),
        cart: CartService::new(Arc::new(PgCartRepository::new(pool.clone()))),
    });

    let frontend_origin = config.frontend_origin.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(RequestTraceMiddleware)
            .route("/", web::get().to(home))
            .service(
                web::scope("/api")
                    .route("/signup", web::post().to(signup))
                    .route("/login", web::post().to(login))
                    .route("/profile", web::get().to(profile))
                    .route("/cart/add", web::post().to(add_to_cart))
                    .route("/cart", web::get().to(list_cart))
                    .route("/logout", web::post().to(logout)),
            )
    });

    let bind_addr = "0.0.0.0:3000";
    let server = server.bind(bind_addr)?;
    info!(address = %bind_addr, "Pet store API listening");
    server.run().await?;

    Ok(())
}

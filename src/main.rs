use std::sync::Arc;

use pets_service::{api::state::AppState, infrastructure::{database::mongo_context::MongoContext, mongodb::pet_repository::MongoPetRepository}, routes::pet_routes, utils::config::AppConfig};
use actix_web::{get, web, App, HttpServer, Responder};
use tracing_subscriber::EnvFilter;


#[get("/")]
async fn entry_point() -> impl Responder {
    "This is the Pets API. Use POST /pet to register a pet and GET /pets to list them."
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mongo_context = match MongoContext::init(&config.database_url, &config.database_name).await {
        Ok(context) => context,
        Err(e) => {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    let pets = Arc::new(MongoPetRepository::new(&mongo_context, &config.pets_collection));
    let app_state = AppState::new(pets, config.request_timeout);

    tracing::info!(
        "Server running at http://{} (request deadline {}s)",
        config.bind_address,
        config.request_timeout.as_secs()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(pet_routes)
            .service(entry_point)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}

mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use std::io;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    log::error!("❌ {}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env()
        .map_err(|e| startup_error("Invalid configuration", e))?;

    log::info!("🚀 Starting Artist Search Service...");
    log::info!("🌍 Environment: {:?}", config.environment);
    log::info!("📊 Database: {}", config.database_name);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config.mongodb_uri, &config.database_name)
        .await
        .map_err(|e| startup_error("Failed to connect to MongoDB", e))?;
    log::info!("✅ MongoDB connected successfully");

    let host = config.host.clone();
    let port = config.port;
    let production = config.environment.is_production();
    let cors_origin = config.cors_origin.clone();

    let state = state::AppState::new(config, db)
        .map_err(|e| startup_error("Failed to build application state", e))?;
    let state = web::Data::new(state);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        // Production serves the client from the same origin.
        let cors = if production {
            Cors::default()
        } else {
            Cors::default()
                .allowed_origin(&cors_origin)
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
                .supports_credentials()
                .max_age(3600)
        };

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state.clone())
            .wrap(Compress::default())
            .wrap(cors)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

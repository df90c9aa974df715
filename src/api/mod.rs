pub mod artsy;
pub mod auth;
pub mod favorites;
pub mod health;
pub mod swagger;


use crate::utils::AppError;
use actix_web::{web, HttpResponse};

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("Not found".into()))
}

/// Registers every route plus the JSON/query rejection handlers.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    // Health check
    .route("/health", web::get().to(health::health_check))
    // Artsy proxy
    .service(
        web::scope("/api/artsy")
            .route("/search", web::get().to(artsy::search))
            .route("/artists/{id}", web::get().to(artsy::get_artist))
            .route("/artists/{id}/similar", web::get().to(artsy::get_similar_artists))
            .route("/artists/{id}/artworks", web::get().to(artsy::get_artworks))
            .route("/artworks/{id}/categories", web::get().to(artsy::get_categories)),
    )
    // Auth endpoints
    .service(
        web::scope("/api/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/me", web::get().to(auth::get_me))
            .route("/logout", web::post().to(auth::logout))
            .route("/delete", web::delete().to(auth::delete_account)),
    )
    // Favorites (session required)
    .service(
        web::scope("/api/favorites")
            .route("", web::get().to(favorites::list_favorites))
            .route("", web::post().to(favorites::add_favorite))
            .route("/check/{artistId}", web::get().to(favorites::check_favorite))
            .route("/{artistId}", web::delete().to(favorites::remove_favorite)),
    )
    .default_service(web::to(not_found));
}

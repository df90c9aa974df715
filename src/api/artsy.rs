use crate::{
    middleware::AuthContext,
    models::{ArtistResponse, ArtworksResponse, CategoriesResponse, SearchResponse, SimilarArtistsResponse},
    state::AppState,
    utils::AppError,
};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Artist name to search for
    pub q: Option<String>,
}

fn required_id(id: &str, message: &str) -> Result<String, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(id.to_string())
}

/// Search artists by name
#[utoipa::path(
    get,
    path = "/api/artsy/search",
    tag = "Artsy",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching artists", body = SearchResponse),
        (status = 400, description = "Missing search query"),
        (status = 500, description = "Artsy request failed")
    )
)]
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Search query is required".into()))?;

    log::info!("🔍 GET /artsy/search - q: {}", q);
    let results = state.artsy.search_artists(q).await?;
    log::info!("✅ Found {} artists for '{}'", results.len(), q);

    Ok(HttpResponse::Ok().json(SearchResponse { results }))
}

#[utoipa::path(
    get,
    path = "/api/artsy/artists/{id}",
    tag = "Artsy",
    params(("id" = String, Path, description = "Artsy artist id")),
    responses(
        (status = 200, description = "Artist details", body = ArtistResponse),
        (status = 500, description = "Artsy request failed")
    )
)]
pub async fn get_artist(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = required_id(&path, "Artist ID is required")?;
    log::info!("🎨 GET /artsy/artists/{}", id);

    let artist = state.artsy.get_artist_details(&id).await?;
    Ok(HttpResponse::Ok().json(ArtistResponse { artist }))
}

/// Similar artists (signed-in users only)
#[utoipa::path(
    get,
    path = "/api/artsy/artists/{id}/similar",
    tag = "Artsy",
    params(("id" = String, Path, description = "Artsy artist id")),
    responses(
        (status = 200, description = "Similar artists", body = SimilarArtistsResponse),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Artsy request failed")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_similar_artists(
    _auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = required_id(&path, "Artist ID is required")?;
    log::info!("🧭 GET /artsy/artists/{}/similar", id);

    let similar_artists = state.artsy.get_similar_artists(&id).await?;
    Ok(HttpResponse::Ok().json(SimilarArtistsResponse { similar_artists }))
}

#[utoipa::path(
    get,
    path = "/api/artsy/artists/{id}/artworks",
    tag = "Artsy",
    params(("id" = String, Path, description = "Artsy artist id")),
    responses(
        (status = 200, description = "Artworks by the artist", body = ArtworksResponse),
        (status = 500, description = "Artsy request failed")
    )
)]
pub async fn get_artworks(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = required_id(&path, "Artist ID is required")?;
    log::info!("🖼️ GET /artsy/artists/{}/artworks", id);

    let artworks = state.artsy.get_artworks_by_artist(&id).await?;
    Ok(HttpResponse::Ok().json(ArtworksResponse { artworks }))
}

#[utoipa::path(
    get,
    path = "/api/artsy/artworks/{id}/categories",
    tag = "Artsy",
    params(("id" = String, Path, description = "Artsy artwork id")),
    responses(
        (status = 200, description = "Genes attached to the artwork", body = CategoriesResponse),
        (status = 500, description = "Artsy request failed")
    )
)]
pub async fn get_categories(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = required_id(&path, "Artwork ID is required")?;
    log::info!("🏷️ GET /artsy/artworks/{}/categories", id);

    let categories = state.artsy.get_artwork_categories(&id).await?;
    Ok(HttpResponse::Ok().json(CategoriesResponse { categories }))
}

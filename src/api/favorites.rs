use crate::{
    middleware::AuthContext,
    models::{
        AddFavoriteRequest, CheckFavoriteResponse, FavoriteResponse, FavoritesResponse,
        RemoveFavoriteResponse,
    },
    services::favorite_service,
    state::AppState,
    utils::AppError,
};
use actix_web::{web, HttpResponse};

fn artist_id(raw: Option<&str>) -> Result<String, AppError> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Artist ID is required".into()))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "Favorites",
    responses(
        (status = 200, description = "Favorites, newest first", body = FavoritesResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_favorites(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let favorites = favorite_service::list_favorites(state.favorites.as_ref(), &auth.user.id).await?;
    log::debug!("⭐ {} favorites for user {}", favorites.len(), auth.user.id);
    Ok(HttpResponse::Ok().json(FavoritesResponse { favorites }))
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    tag = "Favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Favorite stored", body = FavoriteResponse),
        (status = 400, description = "Missing artist id or already a favorite"),
        (status = 401, description = "Authentication required")
    ),
    security(("session_cookie" = []))
)]
pub async fn add_favorite(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<AddFavoriteRequest>,
) -> Result<HttpResponse, AppError> {
    let artist_id = artist_id(request.artist_id.as_deref())?;
    log::info!("⭐ POST /favorites - user: {}, artist: {}", auth.user.id, artist_id);

    let favorite = favorite_service::add_favorite(
        state.favorites.as_ref(),
        state.artsy.as_ref(),
        &auth.user.id,
        &artist_id,
    )
    .await?;

    Ok(HttpResponse::Created().json(FavoriteResponse { favorite }))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{artistId}",
    tag = "Favorites",
    params(("artistId" = String, Path, description = "Artsy artist id")),
    responses(
        (status = 200, description = "Favorite removed", body = RemoveFavoriteResponse),
        (status = 404, description = "Favorite not found"),
        (status = 401, description = "Authentication required")
    ),
    security(("session_cookie" = []))
)]
pub async fn remove_favorite(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let artist_id = artist_id(Some(path.as_str()))?;
    log::info!("🗑️ DELETE /favorites/{} - user: {}", artist_id, auth.user.id);

    favorite_service::remove_favorite(state.favorites.as_ref(), &auth.user.id, &artist_id).await?;

    Ok(HttpResponse::Ok().json(RemoveFavoriteResponse {
        message: "Removed from favorites".to_string(),
        artist_id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/favorites/check/{artistId}",
    tag = "Favorites",
    params(("artistId" = String, Path, description = "Artsy artist id")),
    responses(
        (status = 200, description = "Whether the artist is a favorite", body = CheckFavoriteResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("session_cookie" = []))
)]
pub async fn check_favorite(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let artist_id = artist_id(Some(path.as_str()))?;
    let is_favorite =
        favorite_service::is_favorite(state.favorites.as_ref(), &auth.user.id, &artist_id).await?;
    Ok(HttpResponse::Ok().json(CheckFavoriteResponse { is_favorite }))
}

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Artist Search Service API",
        version = "1.0.0",
        description = "Search the Artsy catalog, manage an account and keep a list of favorite artists.\n\n**Authentication:** sign in through `/api/auth/login` or `/api/auth/register`; the session travels in the HTTP-only `token` cookie."
    ),
    paths(
        // Artsy proxy
        crate::api::artsy::search,
        crate::api::artsy::get_artist,
        crate::api::artsy::get_similar_artists,
        crate::api::artsy::get_artworks,
        crate::api::artsy::get_categories,

        // Auth endpoints
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::get_me,
        crate::api::auth::logout,
        crate::api::auth::delete_account,

        // Favorites
        crate::api::favorites::list_favorites,
        crate::api::favorites::add_favorite,
        crate::api::favorites::remove_favorite,
        crate::api::favorites::check_favorite,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            // Artsy
            crate::models::ArtistSummary,
            crate::models::ArtistDetails,
            crate::models::SimilarArtist,
            crate::models::Artwork,
            crate::models::Category,
            crate::models::SearchResponse,
            crate::models::ArtistResponse,
            crate::models::SimilarArtistsResponse,
            crate::models::ArtworksResponse,
            crate::models::CategoriesResponse,

            // Auth
            crate::models::RegisterRequest,
            crate::models::LoginRequest,
            crate::models::UserInfo,
            crate::models::UserResponse,
            crate::models::MessageResponse,
            crate::utils::validation::FieldError,

            // Favorites
            crate::models::FavoriteInfo,
            crate::models::AddFavoriteRequest,
            crate::models::FavoritesResponse,
            crate::models::FavoriteResponse,
            crate::models::RemoveFavoriteResponse,
            crate::models::CheckFavoriteResponse,

            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Artsy", description = "Read-only proxy over the Artsy catalog: artist search, details, similar artists, artworks and genes."),
        (name = "Auth", description = "Registration, login, logout and account deletion with cookie sessions."),
        (name = "Favorites", description = "Per-user list of favorite artists."),
        (name = "Health", description = "Liveness check."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "token",
                    "Session token set by login/register",
                ))),
            );
        }
    }
}

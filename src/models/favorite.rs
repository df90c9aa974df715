use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Bookmarked artist (collection: favorites). `(user, artistId)` is unique.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub artist_id: String,
    pub artist_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub deathday: String,
    pub added_at: BsonDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteInfo {
    pub id: String,
    pub user: String,
    pub artist_id: String,
    pub artist_name: String,
    pub image_url: String,
    pub nationality: String,
    pub birthday: String,
    pub deathday: String,
    pub added_at: DateTime<Utc>,
}

impl From<&Favorite> for FavoriteInfo {
    fn from(favorite: &Favorite) -> Self {
        Self {
            id: favorite.id.to_hex(),
            user: favorite.user.to_hex(),
            artist_id: favorite.artist_id.clone(),
            artist_name: favorite.artist_name.clone(),
            image_url: favorite.image_url.clone(),
            nationality: favorite.nationality.clone(),
            birthday: favorite.birthday.clone(),
            deathday: favorite.deathday.clone(),
            added_at: DateTime::<Utc>::from_timestamp_millis(favorite.added_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub artist_id: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteInfo>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FavoriteResponse {
    pub favorite: FavoriteInfo,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFavoriteResponse {
    pub message: String,
    pub artist_id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckFavoriteResponse {
    pub is_favorite: bool,
}

//! Normalized Artsy DTOs returned to clients, plus the raw upstream shapes
//! they are built from.

use serde::{Deserialize, Serialize};

// ==================== NORMALIZED ====================

/// Artist entry from `/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    pub id: String,
    pub title: String,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: serde_json::Value,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDetails {
    pub id: String,
    pub name: String,
    pub birthday: String,
    pub deathday: String,
    pub nationality: String,
    pub biography: String,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: serde_json::Value,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarArtist {
    pub id: String,
    pub name: String,
    pub birthday: String,
    pub deathday: String,
    pub nationality: String,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: serde_json::Value,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: serde_json::Value,
    pub image_url: String,
}

/// An Artsy "gene".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: serde_json::Value,
    pub image_url: String,
}

// ==================== RAW UPSTREAM ====================

#[derive(Debug, Deserialize, Default)]
pub struct RawSearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: serde_json::Value,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawArtist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: serde_json::Value,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawArtwork {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: serde_json::Value,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawGene {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: serde_json::Value,
}

/// Response of `POST /tokens/xapp_token`.
#[derive(Debug, Deserialize)]
pub struct XappTokenResponse {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

// ==================== RESPONSE ENVELOPES ====================

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub results: Vec<ArtistSummary>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ArtistResponse {
    pub artist: ArtistDetails,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarArtistsResponse {
    pub similar_artists: Vec<SimilarArtist>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ArtworksResponse {
    pub artworks: Vec<Artwork>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

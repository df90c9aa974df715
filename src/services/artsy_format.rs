// Pure transforms from Artsy HAL payloads to the DTOs in `models::artsy`.

use crate::models::{
    ArtistDetails, ArtistSummary, Artwork, Category, RawArtist, RawArtwork, RawGene,
    RawSearchResult, SimilarArtist,
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;

/// Thumbnail path Artsy returns when it has no image.
pub const MISSING_IMAGE_PATH: &str = "/assets/shared/missing_image.png";
/// Local asset served by the frontend in place of a missing image.
pub const DEFAULT_IMAGE: &str = "artsy_logo.svg";

lazy_static! {
    static ref HYPHEN_WRAP_RE: Regex =
        Regex::new(r"([A-Za-z0-9_]+)- ([A-Za-z0-9_]+)").expect("hyphen regex is valid");
    static ref RELATIVE_MD_LINK_RE: Regex =
        Regex::new(r"\[(.*?)\]\((/[^)]+)\)").expect("markdown link regex is valid");
}

/// Last `/`-delimited segment of a self link.
pub fn extract_id(self_href: &str) -> String {
    self_href.rsplit('/').next().unwrap_or_default().to_string()
}

fn href<'a>(links: &'a serde_json::Value, rel: &str) -> Option<&'a str> {
    links.get(rel)?.get("href")?.as_str()
}

fn id_from_links(links: &serde_json::Value) -> String {
    href(links, "self").map(extract_id).unwrap_or_default()
}

pub fn resolve_image_url(links: &serde_json::Value) -> String {
    match href(links, "thumbnail") {
        Some(url) if !url.is_empty() && url != MISSING_IMAGE_PATH => url.to_string(),
        _ => DEFAULT_IMAGE.to_string(),
    }
}

/// Rejoins words split across line wraps ("cubist- painting") and replaces the
/// en-dash and the stray 0x96 control character Artsy leaves in biographies.
pub fn format_biography(biography: Option<&str>) -> String {
    let Some(text) = biography else {
        return String::new();
    };
    HYPHEN_WRAP_RE
        .replace_all(text, "${1}${2}")
        .replace('\u{2013}', "-")
        .replace('\u{0096}', "\u{2014}")
}

/// Makes site-relative markdown link targets absolute against `web_url`.
pub fn rewrite_description_links(description: Option<&str>, web_url: &str) -> String {
    let Some(text) = description else {
        return String::new();
    };
    RELATIVE_MD_LINK_RE
        .replace_all(text, |caps: &Captures| format!("[{}]({}{})", &caps[1], web_url, &caps[2]))
        .into_owned()
}

/// Decodes `_embedded.<key>`; a missing envelope or collection yields no items.
pub fn embedded_items<T: DeserializeOwned>(
    body: &serde_json::Value,
    key: &str,
) -> Result<Vec<T>, serde_json::Error> {
    match body.get("_embedded").and_then(|embedded| embedded.get(key)) {
        Some(items) if !items.is_null() => serde_json::from_value(items.clone()),
        _ => Ok(Vec::new()),
    }
}

pub fn normalize_search_result(raw: RawSearchResult) -> ArtistSummary {
    ArtistSummary {
        id: id_from_links(&raw.links),
        title: raw.title.unwrap_or_default(),
        image_url: resolve_image_url(&raw.links),
        links: raw.links,
    }
}

pub fn normalize_artist_details(raw: RawArtist) -> ArtistDetails {
    ArtistDetails {
        id: id_from_links(&raw.links),
        name: raw.name.unwrap_or_default(),
        birthday: raw.birthday.unwrap_or_default(),
        deathday: raw.deathday.unwrap_or_default(),
        nationality: raw.nationality.unwrap_or_default(),
        biography: format_biography(raw.biography.as_deref()),
        image_url: resolve_image_url(&raw.links),
        links: raw.links,
    }
}

pub fn normalize_similar_artist(raw: RawArtist) -> SimilarArtist {
    SimilarArtist {
        id: id_from_links(&raw.links),
        name: raw.name.unwrap_or_default(),
        birthday: raw.birthday.unwrap_or_default(),
        deathday: raw.deathday.unwrap_or_default(),
        nationality: raw.nationality.unwrap_or_default(),
        image_url: resolve_image_url(&raw.links),
        links: raw.links,
    }
}

pub fn normalize_artwork(raw: RawArtwork) -> Artwork {
    Artwork {
        id: id_from_links(&raw.links),
        title: raw.title.unwrap_or_default(),
        date: raw.date.unwrap_or_default(),
        image_url: resolve_image_url(&raw.links),
        links: raw.links,
    }
}

pub fn normalize_category(raw: RawGene, web_url: &str) -> Category {
    Category {
        id: id_from_links(&raw.links),
        name: raw.name.unwrap_or_default(),
        description: rewrite_description_links(raw.description.as_deref(), web_url),
        image_url: resolve_image_url(&raw.links),
        links: raw.links,
    }
}

use crate::{
    config::ArtsyConfig,
    models::{
        ArtistDetails, ArtistSummary, Artwork, Category, RawArtist, RawArtwork, RawGene,
        RawSearchResult, SimilarArtist,
    },
    services::{
        artsy_format::{self, embedded_items},
        artsy_token::{CredentialBroker, SystemClock, XappTokenExchange},
    },
    utils::AppError,
};
use async_trait::async_trait;
use std::sync::Arc;

const PAGE_SIZE: &str = "10";
const TOKEN_HEADER: &str = "X-Xapp-Token";

/// Read-only access to the Artsy catalog, already normalized.
#[async_trait]
pub trait ArtsyApi: Send + Sync {
    async fn search_artists(&self, query: &str) -> Result<Vec<ArtistSummary>, AppError>;
    async fn get_artist_details(&self, artist_id: &str) -> Result<ArtistDetails, AppError>;
    async fn get_similar_artists(&self, artist_id: &str) -> Result<Vec<SimilarArtist>, AppError>;
    async fn get_artworks_by_artist(&self, artist_id: &str) -> Result<Vec<Artwork>, AppError>;
    async fn get_artwork_categories(&self, artwork_id: &str) -> Result<Vec<Category>, AppError>;
}

pub struct ArtsyClient {
    http: reqwest::Client,
    api_base: String,
    web_url: String,
    broker: CredentialBroker,
}

impl ArtsyClient {
    pub fn new(config: &ArtsyConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("artist-search-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;
        let broker = CredentialBroker::new(
            Arc::new(XappTokenExchange::new(http.clone(), config)),
            Arc::new(SystemClock),
        );
        Ok(Self::with_broker(http, config, broker))
    }

    pub fn with_broker(http: reqwest::Client, config: &ArtsyConfig, broker: CredentialBroker) -> Self {
        Self {
            http,
            api_base: config.api_base.clone(),
            web_url: config.web_url.clone(),
            broker,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Authenticated GET returning the raw JSON body.
    async fn get_json(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, AppError> {
        let token = self
            .broker
            .get_token()
            .await
            .map_err(|e| AppError::upstream(operation, e))?;

        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .header(TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|e| AppError::upstream(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(operation, format!("Artsy API returned {}", status)));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AppError::upstream(operation, e))
    }

    async fn get_embedded<T: serde::de::DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, &str)],
        key: &str,
    ) -> Result<Vec<T>, AppError> {
        let body = self.get_json(operation, path, query).await?;
        if body.pointer(&format!("/_embedded/{}", key)).is_none() {
            log::warn!("⚠️  {}: no '{}' in Artsy response, returning empty list", operation, key);
        }
        embedded_items(&body, key).map_err(|e| AppError::upstream(operation, e))
    }
}

pub fn artist_path(artist_id: &str) -> String {
    format!("/artists/{}", urlencoding::encode(artist_id))
}

#[async_trait]
impl ArtsyApi for ArtsyClient {
    async fn search_artists(&self, query: &str) -> Result<Vec<ArtistSummary>, AppError> {
        log::info!("🔍 Searching Artsy artists: {}", query);
        let raw: Vec<RawSearchResult> = self
            .get_embedded(
                "search_artists",
                "/search",
                &[("q", query), ("type", "artist"), ("size", PAGE_SIZE)],
                "results",
            )
            .await?;
        Ok(raw.into_iter().map(artsy_format::normalize_search_result).collect())
    }

    async fn get_artist_details(&self, artist_id: &str) -> Result<ArtistDetails, AppError> {
        log::info!("🎨 Fetching artist details: {}", artist_id);
        let body = self
            .get_json("get_artist_details", &artist_path(artist_id), &[])
            .await?;
        let raw: RawArtist = serde_json::from_value(body)
            .map_err(|e| AppError::upstream("get_artist_details", e))?;
        Ok(artsy_format::normalize_artist_details(raw))
    }

    async fn get_similar_artists(&self, artist_id: &str) -> Result<Vec<SimilarArtist>, AppError> {
        let raw: Vec<RawArtist> = self
            .get_embedded(
                "get_similar_artists",
                "/artists",
                &[("similar_to_artist_id", artist_id), ("size", PAGE_SIZE)],
                "artists",
            )
            .await?;
        Ok(raw.into_iter().map(artsy_format::normalize_similar_artist).collect())
    }

    async fn get_artworks_by_artist(&self, artist_id: &str) -> Result<Vec<Artwork>, AppError> {
        let raw: Vec<RawArtwork> = self
            .get_embedded(
                "get_artworks_by_artist",
                "/artworks",
                &[("artist_id", artist_id), ("size", PAGE_SIZE)],
                "artworks",
            )
            .await?;
        Ok(raw.into_iter().map(artsy_format::normalize_artwork).collect())
    }

    async fn get_artwork_categories(&self, artwork_id: &str) -> Result<Vec<Category>, AppError> {
        let raw: Vec<RawGene> = self
            .get_embedded(
                "get_artwork_categories",
                "/genes",
                &[("artwork_id", artwork_id)],
                "genes",
            )
            .await?;
        Ok(raw
            .into_iter()
            .map(|gene| artsy_format::normalize_category(gene, &self.web_url))
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_path_encodes_segment() {
        assert_eq!(artist_path("pablo-picasso"), "/artists/pablo-picasso");
        assert_eq!(artist_path("a/b c"), "/artists/a%2Fb%20c");
    }

    #[tokio::test]
    async fn token_failure_is_reported_with_operation() {
        use crate::services::artsy_token::TokenExchange;

        struct Refusing;

        #[async_trait]
        impl TokenExchange for Refusing {
            async fn exchange(&self) -> Result<String, AppError> {
                Err(AppError::UpstreamAuth("denied".into()))
            }
        }

        let config = ArtsyConfig {
            api_base: "http://127.0.0.1:9".into(),
            web_url: "https://www.artsy.net".into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
        };
        let broker = CredentialBroker::new(Arc::new(Refusing), Arc::new(SystemClock));
        let client = ArtsyClient::with_broker(reqwest::Client::new(), &config, broker);

        match client.search_artists("picasso").await {
            Err(AppError::UpstreamRequest { operation, reason }) => {
                assert_eq!(operation, "search_artists");
                assert!(reason.contains("denied"));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }

    // ---- against a local HTTP upstream ----

    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct Seen {
        path: String,
        query: String,
        token: Option<String>,
    }

    #[derive(Default)]
    struct Upstream {
        seen: Mutex<Vec<Seen>>,
        exchanges: AtomicUsize,
    }

    impl Upstream {
        fn last(&self) -> Seen {
            self.seen.lock().unwrap().last().cloned().expect("request recorded")
        }
    }

    async fn fake_artsy(req: HttpRequest, upstream: web::Data<Upstream>) -> HttpResponse {
        let path = req.path().to_string();
        if path == "/tokens/xapp_token" {
            upstream.exchanges.fetch_add(1, Ordering::SeqCst);
            return HttpResponse::Ok().json(json!({
                "token": "xapp-123",
                "expires_at": "2030-01-01T00:00:00Z"
            }));
        }

        upstream.seen.lock().unwrap().push(Seen {
            path: path.clone(),
            query: req.query_string().to_string(),
            token: req
                .headers()
                .get(TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        });

        match path.as_str() {
            "/search" => HttpResponse::Ok().json(json!({
                "_embedded": { "results": [{
                    "title": "Pablo Picasso",
                    "_links": {
                        "self": { "href": "https://api.artsy.net/api/artists/4d8b928b4eb68a1b2c0001f2" },
                        "thumbnail": { "href": "https://d32dm0rphc51dk.cloudfront.net/picasso.jpg" }
                    }
                }]}
            })),
            "/artists/pablo-picasso" => HttpResponse::Ok().json(json!({
                "name": "Pablo Picasso",
                "birthday": "1881",
                "nationality": "Spanish",
                "biography": "Cubist- painter",
                "_links": { "self": { "href": "https://api.artsy.net/api/artists/pablo-picasso" } }
            })),
            "/artists" => HttpResponse::Ok().json(json!({ "total_count": 0 })),
            "/artworks" => HttpResponse::InternalServerError().finish(),
            "/genes" => HttpResponse::Ok().json(json!({
                "_embedded": { "genes": [{
                    "name": "Cubism",
                    "description": "See [Braque](/artist/georges-braque)",
                    "_links": { "self": { "href": "https://api.artsy.net/api/genes/cubism" } }
                }]}
            })),
            _ => HttpResponse::NotFound().finish(),
        }
    }

    fn start_upstream() -> (ArtsyClient, web::Data<Upstream>) {
        let upstream = web::Data::new(Upstream::default());
        let data = upstream.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(fake_artsy))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        let config = ArtsyConfig {
            api_base: format!("http://{}", addr),
            web_url: "https://www.artsy.net".into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
        };
        (ArtsyClient::new(&config).unwrap(), upstream)
    }

    #[actix_web::test]
    async fn search_sends_token_and_query() {
        let (client, upstream) = start_upstream();

        let results = client.search_artists("picasso").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "4d8b928b4eb68a1b2c0001f2");
        assert_eq!(results[0].title, "Pablo Picasso");
        assert_eq!(results[0].image_url, "https://d32dm0rphc51dk.cloudfront.net/picasso.jpg");

        let seen = upstream.last();
        assert_eq!(seen.path, "/search");
        assert_eq!(seen.query, "q=picasso&type=artist&size=10");
        assert_eq!(seen.token.as_deref(), Some("xapp-123"));
    }

    #[actix_web::test]
    async fn artist_lookups_hit_expected_endpoints() {
        let (client, upstream) = start_upstream();

        let artist = client.get_artist_details("pablo-picasso").await.unwrap();
        assert_eq!(artist.id, "pablo-picasso");
        assert_eq!(artist.name, "Pablo Picasso");
        assert_eq!(artist.biography, "Cubistpainter");
        assert_eq!(upstream.last().path, "/artists/pablo-picasso");

        // No `_embedded.artists` in the body.
        let similar = client.get_similar_artists("pablo-picasso").await.unwrap();
        assert!(similar.is_empty());
        let seen = upstream.last();
        assert_eq!(seen.path, "/artists");
        assert_eq!(seen.query, "similar_to_artist_id=pablo-picasso&size=10");

        let categories = client.get_artwork_categories("guernica").await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, "cubism");
        assert_eq!(
            categories[0].description,
            "See [Braque](https://www.artsy.net/artist/georges-braque)"
        );
        assert_eq!(upstream.last().query, "artwork_id=guernica");

        // One exchange serves every call.
        assert_eq!(upstream.exchanges.load(Ordering::SeqCst), 1);
        assert!(upstream
            .seen
            .lock()
            .unwrap()
            .iter()
            .all(|s| s.token.as_deref() == Some("xapp-123")));
    }

    #[actix_web::test]
    async fn upstream_error_status_names_operation() {
        let (client, upstream) = start_upstream();

        match client.get_artworks_by_artist("pablo-picasso").await {
            Err(AppError::UpstreamRequest { operation, reason }) => {
                assert_eq!(operation, "get_artworks_by_artist");
                assert!(reason.contains("500"));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }

        let seen = upstream.last();
        assert_eq!(seen.path, "/artworks");
        assert_eq!(seen.query, "artist_id=pablo-picasso&size=10");
    }
}

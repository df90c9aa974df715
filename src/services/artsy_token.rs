// ==================== ARTSY CREDENTIAL BROKER ====================
// Holds one xapp token at a time and swaps it for a fresh one once the
// validity window has passed.

use crate::{config::ArtsyConfig, models::XappTokenResponse, utils::AppError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

/// Tokens are treated as valid for one hour after issuance.
pub const TOKEN_VALIDITY_SECS: i64 = 3600;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Exchanges client credentials for an upstream access token.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self) -> Result<String, AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Single-slot token cache.
#[derive(Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<CachedToken> {
        self.slot.lock().ok()?.clone()
    }

    pub fn set(&self, token: CachedToken) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token);
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.get() {
            Some(cached) => now >= cached.expires_at,
            None => true,
        }
    }
}

pub struct CredentialBroker {
    cache: TokenCache,
    exchange: Arc<dyn TokenExchange>,
    clock: Arc<dyn Clock>,
}

impl CredentialBroker {
    pub fn new(exchange: Arc<dyn TokenExchange>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: TokenCache::new(),
            exchange,
            clock,
        }
    }

    /// Returns the cached token while it is valid, otherwise fetches a new one.
    ///
    /// Refreshes are not coordinated: two callers racing past an expired slot both
    /// exchange credentials and the later write wins. Both tokens are valid.
    pub async fn get_token(&self) -> Result<String, AppError> {
        if !self.cache.is_expired(self.clock.now()) {
            if let Some(cached) = self.cache.get() {
                return Ok(cached.token);
            }
        }

        log::debug!("🔑 Artsy token missing or expired, requesting a new one");
        let token = self.exchange.exchange().await?;
        let issued_at = self.clock.now();
        self.cache.set(CachedToken {
            token: token.clone(),
            expires_at: issued_at + Duration::seconds(TOKEN_VALIDITY_SECS),
        });
        log::info!("✅ Artsy token refreshed");
        Ok(token)
    }
}

/// `POST {api_base}/tokens/xapp_token`
pub struct XappTokenExchange {
    http: reqwest::Client,
    url: String,
    client_id: String,
    client_secret: String,
}

impl XappTokenExchange {
    pub fn new(http: reqwest::Client, config: &ArtsyConfig) -> Self {
        Self {
            http,
            url: format!("{}/tokens/xapp_token", config.api_base),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

#[async_trait]
impl TokenExchange for XappTokenExchange {
    async fn exchange(&self) -> Result<String, AppError> {
        let response = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({
                "client_id": self.client_id,
                "client_secret": self.client_secret,
            }))
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamAuth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let body: XappTokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("invalid token response: {}", e)))?;

        log::debug!("Artsy reports token expiry {:?}", body.expires_at);
        Ok(body.token)
    }
}

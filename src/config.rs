use std::env;
use thiserror::Error;

const DEFAULT_ARTSY_API_BASE: &str = "https://api.artsy.net/api";
const DEFAULT_ARTSY_WEB_URL: &str = "https://www.artsy.net";
const DEFAULT_JWT_ISSUER: &str = "artist-search-service";
const DEFAULT_DATABASE_NAME: &str = "artsy";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4200";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone)]
pub struct ArtsyConfig {
    pub api_base: String,
    pub web_url: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub cors_origin: String,
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub artsy: ArtsyConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_raw = optional("PORT").unwrap_or_else(|| "8080".to_string());
        let port = port_raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: port_raw.clone(),
        })?;

        let mongodb_uri = required("MONGODB_URI")?;
        let database_name =
            optional("MONGODB_DATABASE").unwrap_or_else(|| database_name_from_uri(&mongodb_uri));

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: Environment::parse(&optional("APP_ENV").unwrap_or_default()),
            cors_origin: optional("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            mongodb_uri,
            database_name,
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: optional("JWT_ISSUER").unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string()),
            artsy: ArtsyConfig {
                api_base: trim_slash(optional("ARTSY_API_BASE").unwrap_or_else(|| DEFAULT_ARTSY_API_BASE.to_string())),
                web_url: trim_slash(optional("ARTSY_WEB_URL").unwrap_or_else(|| DEFAULT_ARTSY_WEB_URL.to_string())),
                client_id: required("ARTSY_CLIENT_ID")?,
                client_secret: required("ARTSY_CLIENT_SECRET")?,
            },
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// `mongodb://host:27017/mydb?opts` -> `mydb`
fn database_name_from_uri(uri: &str) -> String {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    without_scheme
        .split_once('/')
        .map(|(_, path)| path)
        .and_then(|path| path.split('?').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATABASE_NAME)
        .to_string()
}

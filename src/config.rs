use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_CATALOG_URL: &str = "https://catalog.apps.asu.edu/catalog/classes/classlist";

/// Cached listings live this long unless `CACHE_TTL_SECS` overrides it.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
    pub term: String,
    pub campus: String,
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            term: "2237".to_string(),
            campus: "A".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub redis_url: Option<String>,
    pub cache_ttl: Duration,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let redis_url = env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty());

        let cache_ttl = match env::var("CACHE_TTL_SECS") {
            Ok(raw) => Duration::from_secs(parse_secs("CACHE_TTL_SECS", &raw)?),
            Err(_) => DEFAULT_CACHE_TTL,
        };

        let defaults = CatalogConfig::default();
        let timeout = match env::var("CATALOG_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(parse_secs("CATALOG_TIMEOUT_SECS", &raw)?),
            Err(_) => defaults.timeout,
        };

        let catalog = CatalogConfig {
            base_url: env::var("CATALOG_URL").unwrap_or(defaults.base_url),
            term: env::var("CATALOG_TERM").unwrap_or(defaults.term),
            campus: env::var("CATALOG_CAMPUS").unwrap_or(defaults.campus),
            timeout,
        };

        Ok(Self {
            bind_addr,
            redis_url,
            cache_ttl,
            catalog,
        })
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<u64, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(AppError::Config(format!("{} must be greater than zero", name))),
        Ok(secs) => Ok(secs),
        Err(e) => Err(AppError::Config(format!("{} is invalid: {}", name, e))),
    }
}

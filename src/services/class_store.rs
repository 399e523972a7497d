use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::CacheBackend;
use crate::catalog::RowSource;
use crate::error::AppError;
use crate::extract;
use crate::models::{ClassRecord, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Hit,
    Miss,
    /// The query was malformed; neither the cache nor the catalog was consulted.
    Skipped,
}

#[derive(Debug)]
pub struct Lookup {
    pub records: Vec<ClassRecord>,
    pub source: LookupSource,
}

/// Cache-aside access to catalog listings.
#[derive(Clone)]
pub struct ClassStore {
    cache: Arc<dyn CacheBackend>,
    source: Arc<dyn RowSource>,
    ttl: Duration,
}

impl ClassStore {
    pub fn new(cache: Arc<dyn CacheBackend>, source: Arc<dyn RowSource>, ttl: Duration) -> Self {
        Self { cache, source, ttl }
    }

    pub fn cache(&self) -> &Arc<dyn CacheBackend> {
        &self.cache
    }

    /// Serves `query` from cache when a usable entry exists, otherwise
    /// extracts fresh records and caches them for the store's TTL.
    ///
    /// Cache trouble of any kind only costs a fresh extraction. The one error
    /// surfaced is failing to serialize the extracted records.
    pub async fn lookup(&self, query: &Query) -> Result<Lookup, AppError> {
        if !query.is_valid() {
            return Ok(Lookup {
                records: Vec::new(),
                source: LookupSource::Skipped,
            });
        }

        let key = query.cache_key();

        if let Some(records) = self.read_cached(query, &key).await {
            info!("Cache hit: {}", key);
            return Ok(Lookup {
                records,
                source: LookupSource::Hit,
            });
        }

        info!("Cache miss: {}", key);
        let extraction = extract::extract(self.source.as_ref(), query).await;
        let payload = serde_json::to_string(&extraction.records)?;

        if let Err(e) = self.cache.set(&key, &payload, self.ttl).await {
            warn!("Failed to cache '{}': {}", key, e);
        }

        Ok(Lookup {
            records: extraction.records,
            source: LookupSource::Miss,
        })
    }

    /// Any entry that decodes is a hit, empty lists included, except that an
    /// empty list cached for a course lookup is retried.
    async fn read_cached(&self, query: &Query, key: &str) -> Option<Vec<ClassRecord>> {
        let cached = match self.cache.get(key).await {
            Ok(Some(cached)) => cached,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for '{}': {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<ClassRecord>>(&cached) {
            Ok(records) if records.is_empty() && matches!(query, Query::Course { .. }) => None,
            Ok(records) => Some(records),
            Err(e) => {
                warn!("Discarding undecodable cache entry '{}': {}", key, e);
                None
            }
        }
    }
}

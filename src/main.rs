use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use class_catalog::api::router;
use class_catalog::cache::{CacheBackend, MemoryCache, RedisCache};
use class_catalog::catalog::HttpRowSource;
use class_catalog::config::AppConfig;
use class_catalog::services::ClassStore;
use class_catalog::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "class_catalog=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let cache: Arc<dyn CacheBackend> = match &config.redis_url {
        Some(url) => Arc::new(RedisCache::new(url)?),
        None => {
            warn!("REDIS_URL is not set; using in-process cache");
            Arc::new(MemoryCache::new())
        }
    };
    let source = Arc::new(HttpRowSource::new(config.catalog.clone())?);

    let state = AppState {
        store: ClassStore::new(cache, source, config.cache_ttl),
    };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

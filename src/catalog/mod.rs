pub mod html;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::error::AppError;
use crate::models::Query;

/// One listing row as rendered by the catalog: its cell texts in page order
/// plus the row's markup, which still carries the links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<String>,
    pub markup: String,
}

impl RawRow {
    pub fn new(cells: Vec<String>, markup: impl Into<String>) -> Self {
        Self {
            cells,
            markup: markup.into(),
        }
    }
}

#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self, query: &Query) -> Result<Vec<RawRow>, AppError>;
}

pub struct HttpRowSource {
    client: Client,
    config: CatalogConfig,
}

impl HttpRowSource {
    pub fn new(config: CatalogConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn listing_url(&self, query: &Query) -> Result<Url, AppError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("campusOrOnlineSelection", self.config.campus.as_str()),
            ("honors", "F"),
            ("promod", "F"),
            ("searchType", "all"),
            ("term", self.config.term.as_str()),
        ];
        match query {
            Query::All => {}
            Query::Section(id) => params.push(("keywords", id.as_str())),
            Query::Course { subject, number } => {
                params.push(("subject", subject.as_str()));
                params.push(("catalogNbr", number.as_str()));
            }
        }

        Url::parse_with_params(&self.config.base_url, &params)
            .map_err(|e| AppError::Config(format!("CATALOG_URL is invalid: {}", e)))
    }
}

#[async_trait]
impl RowSource for HttpRowSource {
    async fn fetch_rows(&self, query: &Query) -> Result<Vec<RawRow>, AppError> {
        let url = self.listing_url(query)?;
        debug!("Fetching catalog page {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Upstream(format!("Catalog returned {}", status)));
        }

        let body = response.text().await?;
        let rows = html::parse_rows(&body);
        info!("Catalog returned {} rows for {}", rows.len(), query);
        Ok(rows)
    }
}

pub struct NoopRowSource;

#[async_trait]
impl RowSource for NoopRowSource {
    async fn fetch_rows(&self, _query: &Query) -> Result<Vec<RawRow>, AppError> {
        Ok(Vec::new())
    }
}

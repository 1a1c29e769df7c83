use crate::domain::model::RawDocument;
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// `CatalogSource` over HTTP GET.
///
/// Request URL is `base + resource`, with the API key carried as the
/// `api_key` query parameter. No timeout is applied here; callers wrap
/// calls in their own deadline when they need one.
#[derive(Clone)]
pub struct HttpCatalog {
    client: Client,
    base: String,
    api_key: String,
}

impl HttpCatalog {
    pub fn new(base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.api_base(), config.api_key())
    }

    pub fn request_url(&self, resource: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base, resource))?;
        if !self.api_key.is_empty() {
            url.query_pairs_mut().append_pair("api_key", &self.api_key);
        }
        Ok(url)
    }
}

impl std::fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("base", &self.base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch(&self, resource: &str) -> Result<RawDocument> {
        let url = self.request_url(resource)?;

        // 不記錄完整 URL，避免洩漏 api_key
        tracing::debug!("Making API request to: {}{}", self.base, resource);
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                // 連線層失敗；訊息不含 query string
                CatalogError::NetworkError {
                    message: format!("{}{}: {}", self.base, resource, e.without_url()),
                }
            } else {
                CatalogError::ApiError(e.without_url())
            }
        })?;

        tracing::debug!("API response status: {}", response.status());
        let body = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?
            .text()
            .await?;

        tracing::debug!("Received {} bytes for {}", body.len(), resource);
        Ok(body)
    }
}

use crate::domain::model::RawDocument;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key/value store consulted before any detail fetch.
///
/// Expiry, eviction and persistence belong to the implementation; callers
/// treat it as a possibly-empty lookup table.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Remote content API: a resource path in, the whole text body out.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, resource: &str) -> Result<RawDocument>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn api_key(&self) -> &str;
    fn cache_url(&self) -> &str;
    fn listing_path(&self) -> &str;
    fn detail_prefix(&self) -> &str;
    fn id_marker(&self) -> &str;
    fn single_flight(&self) -> bool;
}

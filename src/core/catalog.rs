use crate::core::detail_cache::DetailCache;
use crate::core::scanner::FieldScanner;
use crate::domain::model::{ListingSnapshot, MovieId, RawDocument};
use crate::domain::ports::{CacheStore, CatalogSource, ConfigProvider};
use crate::utils::error::Result;

pub const DEFAULT_LISTING_PATH: &str = "movie/popular";
pub const DEFAULT_DETAIL_PREFIX: &str = "movie/";
pub const DEFAULT_ID_MARKER: &str = "\"id\":";

/// Resource layout of the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub listing_path: String,
    pub detail_prefix: String,
    pub id_marker: String,
}

impl CatalogPaths {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            listing_path: config.listing_path().to_string(),
            detail_prefix: config.detail_prefix().to_string(),
            id_marker: config.id_marker().to_string(),
        }
    }
}

impl Default for CatalogPaths {
    fn default() -> Self {
        Self {
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            detail_prefix: DEFAULT_DETAIL_PREFIX.to_string(),
            id_marker: DEFAULT_ID_MARKER.to_string(),
        }
    }
}

pub struct MovieCatalog<S: CacheStore, F: CatalogSource> {
    details: DetailCache<S, F>,
    scanner: FieldScanner,
    listing_path: String,
}

impl<S: CacheStore, F: CatalogSource> MovieCatalog<S, F> {
    pub fn new(cache: S, source: F, paths: CatalogPaths) -> Self {
        Self {
            details: DetailCache::new(cache, source, paths.detail_prefix),
            scanner: FieldScanner::new(paths.id_marker),
            listing_path: paths.listing_path,
        }
    }

    pub fn from_config<C: ConfigProvider>(cache: S, source: F, config: &C) -> Self {
        Self::new(cache, source, CatalogPaths::from_config(config))
            .with_single_flight(config.single_flight())
    }

    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.details = self.details.with_single_flight(enabled);
        self
    }

    /// Identifiers of the popular listing, most popular first.
    ///
    /// The order is the scanner's order reversed, not the order the ids
    /// appear in the payload; no sorting by any field takes place. An empty
    /// result means no data was found, not a failure. The listing is fetched
    /// on every call.
    pub async fn popular_movie_ids(&self) -> Result<ListingSnapshot> {
        let listing = self.details.source().fetch(&self.listing_path).await?;

        let mut ids: ListingSnapshot = self
            .scanner
            .scan(&listing)
            .into_iter()
            .map(MovieId::from)
            .collect();
        ids.reverse();

        if ids.is_empty() {
            tracing::warn!(
                "No '{}' markers found in listing '{}'",
                self.scanner.marker(),
                self.listing_path
            );
        } else {
            tracing::info!("Listing '{}' yielded {} ids", self.listing_path, ids.len());
        }

        Ok(ids)
    }

    pub async fn details_by_id(&self, id: &MovieId) -> Result<RawDocument> {
        self.details.get_details(id).await
    }

    pub fn detail_cache(&self) -> &DetailCache<S, F> {
        &self.details
    }
}

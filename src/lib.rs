pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::cache::{InMemoryCache, RedisCache};
pub use adapters::http::HttpCatalog;
pub use crate::core::catalog::{CatalogPaths, MovieCatalog};
pub use crate::core::detail_cache::DetailCache;
pub use crate::core::scanner::{scan_for_key_values, FieldScanner};
pub use domain::model::{ListingSnapshot, MovieId, RawDocument};
pub use utils::error::{CatalogError, Result};

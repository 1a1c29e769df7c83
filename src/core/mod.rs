pub mod catalog;
pub mod detail_cache;
pub mod scanner;

pub use crate::domain::model::{ListingSnapshot, MovieId, RawDocument};
pub use crate::domain::ports::{CacheStore, CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;

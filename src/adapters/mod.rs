// Adapters layer: concrete implementations for external systems (cache stores, http).

pub mod cache;
pub mod http;

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3/";
pub const DEFAULT_CACHE_URL: &str = "127.0.0.1";

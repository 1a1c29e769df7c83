use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_cache_target, validate_non_empty_string, validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "movie-cache")]
#[command(about = "Fetch popular movie ids and cached movie details")]
pub struct CliConfig {
    /// Base URL of the movie API
    #[arg(long, default_value = super::DEFAULT_API_BASE)]
    pub api_base: String,

    /// API key, sent as the api_key query parameter
    #[arg(long, env = "TMDB_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Cache server address (host or redis:// URL)
    #[arg(long, default_value = super::DEFAULT_CACHE_URL)]
    pub cache_url: String,

    #[arg(long, default_value = crate::core::catalog::DEFAULT_LISTING_PATH)]
    pub listing_path: String,

    #[arg(long, default_value = crate::core::catalog::DEFAULT_DETAIL_PREFIX)]
    pub detail_prefix: String,

    /// Literal text preceding each id in the listing body
    #[arg(long, default_value = crate::core::catalog::DEFAULT_ID_MARKER)]
    pub id_marker: String,

    /// Fetch details for these ids instead of the most popular one
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Print at most this many listing ids
    #[arg(long)]
    pub limit: Option<usize>,

    /// Re-indent detail documents that parse as JSON
    #[arg(long)]
    pub pretty: bool,

    /// Coalesce concurrent fetches of the same missing id
    #[arg(long)]
    pub single_flight: bool,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn cache_url(&self) -> &str {
        &self.cache_url
    }

    fn listing_path(&self) -> &str {
        &self.listing_path
    }

    fn detail_prefix(&self) -> &str {
        &self.detail_prefix
    }

    fn id_marker(&self) -> &str {
        &self.id_marker
    }

    fn single_flight(&self) -> bool {
        self.single_flight
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_cache_target("cache_url", &self.cache_url)?;
        validate_non_empty_string("listing_path", &self.listing_path)?;
        validate_non_empty_string("detail_prefix", &self.detail_prefix)?;
        validate_non_empty_string("id_marker", &self.id_marker)?;
        Ok(())
    }
}

use crate::core::catalog::{DEFAULT_DETAIL_PREFIX, DEFAULT_ID_MARKER, DEFAULT_LISTING_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_cache_target, validate_non_empty_string, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub listing_path: Option<String>,
    pub detail_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub url: Option<String>,
    pub single_flight: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    pub id_marker: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        // 先確認語法與必要的 [api] 表，再做型別檢查
        let table: toml::Table =
            toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        if !table.contains_key("api") {
            return Err(CatalogError::MissingConfigError {
                field: "api".to_string(),
            });
        }

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TMDB_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .unwrap_or(super::DEFAULT_API_BASE)
    }

    fn api_key(&self) -> &str {
        self.api.api_key.as_deref().unwrap_or("")
    }

    fn cache_url(&self) -> &str {
        self.cache.url.as_deref().unwrap_or(super::DEFAULT_CACHE_URL)
    }

    fn listing_path(&self) -> &str {
        self.api
            .listing_path
            .as_deref()
            .unwrap_or(DEFAULT_LISTING_PATH)
    }

    fn detail_prefix(&self) -> &str {
        self.api
            .detail_prefix
            .as_deref()
            .unwrap_or(DEFAULT_DETAIL_PREFIX)
    }

    fn id_marker(&self) -> &str {
        self.scan.id_marker.as_deref().unwrap_or(DEFAULT_ID_MARKER)
    }

    fn single_flight(&self) -> bool {
        self.cache.single_flight.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", self.api_base())?;
        validate_cache_target("cache.url", self.cache_url())?;
        validate_non_empty_string("api.listing_path", self.listing_path())?;
        validate_non_empty_string("api.detail_prefix", self.detail_prefix())?;
        validate_non_empty_string("scan.id_marker", self.id_marker())?;

        if self.api_key().starts_with("${") {
            tracing::warn!("api.api_key still contains an unresolved variable: {}", self.api_key());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com/3/"
api_key = "abc123"
listing_path = "movie/top_rated"
detail_prefix = "movie/"

[cache]
url = "redis://cache.internal:6380/"
single_flight = true

[scan]
id_marker = '"id":'
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_base(), "https://api.example.com/3/");
        assert_eq!(config.api_key(), "abc123");
        assert_eq!(config.listing_path(), "movie/top_rated");
        assert_eq!(config.cache_url(), "redis://cache.internal:6380/");
        assert_eq!(config.id_marker(), "\"id\":");
        assert!(config.single_flight());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[api]\n").unwrap();

        assert_eq!(config.api_base(), "https://api.themoviedb.org/3/");
        assert_eq!(config.api_key(), "");
        assert_eq!(config.cache_url(), "127.0.0.1");
        assert_eq!(config.listing_path(), "movie/popular");
        assert_eq!(config.detail_prefix(), "movie/");
        assert_eq!(config.id_marker(), "\"id\":");
        assert!(!config.single_flight());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MOVIE_CACHE_TEST_KEY", "from-env");

        let toml_content = r#"
[api]
api_key = "${MOVIE_CACHE_TEST_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "from-env");

        std::env::remove_var("MOVIE_CACHE_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let toml_content = r#"
[api]
api_key = "${MOVIE_CACHE_SURELY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "${MOVIE_CACHE_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[api]
base_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[api]\n[cache]\nurl = \"http://127.0.0.1/\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_table_is_reported_by_name() {
        let err = TomlConfig::from_toml_str("[cache]\nurl = \"127.0.0.1\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingConfigError { ref field } if field == "api"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_syntax_error_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[api\nbase_url = ").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigError { .. }));
    }

    #[test]
    fn test_wrong_value_type_fails_validation() {
        let err = TomlConfig::from_toml_str("[api]\nbase_url = 42\n").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://api.example.com/"

[cache]
url = "10.0.0.5"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_base(), "https://api.example.com/");
        assert_eq!(config.cache_url(), "10.0.0.5");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/definitely/not/here/movie-cache.toml").unwrap_err();
        assert!(matches!(err, CatalogError::IoError(_)));
        assert_eq!(err.exit_code(), 3);
    }
}

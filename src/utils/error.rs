use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Network failure: {message}")]
    NetworkError { message: String },

    #[error("Invalid request URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Cache operation failed: {0}")]
    CacheError(#[from] redis::RedisError),

    #[error("Cache unavailable: {message}")]
    CacheUnavailable { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Cache,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::ApiError(_)
            | CatalogError::NetworkError { .. }
            | CatalogError::UrlError(_) => ErrorCategory::Network,
            CatalogError::CacheError(_) | CatalogError::CacheUnavailable { .. } => {
                ErrorCategory::Cache
            }
            CatalogError::IoError(_) => ErrorCategory::Io,
            CatalogError::ConfigError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 遠端 API 暫時失敗，稍後重試可能成功
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Cache | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::ApiError(e) if e.status().is_some_and(|s| s.as_u16() == 401) => {
                "Check that the API key is valid (--api-key or TMDB_API_KEY)"
            }
            CatalogError::ApiError(_) | CatalogError::NetworkError { .. } => {
                "Check network connectivity and the API base URL, then retry"
            }
            CatalogError::UrlError(_) => "Check the API base URL and resource paths",
            CatalogError::CacheError(_) | CatalogError::CacheUnavailable { .. } => {
                "Make sure the cache server is running and reachable at the configured address"
            }
            CatalogError::IoError(_) => "Check file paths and permissions",
            CatalogError::MissingConfigError { .. } => {
                "Add the missing table or key to the configuration file"
            }
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. } => {
                "Review the configuration file or command line arguments"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the movie API: {}", self),
            ErrorCategory::Cache => format!("Could not talk to the cache: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
        }
    }

    /// 依嚴重程度決定程序結束碼；0 表示僅為警告
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

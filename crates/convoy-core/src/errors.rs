use std::error::Error;

use convoy_config::ConfigError;

/// Base trait for all application errors
pub trait ConvoyError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type ConvoyResult<T> = Result<T, Box<dyn ConvoyError>>;

impl ConvoyError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::NoTargetSelected { .. } => "NO_TARGET_SELECTED",
            ConfigError::TargetNotFound { .. } => "TARGET_NOT_FOUND",
            ConfigError::InvalidTarget { .. } => "INVALID_TARGET",
            ConfigError::PathUnavailable { .. } => "CONFIG_PATH_UNAVAILABLE",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(
            self,
            ConfigError::PathUnavailable { .. } | ConfigError::IoError { .. }
        )
    }
}

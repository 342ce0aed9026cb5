#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file: {message}")]
    ConfigParseError { message: String },

    #[error("No target selected. Pass -t/--target or set default_target in {path}")]
    NoTargetSelected { path: String },

    #[error("Unknown target '{name}'. Known targets: {known}")]
    TargetNotFound { name: String, known: String },

    #[error("Invalid target '{name}': {message}")]
    InvalidTarget { name: String, message: String },

    #[error("Cannot locate config directory: {message}")]
    PathUnavailable { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

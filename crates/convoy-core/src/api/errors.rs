use reqwest::StatusCode;

use crate::errors::ConvoyError;

/// Failure talking to the orchestration service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not reach {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected Response\nStatus: {status}\nBody:\n{body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    #[error("not authorized for {url}; refresh the token for this target")]
    Unauthorized { url: String },

    #[error("forbidden: {url}")]
    Forbidden { url: String },

    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_status(status: StatusCode, url: &str, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized {
                url: url.to_string(),
            },
            StatusCode::FORBIDDEN => ApiError::Forbidden {
                url: url.to_string(),
            },
            StatusCode::NOT_FOUND => ApiError::NotFound {
                url: url.to_string(),
            },
            _ => ApiError::UnexpectedResponse { status, body },
        }
    }
}

impl ConvoyError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Connection { .. } => "CONNECTION_FAILED",
            ApiError::UnexpectedResponse { .. } => "UNEXPECTED_RESPONSE",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Decode { .. } => "DECODE_FAILED",
            ApiError::InvalidRequest { .. } => "INVALID_REQUEST",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } | ApiError::NotFound { .. }
        )
    }
}

/// Failure while consuming an open build event stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("event stream transport failed: {0}")]
    Transport(String),

    #[error("malformed event: {0}")]
    Decode(String),

    #[error("event stream ended before the build finished")]
    Ended,
}

impl ConvoyError for StreamError {
    fn error_code(&self) -> &'static str {
        match self {
            StreamError::Transport(_) => "STREAM_TRANSPORT_FAILED",
            StreamError::Decode(_) => "STREAM_DECODE_FAILED",
            StreamError::Ended => "STREAM_ENDED",
        }
    }
}

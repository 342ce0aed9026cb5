use crate::api::ApiError;
use crate::errors::ConvoyError;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("job '{pipeline}/{job}' has no builds")]
    NoBuilds { pipeline: String, job: String },

    #[error("failed to write output: {source}")]
    Output {
        #[from]
        source: std::io::Error,
    },
}

impl ConvoyError for BuildError {
    fn error_code(&self) -> &'static str {
        match self {
            BuildError::Api(e) => e.error_code(),
            BuildError::NoBuilds { .. } => "NO_BUILDS",
            BuildError::Output { .. } => "OUTPUT_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            BuildError::Api(e) => e.is_user_error(),
            BuildError::NoBuilds { .. } => true,
            BuildError::Output { .. } => false,
        }
    }
}

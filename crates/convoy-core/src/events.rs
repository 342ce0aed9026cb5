use tracing::{error, info, warn};

use crate::errors::ConvoyError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

/// Log an error at a level matching its cause.
pub fn log_app_error<E: ConvoyError + ?Sized>(error: &E) {
    if error.is_user_error() {
        warn!(
            event = "core.app.error_occurred",
            error_code = error.error_code(),
            user_error = true,
            error = %error
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error_code = error.error_code(),
            user_error = false,
            error = %error
        );
    }
}

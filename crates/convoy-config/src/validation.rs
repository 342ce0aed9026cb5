//! Target validation.
//!
//! Runs before any network call is attempted.

use crate::errors::ConfigError;
use crate::types::TargetConfig;

/// URL schemes the API client can talk to.
pub const VALID_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Validate a single target's settings.
///
/// # Validation Rules
///
/// - `api` must start with `http://` or `https://` and name a host
/// - `team` must not be empty
/// - `token`, if set, must not be empty
pub fn validate_target(name: &str, target: &TargetConfig) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidTarget {
        name: name.to_string(),
        message,
    };

    let Some(rest) = VALID_SCHEMES
        .iter()
        .find_map(|scheme| target.api.strip_prefix(scheme))
    else {
        return Err(invalid(format!(
            "api '{}' must start with {}",
            target.api,
            VALID_SCHEMES.join(" or ")
        )));
    };
    if rest.trim_matches('/').is_empty() {
        return Err(invalid(format!("api '{}' has no host", target.api)));
    }

    if target.team.trim().is_empty() {
        return Err(invalid("team must not be empty".to_string()));
    }

    if let Some(ref token) = target.token
        && token.trim().is_empty()
    {
        return Err(invalid(
            "token is set but empty; remove it or provide a value".to_string(),
        ));
    }

    Ok(())
}

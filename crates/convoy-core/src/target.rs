//! Session provider: the selected target, its default team and API client.

use convoy_config::{ConfigError, ResolvedTarget, TargetsConfig};
use tracing::info;

use crate::api::ApiClient;

/// A resolved target with a ready-to-use API client.
#[derive(Debug, Clone)]
pub struct Target {
    name: String,
    team: String,
    client: ApiClient,
}

impl Target {
    /// Load the target hierarchy and select `name`, or the configured default.
    pub fn load(name: Option<&str>) -> Result<Self, ConfigError> {
        let config = TargetsConfig::load_hierarchy()?;
        let resolved = config.resolve(name)?;
        Self::from_resolved(resolved)
    }

    pub fn from_resolved(resolved: ResolvedTarget) -> Result<Self, ConfigError> {
        let ResolvedTarget { name, config } = resolved;
        let client = ApiClient::new(&config.api, config.token.clone(), config.is_insecure())
            .map_err(|e| ConfigError::InvalidTarget {
                name: name.clone(),
                message: e.to_string(),
            })?;

        info!(
            event = "core.target.resolve_completed",
            target = %name,
            api = %config.api,
            team = %config.team
        );

        Ok(Self {
            name,
            team: config.team,
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Team used when a command is not given `--team`.
    pub fn default_team(&self) -> &str {
        &self.team
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

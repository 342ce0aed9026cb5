use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Team used when a target does not name one.
pub const DEFAULT_TEAM: &str = "main";

/// Contents of a `targets.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// Connection settings for one orchestration service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Base URL of the service, e.g. `https://ci.example.com`.
    pub api: String,
    #[serde(default = "default_team")]
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

fn default_team() -> String {
    DEFAULT_TEAM.to_string()
}

impl TargetConfig {
    pub fn new(api: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            team: default_team(),
            token: None,
            insecure: None,
        }
    }

    /// Whether TLS certificate verification is disabled for this target.
    pub fn is_insecure(&self) -> bool {
        self.insecure.unwrap_or(false)
    }
}

/// A target selected by name and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTarget {
    pub name: String,
    pub config: TargetConfig,
}

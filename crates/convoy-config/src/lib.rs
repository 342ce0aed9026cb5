//! # convoy-config
//!
//! TOML target configuration for convoy: which orchestration services exist,
//! how to reach them, and which team each one acts as by default.

mod loading;
mod validation;

pub mod errors;
pub mod types;

pub use errors::ConfigError;
pub use loading::{load_from, load_hierarchy, merge_configs};
pub use types::{DEFAULT_TEAM, ResolvedTarget, TargetConfig, TargetsConfig};
pub use validation::{VALID_SCHEMES, validate_target};

impl TargetsConfig {
    /// Load targets from the user/project hierarchy.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Pick a target by name (or the configured default) and validate it.
    pub fn resolve(&self, name: Option<&str>) -> Result<ResolvedTarget, ConfigError> {
        let name = match name.or(self.default_target.as_deref()) {
            Some(name) => name,
            None => {
                return Err(ConfigError::NoTargetSelected {
                    path: "~/.convoy/targets.toml".to_string(),
                });
            }
        };

        let config = self
            .targets
            .get(name)
            .ok_or_else(|| ConfigError::TargetNotFound {
                name: name.to_string(),
                known: self.known_targets(),
            })?;

        validate_target(name, config)?;

        Ok(ResolvedTarget {
            name: name.to_string(),
            config: config.clone(),
        })
    }

    fn known_targets(&self) -> String {
        if self.targets.is_empty() {
            "(none configured)".to_string()
        } else {
            self.targets.keys().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

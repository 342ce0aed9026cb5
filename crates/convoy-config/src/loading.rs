//! Target file loading and merging.
//!
//! Targets are loaded in the following order (later sources override earlier ones):
//! 1. **User targets** - `~/.convoy/targets.toml`
//! 2. **Project targets** - `./.convoy/targets.toml`
//! 3. **CLI arguments** - `-t/--target` picks the entry to use

use std::fs;
use std::path::Path;

use convoy_paths::ConvoyPaths;
use tracing::debug;

use crate::errors::ConfigError;
use crate::types::TargetsConfig;

/// Load and merge the user and project target files.
///
/// Missing files are not errors; unreadable or malformed files are.
pub fn load_hierarchy() -> Result<TargetsConfig, ConfigError> {
    let paths = ConvoyPaths::resolve().map_err(|e| ConfigError::PathUnavailable {
        message: e.to_string(),
    })?;
    let project_root = std::env::current_dir()?;
    load_from(
        &paths.user_targets(),
        Some(&ConvoyPaths::project_targets(&project_root)),
    )
}

/// Load targets from an explicit user file and optional project file.
pub fn load_from(user: &Path, project: Option<&Path>) -> Result<TargetsConfig, ConfigError> {
    let mut config = load_targets_file(user)?.unwrap_or_default();

    if let Some(project) = project
        && let Some(project_config) = load_targets_file(project)?
    {
        config = merge_configs(config, project_config);
    }

    Ok(config)
}

/// Read one targets file. `Ok(None)` when it does not exist.
fn load_targets_file(path: &Path) -> Result<Option<TargetsConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(event = "config.targets_file_missing", path = %path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let config: TargetsConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;

    debug!(
        event = "config.targets_file_loaded",
        path = %path.display(),
        targets = config.targets.len()
    );
    Ok(Some(config))
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Targets are merged by name; an overriding entry replaces the whole target.
pub fn merge_configs(base: TargetsConfig, override_config: TargetsConfig) -> TargetsConfig {
    let mut targets = base.targets;
    for (name, target) in override_config.targets {
        targets.insert(name, target);
    }
    TargetsConfig {
        default_target: override_config.default_target.or(base.default_target),
        targets,
    }
}

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("home directory not found; set $HOME environment variable")]
    HomeNotFound,
}

/// Centralized path construction for the `~/.convoy/` directory layout.
///
/// Use `resolve()` in production code and `from_dir()` in tests.
#[derive(Debug, Clone)]
pub struct ConvoyPaths {
    convoy_dir: PathBuf,
}

impl ConvoyPaths {
    /// Resolve paths from the user's home directory (`~/.convoy`).
    pub fn resolve() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeNotFound)?;
        Ok(Self {
            convoy_dir: home.join(".convoy"),
        })
    }

    /// Create paths from an explicit base directory. Use in tests.
    pub fn from_dir(convoy_dir: PathBuf) -> Self {
        Self { convoy_dir }
    }

    /// The base `~/.convoy` directory.
    pub fn convoy_dir(&self) -> &Path {
        &self.convoy_dir
    }

    /// User-level target definitions: `~/.convoy/targets.toml`.
    pub fn user_targets(&self) -> PathBuf {
        self.convoy_dir.join("targets.toml")
    }

    /// Project-level target overrides: `<project_root>/.convoy/targets.toml`.
    pub fn project_targets(project_root: &Path) -> PathBuf {
        project_root.join(".convoy").join("targets.toml")
    }
}

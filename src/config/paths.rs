//! Path resolution for quasar configuration and data files.
//!
//! All quasar data is stored in `~/.quasar/`:
//! - `config.yaml` - Main configuration file
//! - `quasar.db` - SQLite database holding the plan, goals, tasks and reflections

use std::path::PathBuf;

use crate::error::QuasarError;

/// Paths to quasar configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.quasar/`
    pub root: PathBuf,
    /// Config file: `~/.quasar/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.quasar/quasar.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, QuasarError> {
        let home = std::env::var("HOME").map_err(|_| {
            QuasarError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".quasar")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("quasar.db"),
            root,
        }
    }

    /// Resolve paths from an optional `--data-dir` override.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory cannot
    /// be determined.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self, QuasarError> {
        data_dir.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), QuasarError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                QuasarError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

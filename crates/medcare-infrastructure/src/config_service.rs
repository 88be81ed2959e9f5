//! Shell configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use medcare_core::config::ShellConfig;
use medcare_core::error::Result;

use crate::paths::MedcarePaths;

/// Loads `config.toml`, creating it with defaults when missing.
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    /// Creates a service reading the given config file path.
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Creates a service reading the default platform config path.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(MedcarePaths::config_file()?))
    }

    /// Loads the configuration.
    ///
    /// If the file doesn't exist it is created with the default contents,
    /// so users have a template to edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, written, or parsed.
    pub fn load_or_init(&self) -> Result<ShellConfig> {
        if !self.config_path.exists() {
            if let Some(parent) = self.config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let config = ShellConfig::default();
            fs::write(&self.config_path, toml::to_string_pretty(&config)?)?;
            tracing::info!(file = ?self.config_path, "wrote default configuration");
            return Ok(config);
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

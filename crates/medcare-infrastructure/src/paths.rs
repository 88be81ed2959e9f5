//! Unified path management for MedCare state files.
//!
//! Everything the shell persists lives under one application directory:
//!
//! ```text
//! ~/.config/medcare/           # Linux; platform equivalent elsewhere
//! ├── config.toml              # Shell configuration
//! ├── identity.json            # Persisted identity slot
//! └── patients/                # One TOML file per patient record
//!     └── PAT0001.toml
//! ```

use std::path::PathBuf;

use medcare_core::error::{MedcareError, Result};

/// Unified path resolution for the MedCare shell.
pub struct MedcarePaths;

impl MedcarePaths {
    /// Returns the application data directory.
    ///
    /// Uses the platform config directory (XDG on Linux) with `medcare`
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the platform config directory cannot
    /// be determined.
    pub fn base_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("medcare"))
            .ok_or_else(|| MedcareError::config("cannot determine config directory"))
    }

    /// Returns the path to the shell configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted identity slot.
    pub fn identity_file() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("identity.json"))
    }

    /// Returns the path to the patient records directory.
    pub fn patients_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("patients"))
    }
}

//! JSON file-backed SessionRepository implementation.
//!
//! The persisted identity slot is a single JSON file holding one
//! serialized [`Clinician`] record. No versioning, no migration: the file
//! either parses as the current shape or it is reported as malformed.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use medcare_core::clinician::Clinician;
use medcare_core::error::Result;
use medcare_core::session::SessionRepository;

use crate::paths::MedcarePaths;

/// Stores the identity slot as `identity.json` under a base directory.
pub struct JsonSessionRepository {
    slot_path: PathBuf,
}

impl JsonSessionRepository {
    /// Creates a repository rooted at `base_dir`.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;

        Ok(Self {
            slot_path: base_dir.join("identity.json"),
        })
    }

    /// Creates a repository at the default platform location.
    pub fn default_location() -> Result<Self> {
        Self::new(MedcarePaths::base_dir()?)
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn load(&self) -> Result<Option<Clinician>> {
        if !self.slot_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.slot_path)?;
        let clinician: Clinician = serde_json::from_str(&contents)?;
        Ok(Some(clinician))
    }

    async fn save(&self, clinician: &Clinician) -> Result<()> {
        let contents = serde_json::to_string_pretty(clinician)?;
        fs::write(&self.slot_path, contents)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.slot_path.exists() {
            fs::remove_file(&self.slot_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample(avatar: Option<&str>) -> Clinician {
        Clinician {
            id: "1".to_string(),
            username: "admin".to_string(),
            name: "Dr. Sarah Johnson".to_string(),
            avatar: avatar.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_empty_slot_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).unwrap();

        assert_eq!(repository.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).unwrap();

        let clinician = sample(Some("https://example.com/avatar.png"));
        repository.save(&clinician).await.unwrap();

        assert_eq!(repository.load().await.unwrap(), Some(clinician));
    }

    #[tokio::test]
    async fn test_round_trip_without_avatar() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).unwrap();

        let clinician = sample(None);
        repository.save(&clinician).await.unwrap();

        assert_eq!(repository.load().await.unwrap(), Some(clinician));
    }

    #[tokio::test]
    async fn test_malformed_slot_is_a_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).unwrap();

        fs::write(temp_dir.path().join("identity.json"), "{not json").unwrap();

        let err = repository.load().await.unwrap_err();
        assert!(err.is_serialization());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonSessionRepository::new(temp_dir.path()).unwrap();

        repository.save(&sample(None)).await.unwrap();
        repository.clear().await.unwrap();
        assert_eq!(repository.load().await.unwrap(), None);

        // Clearing an already-empty slot is fine.
        repository.clear().await.unwrap();
    }
}

//! TOML file-backed PatientRepository implementation.
//!
//! Stores one TOML file per patient record:
//!
//! ```text
//! base_dir/
//! └── patients/
//!     ├── PAT0001.toml
//!     └── PAT0002.toml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use medcare_core::error::Result;
use medcare_core::patient::{Patient, PatientRepository};

use crate::paths::MedcarePaths;

/// A repository keeping patient records as individual TOML files.
pub struct TomlPatientRepository {
    patients_dir: PathBuf,
}

impl TomlPatientRepository {
    /// Creates a repository rooted at `base_dir`.
    ///
    /// The `patients/` directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let patients_dir = base_dir.as_ref().join("patients");
        fs::create_dir_all(&patients_dir)?;

        Ok(Self { patients_dir })
    }

    /// Creates a repository at the default platform location.
    pub fn default_location() -> Result<Self> {
        let base_dir = MedcarePaths::base_dir()?;
        Self::new(base_dir)
    }

    fn patient_file_path(&self, patient_id: &str) -> PathBuf {
        self.patients_dir.join(format!("{}.toml", patient_id))
    }

    fn load_patient_from_path(&self, path: &Path) -> Result<Patient> {
        let contents = fs::read_to_string(path)?;
        let patient: Patient = toml::from_str(&contents)?;
        Ok(patient)
    }
}

#[async_trait]
impl PatientRepository for TomlPatientRepository {
    async fn find_by_id(&self, patient_id: &str) -> Result<Option<Patient>> {
        let file_path = self.patient_file_path(patient_id);

        if !file_path.exists() {
            return Ok(None);
        }

        self.load_patient_from_path(&file_path).map(Some)
    }

    async fn save(&self, patient: &Patient) -> Result<()> {
        let file_path = self.patient_file_path(&patient.id);
        let contents = toml::to_string_pretty(patient)?;
        fs::write(&file_path, contents)?;
        Ok(())
    }

    async fn delete(&self, patient_id: &str) -> Result<()> {
        let file_path = self.patient_file_path(patient_id);

        if file_path.exists() {
            fs::remove_file(&file_path)?;
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Patient>> {
        let mut patients = Vec::new();

        for entry in fs::read_dir(&self.patients_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }

            match self.load_patient_from_path(&path) {
                Ok(patient) => patients.push(patient),
                Err(e) => {
                    tracing::warn!(file = ?path, error = %e, "skipping unreadable patient record");
                }
            }
        }

        // Stable id order keeps pagination deterministic.
        patients.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(patients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcare_core::patient::{Gender, PatientStatus};
    use tempfile::TempDir;

    fn create_test_patient(id: &str, name: &str) -> Patient {
        Patient {
            id: id.to_string(),
            name: name.to_string(),
            age: 47,
            gender: Gender::Male,
            phone: "+1 (555) 030-4050".to_string(),
            email: "test.patient@email.com".to_string(),
            address: "7 Pine St, Phoenix".to_string(),
            last_visit: Some("2026-03-14".to_string()),
            condition: "Asthma".to_string(),
            status: PatientStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlPatientRepository::new(temp_dir.path()).unwrap();

        let patient = create_test_patient("PAT0001", "Jane Miller");
        repository.save(&patient).await.unwrap();

        let loaded = repository.find_by_id("PAT0001").await.unwrap();
        assert_eq!(loaded, Some(patient));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlPatientRepository::new(temp_dir.path()).unwrap();

        assert_eq!(repository.find_by_id("PAT9999").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlPatientRepository::new(temp_dir.path()).unwrap();

        repository
            .save(&create_test_patient("PAT0003", "Carol"))
            .await
            .unwrap();
        repository
            .save(&create_test_patient("PAT0001", "Alice"))
            .await
            .unwrap();
        repository
            .save(&create_test_patient("PAT0002", "Bob"))
            .await
            .unwrap();

        let patients = repository.list_all().await.unwrap();
        let ids: Vec<&str> = patients.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["PAT0001", "PAT0002", "PAT0003"]);
    }

    #[tokio::test]
    async fn test_list_all_skips_unreadable_records() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlPatientRepository::new(temp_dir.path()).unwrap();

        repository
            .save(&create_test_patient("PAT0001", "Alice"))
            .await
            .unwrap();
        fs::write(temp_dir.path().join("patients/broken.toml"), "not = [toml").unwrap();

        let patients = repository.list_all().await.unwrap();
        assert_eq!(patients.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlPatientRepository::new(temp_dir.path()).unwrap();

        repository
            .save(&create_test_patient("PAT0001", "Alice"))
            .await
            .unwrap();
        repository.delete("PAT0001").await.unwrap();

        assert_eq!(repository.find_by_id("PAT0001").await.unwrap(), None);

        // Deleting a missing record is fine.
        repository.delete("PAT0001").await.unwrap();
    }
}

//! Patient repository trait.

use super::model::Patient;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for patient records.
///
/// Decouples the roster service from the storage mechanism. Listing is
/// expected to return records in id order so pagination is stable.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Finds a patient by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Patient))`: patient found
    /// - `Ok(None)`: no such patient
    /// - `Err(_)`: error occurred during retrieval
    async fn find_by_id(&self, patient_id: &str) -> Result<Option<Patient>>;

    /// Saves a patient record, replacing any existing record with the same id.
    async fn save(&self, patient: &Patient) -> Result<()>;

    /// Deletes a patient record. Deleting a missing record is not an error.
    async fn delete(&self, patient_id: &str) -> Result<()>;

    /// Lists all patient records in id order.
    async fn list_all(&self) -> Result<Vec<Patient>>;
}

//! Session repository trait.
//!
//! Defines the interface for the persisted identity slot.

use crate::clinician::Clinician;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the single persisted identity slot.
///
/// The application holds at most one authenticated identity at a time, so
/// the slot is load/save/clear rather than a keyed collection. This trait
/// decouples the session store from the specific storage mechanism
/// (e.g. a JSON file, an OS keychain, a remote API).
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted identity, if any.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Clinician))`: a well-formed identity is stored
    /// - `Ok(None)`: the slot is empty
    /// - `Err(_)`: the slot exists but could not be read or parsed
    async fn load(&self) -> Result<Option<Clinician>>;

    /// Persists `clinician` as the slot contents, replacing any previous value.
    async fn save(&self, clinician: &Clinician) -> Result<()>;

    /// Empties the slot. Clearing an already-empty slot is not an error.
    async fn clear(&self) -> Result<()>;
}

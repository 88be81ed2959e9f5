//! Session lifecycle: hydrate, login, logout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use super::repository::SessionRepository;
use crate::clinician::{Clinician, CredentialValidator};
use crate::error::Result;

/// Holds the (at most one) authenticated identity and drives its lifecycle.
///
/// `SessionStore` is constructed explicitly at the composition root and
/// injected where needed; there is no ambient singleton. Responsibilities:
///
/// - Hydrating the session from the persisted identity slot at startup
/// - Validating credentials and establishing a new session on login
/// - Clearing the session and its persisted copy on logout
///
/// # Thread Safety
///
/// The current identity lives behind a `tokio::sync::RwLock`; the loading
/// flag is an `AtomicBool` so synchronous callers can poll it.
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
    validator: Arc<dyn CredentialValidator>,
    current: RwLock<Option<Clinician>>,
    /// True until hydration has completed (it flips to false exactly once).
    loading: AtomicBool,
    /// Simulated upstream latency applied to each login attempt.
    login_delay: Duration,
}

impl SessionStore {
    /// Creates a new store over the given slot repository and validator.
    ///
    /// # Arguments
    ///
    /// * `repository` - The persisted identity slot backend
    /// * `validator` - The credential validator used by [`login`](Self::login)
    /// * `login_delay` - Fixed delay simulating upstream auth latency
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        validator: Arc<dyn CredentialValidator>,
        login_delay: Duration,
    ) -> Self {
        Self {
            repository,
            validator,
            current: RwLock::new(None),
            loading: AtomicBool::new(true),
            login_delay,
        }
    }

    /// Attempts to restore a session from the persisted identity slot.
    ///
    /// Runs once at process start; repeated calls after completion are
    /// no-ops. A malformed slot is treated as "no session" (fail-safe)
    /// and logged, rather than failing startup. Whatever the outcome,
    /// the loading flag becomes false when hydration completes.
    ///
    /// # Errors
    ///
    /// Returns an error only for storage faults other than a malformed
    /// record (e.g. an unreadable file).
    pub async fn hydrate(&self) -> Result<()> {
        if !self.loading.load(Ordering::SeqCst) {
            return Ok(());
        }

        let result = match self.repository.load().await {
            Ok(Some(clinician)) => {
                tracing::info!(username = %clinician.username, "restored persisted session");
                *self.current.write().await = Some(clinician);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) if e.is_serialization() => {
                // Fail-safe: a record we cannot parse means no session.
                tracing::warn!(error = %e, "persisted identity is malformed; starting signed out");
                Ok(())
            }
            Err(e) => Err(e),
        };

        self.loading.store(false, Ordering::SeqCst);
        result
    }

    /// Attempts to establish a session with the given credentials.
    ///
    /// Sleeps for the configured login delay (simulated latency, no I/O),
    /// then validates the pair. On match the identity is persisted to the
    /// slot and adopted as the current session.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: credentials accepted, session established
    /// - `Ok(false)`: credentials rejected, session left unset
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the accepted identity fails; the
    /// in-memory session is not established in that case.
    pub async fn login(&self, username: &str, secret: &str) -> Result<bool> {
        tokio::time::sleep(self.login_delay).await;

        match self.validator.validate(username, secret) {
            Some(clinician) => {
                self.repository.save(&clinician).await?;
                tracing::info!(username = %clinician.username, "login accepted");
                *self.current.write().await = Some(clinician);
                Ok(true)
            }
            None => {
                tracing::debug!(username, "login rejected");
                Ok(false)
            }
        }
    }

    /// Clears the session and its persisted copy unconditionally.
    ///
    /// Idempotent: logging out while signed out is not an error.
    pub async fn logout(&self) -> Result<()> {
        *self.current.write().await = None;
        self.repository.clear().await
    }

    /// Returns a snapshot of the current identity, if any.
    pub async fn current(&self) -> Option<Clinician> {
        self.current.read().await.clone()
    }

    /// Whether a session is currently established.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Whether hydration is still pending.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinician::FixedCredentialValidator;
    use crate::error::MedcareError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory slot used in place of the file-backed repository.
    struct MemorySlot {
        stored: Mutex<Option<Clinician>>,
        /// When set, `load` returns this error instead of the contents.
        load_error: Option<MedcareError>,
    }

    impl MemorySlot {
        fn empty() -> Self {
            Self {
                stored: Mutex::new(None),
                load_error: None,
            }
        }

        fn holding(clinician: Clinician) -> Self {
            Self {
                stored: Mutex::new(Some(clinician)),
                load_error: None,
            }
        }

        fn failing(error: MedcareError) -> Self {
            Self {
                stored: Mutex::new(None),
                load_error: Some(error),
            }
        }
    }

    #[async_trait]
    impl SessionRepository for MemorySlot {
        async fn load(&self) -> Result<Option<Clinician>> {
            if let Some(e) = &self.load_error {
                return Err(e.clone());
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, clinician: &Clinician) -> Result<()> {
            *self.stored.lock().unwrap() = Some(clinician.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    fn store_with(slot: MemorySlot) -> SessionStore {
        SessionStore::new(
            Arc::new(slot),
            Arc::new(FixedCredentialValidator::default()),
            Duration::ZERO,
        )
    }

    fn sample() -> Clinician {
        Clinician {
            id: "1".to_string(),
            username: "admin".to_string(),
            name: "Dr. Sarah Johnson".to_string(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_hydrate_empty_slot() {
        let store = store_with(MemorySlot::empty());
        assert!(store.is_loading());

        store.hydrate().await.unwrap();

        assert!(!store.is_loading());
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_hydrate_restores_identity() {
        let store = store_with(MemorySlot::holding(sample()));
        store.hydrate().await.unwrap();

        assert!(!store.is_loading());
        assert_eq!(store.current().await.unwrap().username, "admin");
    }

    #[tokio::test]
    async fn test_hydrate_malformed_slot_is_fail_safe() {
        let store = store_with(MemorySlot::failing(MedcareError::Serialization {
            format: "JSON".to_string(),
            message: "unexpected token".to_string(),
        }));

        store.hydrate().await.unwrap();

        assert!(!store.is_loading());
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_hydrate_propagates_storage_fault_but_completes() {
        let store = store_with(MemorySlot::failing(MedcareError::io("disk on fire")));

        assert!(store.hydrate().await.is_err());
        // The loading flag still signals completion.
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_hydrate_runs_once() {
        let store = store_with(MemorySlot::empty());
        store.hydrate().await.unwrap();

        // A session established after hydration must survive a second call.
        store.login("admin", "password").await.unwrap();
        store.hydrate().await.unwrap();
        assert!(store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_login_accepted_pair() {
        let store = store_with(MemorySlot::empty());
        store.hydrate().await.unwrap();

        assert!(store.login("admin", "password").await.unwrap());
        let clinician = store.current().await.unwrap();
        assert_eq!(clinician.name, "Dr. Sarah Johnson");
    }

    #[tokio::test]
    async fn test_login_rejected_pair_leaves_session_unset() {
        let store = store_with(MemorySlot::empty());
        store.hydrate().await.unwrap();

        assert!(!store.login("admin", "hunter2").await.unwrap());
        assert!(!store.login("root", "password").await.unwrap());
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_login_persists_identity() {
        let slot = Arc::new(MemorySlot::empty());
        let store = SessionStore::new(
            slot.clone(),
            Arc::new(FixedCredentialValidator::default()),
            Duration::ZERO,
        );
        store.login("admin", "password").await.unwrap();

        assert!(slot.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_slot() {
        let slot = Arc::new(MemorySlot::empty());
        let store = SessionStore::new(
            slot.clone(),
            Arc::new(FixedCredentialValidator::default()),
            Duration::ZERO,
        );
        store.login("admin", "password").await.unwrap();

        store.logout().await.unwrap();
        assert!(store.current().await.is_none());
        assert!(slot.load().await.unwrap().is_none());

        // Idempotent.
        store.logout().await.unwrap();
        assert!(store.current().await.is_none());
    }
}

//! Credential validation.
//!
//! This module abstracts credential checking behind a trait so the session
//! store does not care where accepted credentials come from. The shipped
//! implementation validates against a single fixed pair; there is no retry,
//! lockout or rate-limiting policy.

use super::model::Clinician;

/// Avatar shown for the built-in clinician account.
const DEFAULT_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=100&h=100&fit=crop&crop=face";

/// Validates login credentials and produces the matching identity.
///
/// Implementations must be pure with respect to storage: validation
/// performs no I/O and no network calls.
pub trait CredentialValidator: Send + Sync {
    /// Checks `username` / `secret` against the accepted credentials.
    ///
    /// # Returns
    ///
    /// - `Some(Clinician)`: credentials accepted, with the identity to adopt
    /// - `None`: credentials rejected
    fn validate(&self, username: &str, secret: &str) -> Option<Clinician>;
}

/// Validator that accepts exactly one fixed username/secret pair.
///
/// The default instance accepts `admin` / `password` and yields the
/// built-in clinician identity.
#[derive(Debug, Clone)]
pub struct FixedCredentialValidator {
    username: String,
    secret: String,
    identity: Clinician,
}

impl FixedCredentialValidator {
    /// Creates a validator for a specific accepted pair and identity.
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
        identity: Clinician,
    ) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
            identity,
        }
    }
}

impl Default for FixedCredentialValidator {
    fn default() -> Self {
        Self::new(
            "admin",
            "password",
            Clinician {
                id: "1".to_string(),
                username: "admin".to_string(),
                name: "Dr. Sarah Johnson".to_string(),
                avatar: Some(DEFAULT_AVATAR_URL.to_string()),
            },
        )
    }
}

impl CredentialValidator for FixedCredentialValidator {
    fn validate(&self, username: &str, secret: &str) -> Option<Clinician> {
        if username == self.username && secret == self.secret {
            Some(self.identity.clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_fixed_pair() {
        let validator = FixedCredentialValidator::default();
        let identity = validator.validate("admin", "password").unwrap();
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.name, "Dr. Sarah Johnson");
        assert!(identity.avatar.is_some());
    }

    #[test]
    fn test_rejects_everything_else() {
        let validator = FixedCredentialValidator::default();
        assert!(validator.validate("admin", "wrong").is_none());
        assert!(validator.validate("someone", "password").is_none());
        assert!(validator.validate("", "").is_none());
    }

    #[test]
    fn test_custom_pair() {
        let identity = Clinician {
            id: "42".to_string(),
            username: "oncall".to_string(),
            name: "Dr. On Call".to_string(),
            avatar: None,
        };
        let validator = FixedCredentialValidator::new("oncall", "s3cret", identity);
        assert!(validator.validate("oncall", "s3cret").is_some());
        assert!(validator.validate("admin", "password").is_none());
    }
}

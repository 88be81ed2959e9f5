//! Clinician identity domain model.
//!
//! Represents the authenticated clinician: the opaque upstream id,
//! the login username, a display name and an optional avatar reference.

use serde::{Deserialize, Serialize};

/// The identity record of an authenticated clinician.
///
/// This is the "pure" domain model that the session layer operates on,
/// and also the exact shape persisted to the identity slot (a single
/// JSON record; no versioning, no migration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinician {
    /// Opaque upstream identifier
    pub id: String,
    /// Login username
    pub username: String,
    /// Human-readable display name (e.g. "Dr. Sarah Johnson")
    pub name: String,
    /// Optional avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Clinician {
    /// Returns the uppercase initials of the display name.
    ///
    /// Used as the avatar fallback when no avatar URL is set.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect::<String>()
            .to_uppercase()
    }
}

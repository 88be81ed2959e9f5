//! Page identifiers.

use crate::error::{MedcareError, Result};
use strum::{Display, EnumIter, EnumString};

/// The fixed set of pages the shell can display.
///
/// Identifiers round-trip through their kebab-case string form
/// (`Page::ExistingPatients` <-> `"existing-patients"`), which is the form
/// used by the sidebar menu and the navigation commands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Page {
    /// Metrics overview; the default landing page.
    #[default]
    Dashboard,
    ExistingPatients,
    EnrollPatients,
    Diagnosis,
    Flagged,
    Config,
}

impl Page {
    /// Resolves a page identifier string.
    ///
    /// Unknown identifiers are rejected with an explicit `NotFound` error;
    /// falling back to a default view is a render-layer decision, not a
    /// router one.
    pub fn parse(id: &str) -> Result<Page> {
        id.parse()
            .map_err(|_| MedcareError::not_found("page", id))
    }

    /// Human-readable page title.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::ExistingPatients => "Existing Patients",
            Page::EnrollPatients => "Enroll Patients",
            Page::Diagnosis => "Previous Diagnosis",
            Page::Flagged => "Flagged for Review",
            Page::Config => "Configurations",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_known_identifiers() {
        assert_eq!(Page::parse("dashboard").unwrap(), Page::Dashboard);
        assert_eq!(
            Page::parse("existing-patients").unwrap(),
            Page::ExistingPatients
        );
        assert_eq!(Page::parse("config").unwrap(), Page::Config);
    }

    #[test]
    fn test_parse_unknown_identifier_is_not_found() {
        let err = Page::parse("bogus-id").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_identifier_round_trip() {
        for page in Page::iter() {
            assert_eq!(Page::parse(&page.to_string()).unwrap(), page);
        }
    }

    #[test]
    fn test_default_is_dashboard() {
        assert_eq!(Page::default(), Page::Dashboard);
    }
}

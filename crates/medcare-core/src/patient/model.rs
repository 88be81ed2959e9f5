//! Patient record domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Patient sex as recorded on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
}

/// Whether the patient is actively under care.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum PatientStatus {
    #[default]
    Active,
    Inactive,
}

/// A patient record.
///
/// Persisted as one TOML file per patient. `last_visit` is an ISO 8601
/// date (`YYYY-MM-DD`); `None` until a first visit is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Human-facing identifier, `PAT` followed by a zero-padded sequence
    /// number (e.g. `PAT0042`)
    pub id: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Date of the most recent visit (ISO 8601 date)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<String>,
    /// Primary condition under treatment
    pub condition: String,
    #[serde(default)]
    pub status: PatientStatus,
}

impl Patient {
    /// Case-insensitive roster search: matches the id or the name.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.id.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }
}

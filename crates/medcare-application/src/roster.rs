//! Patient roster: search, pagination, enrollment.

use std::sync::Arc;

use medcare_core::error::{MedcareError, Result};
use medcare_core::patient::{Gender, Patient, PatientRepository, PatientStatus};

/// Default number of patients per roster page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// A roster request: optional search term plus a 1-based page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterQuery {
    /// Case-insensitive substring matched against patient id and name.
    /// Blank matches everything.
    pub search: String,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for RosterQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RosterQuery {
    /// Replaces the search term and resets to the first page.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page = 1;
        self
    }
}

/// One page of roster results.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterPage {
    pub patients: Vec<Patient>,
    /// The (clamped, 1-based) page these results are from.
    pub page: usize,
    /// Total pages for the current filter; zero when nothing matches.
    pub page_count: usize,
    /// Records matching the filter, across all pages.
    pub filtered: usize,
    /// Records in the store, ignoring the filter.
    pub total: usize,
}

/// Details for enrolling a new patient. The id and status are assigned
/// by the service.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub condition: String,
}

/// Use case layer over the patient repository.
pub struct PatientRosterService {
    repository: Arc<dyn PatientRepository>,
}

impl PatientRosterService {
    pub fn new(repository: Arc<dyn PatientRepository>) -> Self {
        Self { repository }
    }

    /// Runs a roster query: filter, then slice out the requested page.
    ///
    /// An out-of-range page yields an empty slice rather than an error.
    pub async fn query(&self, query: &RosterQuery) -> Result<RosterPage> {
        let all = self.repository.list_all().await?;
        let total = all.len();

        let search = query.search.trim();
        let filtered: Vec<Patient> = if search.is_empty() {
            all
        } else {
            all.into_iter().filter(|p| p.matches(search)).collect()
        };

        let page_size = query.page_size.max(1);
        let page = query.page.max(1);
        let page_count = filtered.len().div_ceil(page_size);
        let start = (page - 1).saturating_mul(page_size);

        let patients: Vec<Patient> = filtered
            .iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        Ok(RosterPage {
            patients,
            page,
            page_count,
            filtered: filtered.len(),
            total,
        })
    }

    /// Looks up a single patient record.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has the given id.
    pub async fn get(&self, patient_id: &str) -> Result<Patient> {
        self.repository
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| MedcareError::not_found("patient", patient_id))
    }

    /// Enrolls a new patient, assigning the next sequential `PAT####` id.
    pub async fn enroll(&self, enrollment: Enrollment) -> Result<Patient> {
        let next = self
            .repository
            .list_all()
            .await?
            .iter()
            .filter_map(|p| p.id.strip_prefix("PAT")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        let patient = Patient {
            id: format!("PAT{:04}", next),
            name: enrollment.name,
            age: enrollment.age,
            gender: enrollment.gender,
            phone: enrollment.phone,
            email: enrollment.email,
            address: enrollment.address,
            last_visit: None,
            condition: enrollment.condition,
            status: PatientStatus::Active,
        };

        self.repository.save(&patient).await?;
        tracing::info!(id = %patient.id, "patient enrolled");

        Ok(patient)
    }

    /// Records a visit for a patient: stamps `last_visit` with today's date.
    pub async fn record_visit(&self, patient_id: &str) -> Result<Patient> {
        let mut patient = self.get(patient_id).await?;
        patient.last_visit = Some(chrono::Local::now().format("%Y-%m-%d").to_string());
        self.repository.save(&patient).await?;
        Ok(patient)
    }
}

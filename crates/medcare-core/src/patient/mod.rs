//! Patient records: domain model and persistence seam.

pub mod model;
pub mod repository;

pub use model::{Gender, Patient, PatientStatus};
pub use repository::PatientRepository;

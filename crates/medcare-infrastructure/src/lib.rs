//! File-backed storage for the MedCare shell.
//!
//! Implements the persistence seams declared in `medcare-core`: the JSON
//! identity slot, the per-patient TOML store, and configuration loading,
//! all rooted under the unified application directory from [`paths`].

pub mod config_service;
pub mod json_session_repository;
pub mod paths;
pub mod toml_patient_repository;

pub use crate::config_service::ConfigService;
pub use crate::json_session_repository::JsonSessionRepository;
pub use crate::toml_patient_repository::TomlPatientRepository;

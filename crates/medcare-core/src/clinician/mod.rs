//! Clinician identity: domain model and credential validation.

pub mod model;
pub mod validator;

pub use model::Clinician;
pub use validator::{CredentialValidator, FixedCredentialValidator};

//! Application layer for the MedCare shell.
//!
//! This crate provides use case implementations that coordinate between
//! domain and infrastructure layers: the shell controller (login gate and
//! page routing) and the patient roster (search, pagination, enrollment).

pub mod roster;
pub mod shell;

pub use roster::{Enrollment, PatientRosterService, RosterPage, RosterQuery};
pub use shell::{ShellController, ShellView};

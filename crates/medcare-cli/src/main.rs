//! MedCare shell entry point.
//!
//! Composition root: constructs the file-backed repositories, the session
//! store and the use case services explicitly, then hands control to the
//! interactive shell loop. No ambient singletons; everything the shell
//! touches is built and injected here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use medcare_application::{PatientRosterService, ShellController};
use medcare_core::clinician::FixedCredentialValidator;
use medcare_core::session::SessionStore;
use medcare_infrastructure::paths::MedcarePaths;
use medcare_infrastructure::{ConfigService, JsonSessionRepository, TomlPatientRepository};
use tracing_subscriber::EnvFilter;

mod repl;

#[derive(Parser)]
#[command(name = "medcare")]
#[command(about = "MedCare - clinician dashboard shell", long_about = None)]
struct Cli {
    /// Override the application data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.data_dir {
        Some(dir) => dir,
        None => MedcarePaths::base_dir()?,
    };

    let config = ConfigService::new(base_dir.join("config.toml")).load_or_init()?;
    tracing::info!(dir = ?base_dir, "starting shell");

    let session_repository = Arc::new(JsonSessionRepository::new(&base_dir)?);
    let patient_repository = Arc::new(TomlPatientRepository::new(&base_dir)?);
    let validator = Arc::new(FixedCredentialValidator::default());

    let session = Arc::new(SessionStore::new(
        session_repository,
        validator,
        Duration::from_millis(config.login_delay_ms),
    ));

    let controller = ShellController::new(session);
    let roster = PatientRosterService::new(patient_repository);

    repl::run(controller, roster, config).await
}

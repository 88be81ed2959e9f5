//! Application shell configuration.

use serde::{Deserialize, Serialize};

fn default_login_delay_ms() -> u64 {
    1000
}

fn default_page_size() -> usize {
    9
}

/// Tunable shell behavior, loaded from `config.toml`.
///
/// Every field has a default so a missing or partial file behaves the
/// same as the shipped configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Fixed delay applied to login attempts to simulate upstream latency.
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
    /// Patients shown per roster page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: default_login_delay_ms(),
            page_size: default_page_size(),
        }
    }
}

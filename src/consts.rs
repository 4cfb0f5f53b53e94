//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Server used when neither the CLI nor the config names one.
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Fixed path of the evaluation endpoint, joined onto the server URL.
pub const ENDPOINT_PATH: &str = "/api/expr";

/// Shown in the output while a submission is in flight.
pub const RUNNING_PLACEHOLDER: &str = "Running...";

/// Environment variable that overrides the configured server.
pub const SERVER_ENV: &str = "EVALPAD_SERVER";

/// Default database path: `~/.evalpad/evalpad.db`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".evalpad").join("evalpad.db"))
}

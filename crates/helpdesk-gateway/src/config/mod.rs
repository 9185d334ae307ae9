//! Helpdesk config loading. Parsing is strict: unknown keys are rejected and
//! the result is validated before anything is seeded from it.

pub mod schema;

use std::fs;
use std::path::Path;

use helpdesk_core::error::{HelpdeskError, Result};

pub use schema::{HelpdeskConfig, ServerSection, UserSeed};

/// Read and validate a config file. Errors name the offending path.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<HelpdeskConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| {
        HelpdeskError::Internal(format!("cannot read helpdesk config {}: {e}", path.display()))
    })?;
    load_from_str(&raw).map_err(|e| match e {
        HelpdeskError::BadRequest(msg) => {
            HelpdeskError::BadRequest(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

pub fn load_from_str(s: &str) -> Result<HelpdeskConfig> {
    let cfg: HelpdeskConfig = serde_yaml::from_str(s)
        .map_err(|e| HelpdeskError::BadRequest(format!("invalid helpdesk config: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

use std::env;
use std::path::PathBuf;

use crate::config::format::MatchFormat;
use crate::errors::domain::DomainError;

pub const DEFAULT_SETS_VAR: &str = "COURTSIDE_DEFAULT_SETS";
pub const STORE_DIR_VAR: &str = "COURTSIDE_STORE_DIR";
const DEFAULT_STORE_DIR: &str = "./courtside-data";

/// Match format from the environment (defaults to best of three)
pub fn default_format() -> Result<MatchFormat, DomainError> {
    let Ok(raw) = env::var(DEFAULT_SETS_VAR) else {
        return Ok(MatchFormat::best_of_three());
    };
    let sets: u8 = raw.trim().parse().map_err(|_| {
        DomainError::config(format!(
            "{DEFAULT_SETS_VAR} must be a small positive integer, got '{raw}'"
        ))
    })?;
    MatchFormat::new(sets)
        .map_err(|e| DomainError::config(format!("{DEFAULT_SETS_VAR}={sets} is not usable: {e}")))
}

/// Directory for file-backed match snapshots (defaults to ./courtside-data)
pub fn store_dir() -> PathBuf {
    env::var(STORE_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_DIR))
}

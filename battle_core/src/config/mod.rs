//! Scoring configuration loaded from TOML
//!
//! Nothing here is global. Build a [`ScoringConstants`] and a
//! [`LeagueTable`] once (defaults or from disk) and pass references into the
//! scoring functions.

mod constants;
mod leagues;

pub use constants::{PveDefaults, PvpDefaults, ScoringConstants};
pub use leagues::{BaitModel, LeagueConfig, LeagueTable};

use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Error loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Read and deserialize a TOML file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Deserialize a TOML string
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}

//! dex_core - Reference data for battle scoring
//!
//! This library provides:
//! - PokemonType: the eighteen elemental types
//! - Species / SpeciesRepository: base stats with an alias-aware lookup index
//! - MoveBook: fast and charge move records for both combat modes
//! - normalize_name: the slug form used by every lookup
//!
//! Repositories are plain values. Load them once at startup and pass a
//! reference to whatever needs them.

pub mod moves;
pub mod names;
pub mod species;
pub mod types;

pub use moves::{ChargeMoveRecord, FastMoveRecord, MoveBook};
pub use names::normalize_name;
pub use species::{BaseStats, Species, SpeciesRepository};
pub use types::PokemonType;

use std::path::PathBuf;
use thiserror::Error;

/// Error loading or querying reference data
#[derive(Debug, Error)]
pub enum DexError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: serde_json::Error,
        path: Option<PathBuf>,
    },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),
    #[error("Unknown move: {0}")]
    UnknownMove(String),
}

/// Read a JSON document from disk, tagging errors with the path
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, DexError> {
    let content = std::fs::read_to_string(path).map_err(|e| DexError::Io {
        error: e,
        path: Some(path.to_path_buf()),
    })?;
    serde_json::from_str(&content).map_err(|e| DexError::Parse {
        error: e,
        path: Some(path.to_path_buf()),
    })
}

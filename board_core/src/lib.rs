//! board_core - Scoreboards built on top of battle_core
//!
//! This library provides:
//! - RaidEntry: a validated scoreboard row with display helpers
//! - The raid score heuristic and priority tiers
//! - RaidBoard: entries ranked by raid score
//! - EntryRegistry: raid entries loaded from TOML files
//! - Learnsets plus parallel PvE/PvP ranking over a species repository

mod board;
mod config;
mod entry;
mod learnsets;
mod ranking;
mod registry;
mod scoring;

pub use board::{PriorityTier, RaidBoard, RankedRow};
pub use config::{EntryConfig, EntryFileConfig};
pub use entry::{RaidEntry, ScoreboardRow, HEADERS};
pub use learnsets::{Learnset, Learnsets};
pub use ranking::{
    rank_pve, rank_pvp, BoardInputs, IvMode, PveRankOptions, PveRanking, PvpRankOptions,
    PvpRanking,
};
pub use registry::EntryRegistry;
pub use scoring::{iv_bonus, raid_score, RaidBonuses, SCORE_MAX, SCORE_MIN};

use battle_core::BattleError;
use dex_core::DexError;
use std::path::PathBuf;
use thiserror::Error;

/// Error loading entry configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// A raid entry that fails validation
#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("entry name must be non-empty")]
    EmptyName,
    #[error("invalid IVs: {0}")]
    InvalidIvs(String),
    #[error("base score must lie within [1, 100] (got {0})")]
    BaseOutOfRange(f64),
}

/// Error producing a ranked board
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Dex(#[from] DexError),
    #[error(transparent)]
    Battle(#[from] BattleError),
    #[error("Unknown move '{name}' in learnset for {species}")]
    UnknownMove { species: String, name: String },
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
}

//! Domain errors raised by the scoring core

use thiserror::Error;

use crate::config::ConfigError;

/// Every way a scoring request can be rejected
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("{field} must be {requirement} (got {value})")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("level {0} is outside the multiplier table or off the half-level grid")]
    InvalidLevel(f64),
    #[error("observed CP {cp} is inconsistent with the provided base stats and IVs")]
    InconsistentCp { cp: u32 },
    #[error("observed CP {cp} matches {candidates} levels; provide observed HP to disambiguate")]
    AmbiguousLevel { cp: u32, candidates: usize },
    #[error("observed HP {hp} does not match any level producing CP {cp}")]
    HpMismatch { cp: u32, hp: u32 },
    #[error("unknown league '{name}' (available: {available})")]
    UnknownLeague { name: String, available: String },
    #[error("at least one charge move is required")]
    MissingChargeMove,
    #[error("move '{0}' has no trainer-battle data")]
    MissingPvpData(String),
    #[error("invalid shield weights: {0}")]
    InvalidShieldWeights(String),
    #[error("no feasible rotation exists for the supplied moves")]
    NoFeasibleRotation,
    #[error("no IV spread fits under CP cap {cap}")]
    NoFeasibleIvs { cap: u32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type BattleResult<T> = Result<T, BattleError>;

/// Require `value > 0`
pub fn ensure_positive(field: &'static str, value: f64) -> BattleResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(BattleError::OutOfRange {
            field,
            requirement: "positive",
            value,
        })
    }
}

/// Require `value >= 0`
pub fn ensure_non_negative(field: &'static str, value: f64) -> BattleResult<f64> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(BattleError::OutOfRange {
            field,
            requirement: "non-negative",
            value,
        })
    }
}

/// Require `0 < value < 1`
pub fn ensure_open_unit(field: &'static str, value: f64) -> BattleResult<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(BattleError::OutOfRange {
            field,
            requirement: "strictly between 0 and 1",
            value,
        })
    }
}

/// Require `0 <= value <= 1`
pub fn ensure_probability(field: &'static str, value: f64) -> BattleResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(BattleError::OutOfRange {
            field,
            requirement: "within [0, 1]",
            value,
        })
    }
}

/// Require `0 <= value < 1`
pub fn ensure_dodge(field: &'static str, value: f64) -> BattleResult<f64> {
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(BattleError::OutOfRange {
            field,
            requirement: "within [0, 1)",
            value,
        })
    }
}

//! Recover a level from an observed CP

use dex_core::BaseStats;
use serde::{Deserialize, Serialize};

use super::cpm::{level_grid, MAX_POWER_UP_LEVEL};
use super::transform::{effective_cpm, PreMultiplierStats};
use crate::error::{BattleError, BattleResult};
use crate::types::{IvSpread, StatModifiers};

/// A resolved level and the multiplier applied to stats at that level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelInference {
    /// Power-up level, without the best-buddy offset
    pub level: f64,
    /// Multiplier actually applied, including the best-buddy offset
    pub cpm: f64,
}

struct Candidate {
    level: f64,
    cpm: f64,
    hp: u32,
}

/// Find the unique level in 1.0..=50.0 whose CP equals `observed_cp`.
///
/// CP collisions between adjacent levels are resolved with `observed_hp`
/// when given. Negative observations are rejected before any search.
pub fn infer_level(
    base: &BaseStats,
    ivs: IvSpread,
    observed_cp: i64,
    modifiers: StatModifiers,
    observed_hp: Option<i64>,
) -> BattleResult<LevelInference> {
    if observed_cp < 0 {
        return Err(BattleError::OutOfRange {
            field: "observed CP",
            requirement: "non-negative",
            value: observed_cp as f64,
        });
    }
    if let Some(hp) = observed_hp.filter(|hp| *hp < 0) {
        return Err(BattleError::OutOfRange {
            field: "observed HP",
            requirement: "non-negative",
            value: hp as f64,
        });
    }
    let cp = u32::try_from(observed_cp).map_err(|_| BattleError::OutOfRange {
        field: "observed CP",
        requirement: "representable as u32",
        value: observed_cp as f64,
    })?;

    let pre = PreMultiplierStats::new(base, ivs, modifiers);
    let mut candidates = Vec::new();
    for level in level_grid(MAX_POWER_UP_LEVEL) {
        let multiplier = effective_cpm(level, modifiers)?;
        if pre.combat_power_at(multiplier) == cp {
            candidates.push(Candidate {
                level,
                cpm: multiplier,
                hp: pre.hp_at(multiplier),
            });
        }
    }

    match candidates.as_slice() {
        [] => Err(BattleError::InconsistentCp { cp }),
        [only] => Ok(LevelInference {
            level: only.level,
            cpm: only.cpm,
        }),
        many => {
            tracing::debug!(
                cp,
                candidates = many.len(),
                "CP collision across levels"
            );
            let Some(hp) = observed_hp else {
                return Err(BattleError::AmbiguousLevel {
                    cp,
                    candidates: many.len(),
                });
            };
            let matching: Vec<&Candidate> =
                many.iter().filter(|c| i64::from(c.hp) == hp).collect();
            match matching.as_slice() {
                [] => Err(BattleError::HpMismatch {
                    cp,
                    hp: u32::try_from(hp).unwrap_or(u32::MAX),
                }),
                [only] => Ok(LevelInference {
                    level: only.level,
                    cpm: only.cpm,
                }),
                rest => Err(BattleError::AmbiguousLevel {
                    cp,
                    candidates: rest.len(),
                }),
            }
        }
    }
}

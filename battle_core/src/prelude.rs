//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Core types
pub use crate::error::{BattleError, BattleResult};
pub use crate::types::{CombatStats, IvSpread, StatModifiers};

// Stats
pub use crate::stats::{combat_power, combat_stats, cpm, infer_level, LevelInference};

// Damage
pub use crate::damage::{breakpoints, damage_per_hit, HitBonuses};

// Raids
pub use crate::pve::{
    best_rotation, compute_pve_score, ChargeMove, FastMove, PveParams, PveScore, Rotation,
};

// Trainer battles
pub use crate::pvp::{
    compute_pvp_score, optimize_ivs, IvSearch, PvpChargeMove, PvpFastMove, PvpParams, PvpScore,
};

// Config
pub use crate::config::{LeagueTable, ScoringConstants};

// Re-exports from dex_core
pub use dex_core::{BaseStats, PokemonType};

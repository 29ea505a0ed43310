//! battle_core - Battle-effectiveness scoring for raid and trainer battles
//!
//! This library provides:
//! - Stat transform: base stats + IVs + level into combat stats and CP
//! - Level inference from an observed CP (and optionally HP)
//! - The single-hit damage formula and breakpoint analysis
//! - PvE: rotation search under the energy constraint and raid value
//! - PvP: move pressure, stat product, league scoring and the IV optimizer
//!
//! Every scoring function is pure. Configuration ([`ScoringConstants`],
//! [`LeagueTable`]) is built once and passed in by reference.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use battle_core::prelude::*;
//!
//! let base = BaseStats::new(256, 188, 216);
//! let ivs = IvSpread::perfect();
//! let level = infer_level(&base, ivs, 3325, StatModifiers::default(), None)?.level;
//! let stats = combat_stats(&base, ivs, level, StatModifiers::default())?;
//!
//! let fast = FastMove::new("Snarl", 12.0, 13.0, 1.0, HitBonuses::stab())?;
//! let swing = ChargeMove::new("Brutal Swing", 65.0, 40.0, 1.9, HitBonuses::stab())?;
//! let raid = compute_pve_score(&stats, &fast, &[swing], &PveParams::new(180.0, 35.0))?;
//! println!("raid value {:.2}", raid.value);
//! ```

pub mod config;
pub mod damage;
pub mod error;
pub mod prelude;
pub mod pve;
pub mod pvp;
pub mod stats;
pub mod types;

// Core API
pub use error::{BattleError, BattleResult};
pub use types::{CombatStats, IvSpread, StatModifiers, MAX_IV};

// Configuration
pub use config::{ConfigError, LeagueConfig, LeagueTable, ScoringConstants};

// Reference data from dex_core
pub use dex_core::{BaseStats, PokemonType};

use dex_core::BaseStats;

use super::cpm::cpm;
use super::FLOOR_EPSILON;
use crate::error::BattleResult;
use crate::types::{CombatStats, IvSpread, StatModifiers};

const SHADOW_ATTACK_MULTIPLIER: f64 = 1.2;
const SHADOW_DEFENSE_MULTIPLIER: f64 = 0.83;

/// Base + IV stats before the level multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreMultiplierStats {
    pub attack: f64,
    pub defense: f64,
    pub stamina: f64,
}

impl PreMultiplierStats {
    pub fn new(base: &BaseStats, ivs: IvSpread, modifiers: StatModifiers) -> Self {
        let (attack_mult, defense_mult) = if modifiers.shadow {
            (SHADOW_ATTACK_MULTIPLIER, SHADOW_DEFENSE_MULTIPLIER)
        } else {
            (1.0, 1.0)
        };
        PreMultiplierStats {
            attack: f64::from(base.attack + u32::from(ivs.attack)) * attack_mult,
            defense: f64::from(base.defense + u32::from(ivs.defense)) * defense_mult,
            stamina: f64::from(base.stamina + u32::from(ivs.stamina)),
        }
    }

    /// `floor(A * sqrt(D) * sqrt(S) * M^2 / 10)`
    pub fn combat_power_at(&self, multiplier: f64) -> u32 {
        let raw = self.attack * self.defense.sqrt() * self.stamina.sqrt() * multiplier.powi(2)
            / 10.0;
        (raw + FLOOR_EPSILON).floor() as u32
    }

    /// HP as displayed in game
    pub fn hp_at(&self, multiplier: f64) -> u32 {
        (self.stamina * multiplier + FLOOR_EPSILON).floor() as u32
    }

    pub fn combat_stats_at(&self, multiplier: f64) -> CombatStats {
        CombatStats {
            attack: self.attack * multiplier,
            defense: self.defense * multiplier,
            hp: self.hp_at(multiplier),
        }
    }
}

/// The multiplier actually applied at `level`, including the best-buddy offset
pub fn effective_cpm(level: f64, modifiers: StatModifiers) -> BattleResult<f64> {
    let offset = if modifiers.best_buddy { 1.0 } else { 0.0 };
    cpm(level + offset)
}

/// Effective attack, defense and HP
pub fn combat_stats(
    base: &BaseStats,
    ivs: IvSpread,
    level: f64,
    modifiers: StatModifiers,
) -> BattleResult<CombatStats> {
    let multiplier = effective_cpm(level, modifiers)?;
    Ok(PreMultiplierStats::new(base, ivs, modifiers).combat_stats_at(multiplier))
}

/// Combat power at `level`
pub fn combat_power(
    base: &BaseStats,
    ivs: IvSpread,
    level: f64,
    modifiers: StatModifiers,
) -> BattleResult<u32> {
    let multiplier = effective_cpm(level, modifiers)?;
    Ok(PreMultiplierStats::new(base, ivs, modifiers).combat_power_at(multiplier))
}

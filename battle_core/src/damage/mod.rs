//! Single-hit damage and breakpoint analysis

mod breakpoints;

pub use breakpoints::{breakpoints, breakpoints_between, Breakpoint};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, BattleResult};
use crate::stats::FLOOR_EPSILON;

/// Same-type attack bonus
pub const STAB_MULTIPLIER: f64 = 1.2;
/// Weather boost
pub const WEATHER_MULTIPLIER: f64 = 1.2;

/// Situational multipliers for one move execution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitBonuses {
    pub stab: bool,
    pub weather_boosted: bool,
    pub type_effectiveness: f64,
}

impl Default for HitBonuses {
    fn default() -> Self {
        HitBonuses {
            stab: false,
            weather_boosted: false,
            type_effectiveness: 1.0,
        }
    }
}

impl HitBonuses {
    pub fn stab() -> Self {
        HitBonuses {
            stab: true,
            ..Self::default()
        }
    }

    /// Combined multiplier: stab x weather x effectiveness
    pub fn multiplier(&self) -> f64 {
        let mut multiplier = self.type_effectiveness;
        if self.stab {
            multiplier *= STAB_MULTIPLIER;
        }
        if self.weather_boosted {
            multiplier *= WEATHER_MULTIPLIER;
        }
        multiplier
    }
}

/// `floor(0.5 * power * attack / defense * multiplier) + 1`
///
/// The `+1` applies even at zero power.
pub fn damage_per_hit(
    power: f64,
    attacker_attack: f64,
    defender_defense: f64,
    bonuses: HitBonuses,
) -> BattleResult<u32> {
    ensure_positive("defender defense", defender_defense)?;
    ensure_positive("type effectiveness", bonuses.type_effectiveness)?;
    ensure_non_negative("move power", power)?;
    ensure_non_negative("attacker attack", attacker_attack)?;
    Ok(raw_damage(power, attacker_attack, defender_defense, bonuses.multiplier()))
}

/// Unchecked form for callers that validated their inputs up front
pub(crate) fn raw_damage(power: f64, attack: f64, defense: f64, multiplier: f64) -> u32 {
    let raw = 0.5 * power * (attack / defense) * multiplier;
    (raw + FLOOR_EPSILON).floor() as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BattleError;

    #[test]
    fn test_full_multipliers() {
        let attack = 213.0 * 0.79030001;
        let bonuses = HitBonuses {
            stab: true,
            weather_boosted: true,
            type_effectiveness: 1.6,
        };
        let damage = damage_per_hit(100.0, attack, 200.0, bonuses).unwrap();
        let expected = (0.5 * 100.0 * (attack / 200.0) * (1.2 * 1.2 * 1.6)).floor() as u32 + 1;
        assert_eq!(damage, expected);
    }

    #[test]
    fn test_zero_power_still_deals_one() {
        let damage = damage_per_hit(0.0, 300.0, 100.0, HitBonuses::default()).unwrap();
        assert_eq!(damage, 1);
    }

    #[test]
    fn test_hydreigon_moves_against_180_defense() {
        let attack = 203.9895824957;
        assert_eq!(damage_per_hit(12.0, attack, 180.0, HitBonuses::stab()).unwrap(), 9);
        assert_eq!(damage_per_hit(65.0, attack, 180.0, HitBonuses::stab()).unwrap(), 45);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            damage_per_hit(50.0, 200.0, 0.0, HitBonuses::default()),
            Err(BattleError::OutOfRange { field: "defender defense", .. })
        ));
        let resisted = HitBonuses {
            type_effectiveness: 0.0,
            ..HitBonuses::default()
        };
        assert!(damage_per_hit(50.0, 200.0, 100.0, resisted).is_err());
        assert!(damage_per_hit(-1.0, 200.0, 100.0, HitBonuses::default()).is_err());
    }
}

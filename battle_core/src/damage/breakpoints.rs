use serde::{Deserialize, Serialize};

use super::{damage_per_hit, raw_damage, HitBonuses};
use crate::error::{ensure_non_negative, BattleResult};

/// The smallest attack stat at which a move reaches `damage`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub damage: u32,
    pub min_attack: f64,
}

/// Damage steps a move gains as attacker attack grows from `from_attack` to `to_attack`
pub fn breakpoints(
    power: f64,
    defender_defense: f64,
    bonuses: HitBonuses,
    from_attack: f64,
    to_attack: f64,
) -> BattleResult<Vec<Breakpoint>> {
    ensure_non_negative("attack range", to_attack - from_attack)?;
    let start = damage_per_hit(power, from_attack, defender_defense, bonuses)?;
    let end = damage_per_hit(power, to_attack, defender_defense, bonuses)?;
    if end <= start {
        return Ok(Vec::new());
    }

    // damage = floor(k * attack) + 1, so damage d first appears at attack = (d - 1) / k
    let multiplier = bonuses.multiplier();
    let per_attack = 0.5 * power * multiplier / defender_defense;
    let mut steps = Vec::with_capacity((end - start) as usize);
    for damage in (start + 1)..=end {
        let mut min_attack = f64::from(damage - 1) / per_attack;
        // Rounding can leave the closed-form threshold a hair short
        while raw_damage(power, min_attack, defender_defense, multiplier) < damage {
            min_attack += min_attack.abs().max(1.0) * 1e-12;
        }
        steps.push(Breakpoint { damage, min_attack });
    }
    Ok(steps)
}

/// How many damage steps lie between two attack values
pub fn breakpoints_between(
    power: f64,
    defender_defense: f64,
    bonuses: HitBonuses,
    from_attack: f64,
    to_attack: f64,
) -> BattleResult<u32> {
    let start = damage_per_hit(power, from_attack, defender_defense, bonuses)?;
    let end = damage_per_hit(power, to_attack, defender_defense, bonuses)?;
    Ok(end.saturating_sub(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_match_damage_formula() {
        let bonuses = HitBonuses::stab();
        let steps = breakpoints(12.0, 180.0, bonuses, 150.0, 260.0).unwrap();
        assert!(!steps.is_empty());
        for step in &steps {
            let at = damage_per_hit(12.0, step.min_attack, 180.0, bonuses).unwrap();
            assert_eq!(at, step.damage);
            let below = damage_per_hit(12.0, step.min_attack - 1e-6, 180.0, bonuses).unwrap();
            assert_eq!(below, step.damage - 1);
        }
        assert_eq!(
            steps.len() as u32,
            breakpoints_between(12.0, 180.0, bonuses, 150.0, 260.0).unwrap()
        );
    }

    #[test]
    fn test_zero_power_has_no_breakpoints() {
        let steps = breakpoints(0.0, 180.0, HitBonuses::default(), 100.0, 300.0).unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(breakpoints(12.0, 180.0, HitBonuses::default(), 200.0, 100.0).is_err());
    }
}

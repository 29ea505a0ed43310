//! Closed-form move pressure

use serde::{Deserialize, Serialize};

use super::moves::{PvpChargeMove, PvpFastMove};
use crate::error::{ensure_non_negative, ensure_probability, BattleError, BattleResult};

/// Default weight of fast-move energy generation
pub const FAST_MOVE_ENERGY_WEIGHT: f64 = 0.35;
/// Default flat credit for charge moves that buff or debuff
pub const BUFF_WEIGHT: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureWeights {
    pub energy_weight: f64,
    pub buff_weight: f64,
}

impl Default for PressureWeights {
    fn default() -> Self {
        PressureWeights {
            energy_weight: FAST_MOVE_ENERGY_WEIGHT,
            buff_weight: BUFF_WEIGHT,
        }
    }
}

impl PressureWeights {
    pub fn validate(&self) -> BattleResult<()> {
        ensure_non_negative("energy weight", self.energy_weight)?;
        ensure_non_negative("buff weight", self.buff_weight)?;
        Ok(())
    }
}

/// `damage/s + energy_weight * energy/s`
pub fn fast_move_pressure(fast: &PvpFastMove, energy_weight: f64) -> BattleResult<f64> {
    ensure_non_negative("energy weight", energy_weight)?;
    fast.validate()?;
    Ok(fast.damage_per_second() + energy_weight * fast.energy_per_second())
}

/// `reliability * (damage + buff_weight if the move buffs)`
pub fn charge_move_pressure(charge: &PvpChargeMove, buff_weight: f64) -> BattleResult<f64> {
    ensure_non_negative("buff weight", buff_weight)?;
    charge.validate()?;
    let buff = if charge.has_buff { buff_weight } else { 0.0 };
    Ok(charge.effective_reliability() * (charge.damage + buff))
}

/// Bait blend: `p * high + (1 - p) * low`
pub fn pair_charge_pressure(
    high: &PvpChargeMove,
    low: &PvpChargeMove,
    bait_probability: f64,
    buff_weight: f64,
) -> BattleResult<f64> {
    ensure_probability("bait probability", bait_probability)?;
    let high = charge_move_pressure(high, buff_weight)?;
    let low = charge_move_pressure(low, buff_weight)?;
    Ok(bait_probability * high + (1.0 - bait_probability) * low)
}

/// Fast pressure plus the better of the best single charge move and the
/// cheapest/most-expensive bait pair
pub fn move_pressure(
    fast: &PvpFastMove,
    charges: &[PvpChargeMove],
    bait_probability: f64,
    weights: &PressureWeights,
) -> BattleResult<f64> {
    if charges.is_empty() {
        return Err(BattleError::MissingChargeMove);
    }
    weights.validate()?;
    ensure_probability("bait probability", bait_probability)?;

    let fast_component = fast_move_pressure(fast, weights.energy_weight)?;
    let mut best_charge = f64::NEG_INFINITY;
    for charge in charges {
        best_charge = best_charge.max(charge_move_pressure(charge, weights.buff_weight)?);
    }

    if let [first, .., _] = charges {
        let mut low = first;
        let mut high = first;
        for charge in charges {
            if charge.energy_cost < low.energy_cost {
                low = charge;
            }
            if charge.energy_cost >= high.energy_cost {
                high = charge;
            }
        }
        let pair = pair_charge_pressure(high, low, bait_probability, weights.buff_weight)?;
        best_charge = best_charge.max(pair);
    }

    Ok(fast_component + best_charge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_and_charge_pressure() {
        let fast = PvpFastMove::new("Shadow Claw", 3.0, 9.0, 3).unwrap();
        let expected = 3.0 / 1.5 + FAST_MOVE_ENERGY_WEIGHT * (9.0 / 1.5);
        assert!((fast_move_pressure(&fast, FAST_MOVE_ENERGY_WEIGHT).unwrap() - expected).abs() < 1e-12);

        let heavy = PvpChargeMove::new("Shadow Ball", 110.0, 55.0).unwrap();
        let bait = PvpChargeMove::new("Shadow Punch", 40.0, 35.0).unwrap();
        let heavy_p = charge_move_pressure(&heavy, BUFF_WEIGHT).unwrap();
        let bait_p = charge_move_pressure(&bait, BUFF_WEIGHT).unwrap();
        assert!((heavy_p - 2.0).abs() < 1e-12);
        assert!((bait_p - 40.0 / 35.0).abs() < 1e-12);

        let pair = pair_charge_pressure(&heavy, &bait, 0.6, BUFF_WEIGHT).unwrap();
        assert!((pair - (0.6 * heavy_p + 0.4 * bait_p)).abs() < 1e-12);
    }

    #[test]
    fn test_buff_credit() {
        let plain = PvpChargeMove::new("Frenzy Plant", 100.0, 45.0).unwrap();
        let buffed = plain.clone().with_buff(true);
        let diff = charge_move_pressure(&buffed, BUFF_WEIGHT).unwrap()
            - charge_move_pressure(&plain, BUFF_WEIGHT).unwrap();
        assert!((diff - BUFF_WEIGHT / 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_move_pressure_takes_best_of_single_and_pair() {
        let fast = PvpFastMove::new("Counter", 4.0, 8.0, 2).unwrap();
        let nuke = PvpChargeMove::new("Focus Blast", 150.0, 75.0).unwrap();
        let bait = PvpChargeMove::new("Rock Slide", 70.0, 40.0).unwrap();
        let weights = PressureWeights::default();

        let fast_p = fast_move_pressure(&fast, weights.energy_weight).unwrap();
        let single = charge_move_pressure(&nuke, weights.buff_weight)
            .unwrap()
            .max(charge_move_pressure(&bait, weights.buff_weight).unwrap());
        let pair = pair_charge_pressure(&nuke, &bait, 0.5, weights.buff_weight).unwrap();
        let expected = fast_p + single.max(pair);

        // Order of the input list does not matter
        let forward = move_pressure(&fast, &[nuke.clone(), bait.clone()], 0.5, &weights).unwrap();
        let reversed = move_pressure(&fast, &[bait, nuke], 0.5, &weights).unwrap();
        assert!((forward - expected).abs() < 1e-12);
        assert!((reversed - expected).abs() < 1e-12);
    }

    #[test]
    fn test_hydreigon_move_pressure() {
        let fast = PvpFastMove::new("Snarl", 5.0, 13.0, 4).unwrap();
        let swing = PvpChargeMove::new("Brutal Swing", 65.0, 40.0).unwrap();
        let mp = move_pressure(&fast, &[swing], 0.55, &PressureWeights::default()).unwrap();
        assert!((mp - 6.4).abs() < 1e-12);
    }

    #[test]
    fn test_validation() {
        let fast = PvpFastMove::new("Counter", 4.0, 8.0, 2).unwrap();
        let weights = PressureWeights::default();
        assert!(matches!(
            move_pressure(&fast, &[], 0.5, &weights),
            Err(BattleError::MissingChargeMove)
        ));
        let charge = PvpChargeMove::new("Rock Slide", 70.0, 40.0).unwrap();
        assert!(move_pressure(&fast, &[charge.clone()], 1.5, &weights).is_err());
        let negative = PressureWeights {
            energy_weight: -0.1,
            ..weights
        };
        assert!(move_pressure(&fast, &[charge], 0.5, &negative).is_err());
    }
}

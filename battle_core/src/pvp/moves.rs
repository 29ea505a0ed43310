use dex_core::{ChargeMoveRecord, FastMoveRecord};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, BattleError, BattleResult};

/// Seconds per PvP turn
pub const TURN_SECONDS: f64 = 0.5;

/// A trainer-battle fast move, timed in turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpFastMove {
    pub name: String,
    pub damage: f64,
    pub energy_gain: f64,
    pub turns: u32,
}

impl PvpFastMove {
    pub fn new(
        name: impl Into<String>,
        damage: f64,
        energy_gain: f64,
        turns: u32,
    ) -> BattleResult<Self> {
        let fast = PvpFastMove {
            name: name.into(),
            damage,
            energy_gain,
            turns,
        };
        fast.validate()?;
        Ok(fast)
    }

    pub fn from_record(record: &FastMoveRecord) -> BattleResult<Self> {
        match (record.pvp_damage, record.pvp_energy_gain, record.pvp_turns) {
            (Some(damage), Some(energy_gain), Some(turns)) => {
                Self::new(record.name.clone(), damage, energy_gain, turns)
            }
            _ => Err(BattleError::MissingPvpData(record.name.clone())),
        }
    }

    pub fn validate(&self) -> BattleResult<()> {
        ensure_non_negative("fast move damage", self.damage)?;
        ensure_positive("fast move energy gain", self.energy_gain)?;
        ensure_positive("fast move turns", f64::from(self.turns))?;
        Ok(())
    }

    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.turns) * TURN_SECONDS
    }

    /// Energy per second
    pub fn energy_per_second(&self) -> f64 {
        self.energy_gain / self.duration_seconds()
    }

    /// Damage per second
    pub fn damage_per_second(&self) -> f64 {
        self.damage / self.duration_seconds()
    }
}

/// A trainer-battle charge move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpChargeMove {
    pub name: String,
    pub damage: f64,
    pub energy_cost: f64,
    /// How often the move lands at full value; defaults to `1 / energy_cost`
    #[serde(default)]
    pub reliability: Option<f64>,
    #[serde(default)]
    pub has_buff: bool,
}

impl PvpChargeMove {
    pub fn new(name: impl Into<String>, damage: f64, energy_cost: f64) -> BattleResult<Self> {
        let charge = PvpChargeMove {
            name: name.into(),
            damage,
            energy_cost,
            reliability: None,
            has_buff: false,
        };
        charge.validate()?;
        Ok(charge)
    }

    pub fn with_reliability(mut self, reliability: f64) -> BattleResult<Self> {
        self.reliability = Some(reliability);
        self.validate()?;
        Ok(self)
    }

    pub fn with_buff(mut self, has_buff: bool) -> Self {
        self.has_buff = has_buff;
        self
    }

    pub fn from_record(record: &ChargeMoveRecord) -> BattleResult<Self> {
        match (record.pvp_damage, record.pvp_energy_cost) {
            (Some(damage), Some(cost)) => {
                Ok(Self::new(record.name.clone(), damage, cost)?.with_buff(record.pvp_has_buff))
            }
            _ => Err(BattleError::MissingPvpData(record.name.clone())),
        }
    }

    pub fn validate(&self) -> BattleResult<()> {
        ensure_non_negative("charge move damage", self.damage)?;
        ensure_positive("charge move energy cost", self.energy_cost)?;
        if let Some(reliability) = self.reliability {
            ensure_non_negative("charge move reliability", reliability)?;
        }
        Ok(())
    }

    pub fn effective_reliability(&self) -> f64 {
        self.reliability.unwrap_or(1.0 / self.energy_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_core::PokemonType;

    #[test]
    fn test_fast_rates() {
        let snarl = PvpFastMove::new("Snarl", 5.0, 13.0, 4).unwrap();
        assert!((snarl.duration_seconds() - 2.0).abs() < f64::EPSILON);
        assert!((snarl.energy_per_second() - 6.5).abs() < f64::EPSILON);
        assert!((snarl.damage_per_second() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation() {
        assert!(PvpFastMove::new("Bad", -1.0, 13.0, 4).is_err());
        assert!(PvpFastMove::new("Bad", 5.0, 0.0, 4).is_err());
        assert!(PvpFastMove::new("Bad", 5.0, 13.0, 0).is_err());
        assert!(PvpChargeMove::new("Bad", 50.0, 0.0).is_err());
        assert!(PvpChargeMove::new("Ok", 50.0, 40.0)
            .unwrap()
            .with_reliability(-0.1)
            .is_err());
    }

    #[test]
    fn test_default_reliability_is_inverse_cost() {
        let swing = PvpChargeMove::new("Brutal Swing", 65.0, 40.0).unwrap();
        assert!((swing.effective_reliability() - 0.025).abs() < f64::EPSILON);
        let swing = swing.with_reliability(0.5).unwrap();
        assert!((swing.effective_reliability() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_record_requires_pvp_fields() {
        let record = FastMoveRecord {
            name: "Dragon Breath".to_string(),
            move_type: PokemonType::Dragon,
            pve_power: 6.0,
            pve_energy_gain: 4.0,
            pve_duration_s: 0.5,
            pvp_damage: None,
            pvp_energy_gain: None,
            pvp_turns: None,
        };
        assert!(matches!(
            PvpFastMove::from_record(&record),
            Err(BattleError::MissingPvpData(_))
        ));

        let record = ChargeMoveRecord {
            name: "Power-Up Punch".to_string(),
            move_type: PokemonType::Fighting,
            pve_power: 20.0,
            pve_energy_cost: 33.0,
            pve_duration_s: 2.3,
            pvp_damage: Some(20.0),
            pvp_energy_cost: Some(35.0),
            pvp_has_buff: true,
        };
        let charge = PvpChargeMove::from_record(&record).unwrap();
        assert!(charge.has_buff);
        assert!((charge.energy_cost - 35.0).abs() < f64::EPSILON);
    }
}

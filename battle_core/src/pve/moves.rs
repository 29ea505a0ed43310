use dex_core::{ChargeMoveRecord, FastMoveRecord, Species};
use serde::{Deserialize, Serialize};

use super::rotation::ENERGY_CAP;
use crate::damage::HitBonuses;
use crate::error::{ensure_non_negative, ensure_positive, BattleError, BattleResult};

/// A raid fast move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastMove {
    pub name: String,
    pub power: f64,
    pub energy_gain: f64,
    /// Seconds per execution
    pub duration: f64,
    pub bonuses: HitBonuses,
}

impl FastMove {
    pub fn new(
        name: impl Into<String>,
        power: f64,
        energy_gain: f64,
        duration: f64,
        bonuses: HitBonuses,
    ) -> BattleResult<Self> {
        let fast = FastMove {
            name: name.into(),
            power,
            energy_gain,
            duration,
            bonuses,
        };
        fast.validate()?;
        Ok(fast)
    }

    /// Build from a move-book record; STAB comes from the attacker's typing
    pub fn from_record(
        record: &FastMoveRecord,
        attacker: &Species,
        weather_boosted: bool,
        type_effectiveness: f64,
    ) -> BattleResult<Self> {
        Self::new(
            record.name.clone(),
            record.pve_power,
            record.pve_energy_gain,
            record.pve_duration_s,
            HitBonuses {
                stab: attacker.has_type(record.move_type),
                weather_boosted,
                type_effectiveness,
            },
        )
    }

    pub fn validate(&self) -> BattleResult<()> {
        ensure_non_negative("fast move power", self.power)?;
        ensure_positive("fast move energy gain", self.energy_gain)?;
        ensure_positive("fast move duration", self.duration)?;
        ensure_positive("type effectiveness", self.bonuses.type_effectiveness)?;
        Ok(())
    }
}

/// A raid charge move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeMove {
    pub name: String,
    pub power: f64,
    /// Energy spent per use, at most the energy cap
    pub energy_cost: f64,
    pub duration: f64,
    pub bonuses: HitBonuses,
}

impl ChargeMove {
    pub fn new(
        name: impl Into<String>,
        power: f64,
        energy_cost: f64,
        duration: f64,
        bonuses: HitBonuses,
    ) -> BattleResult<Self> {
        let charge = ChargeMove {
            name: name.into(),
            power,
            energy_cost,
            duration,
            bonuses,
        };
        charge.validate()?;
        Ok(charge)
    }

    pub fn from_record(
        record: &ChargeMoveRecord,
        attacker: &Species,
        weather_boosted: bool,
        type_effectiveness: f64,
    ) -> BattleResult<Self> {
        Self::new(
            record.name.clone(),
            record.pve_power,
            record.pve_energy_cost,
            record.pve_duration_s,
            HitBonuses {
                stab: attacker.has_type(record.move_type),
                weather_boosted,
                type_effectiveness,
            },
        )
    }

    pub fn validate(&self) -> BattleResult<()> {
        ensure_non_negative("charge move power", self.power)?;
        ensure_positive("charge move energy cost", self.energy_cost)?;
        if self.energy_cost > ENERGY_CAP {
            return Err(BattleError::OutOfRange {
                field: "charge move energy cost",
                requirement: "at most the 100 energy cap",
                value: self.energy_cost,
            });
        }
        ensure_positive("charge move duration", self.duration)?;
        ensure_positive("type effectiveness", self.bonuses.type_effectiveness)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_core::{BaseStats, PokemonType};

    fn hydreigon() -> Species {
        Species {
            slug: "hydreigon".to_string(),
            name: "Hydreigon".to_string(),
            dex: 635,
            base: BaseStats::new(256, 188, 211),
            types: vec![PokemonType::Dark, PokemonType::Dragon],
            tags: Vec::new(),
            default_ivs: None,
            family: None,
        }
    }

    #[test]
    fn test_fast_move_validation() {
        assert!(FastMove::new("Snarl", 12.0, 13.0, 1.0, HitBonuses::stab()).is_ok());
        assert!(FastMove::new("Bad", -1.0, 13.0, 1.0, HitBonuses::default()).is_err());
        assert!(FastMove::new("Bad", 12.0, 0.0, 1.0, HitBonuses::default()).is_err());
        assert!(FastMove::new("Bad", 12.0, 13.0, 0.0, HitBonuses::default()).is_err());
    }

    #[test]
    fn test_charge_cost_capped() {
        assert!(ChargeMove::new("Hyper Beam", 150.0, 100.0, 3.8, HitBonuses::default()).is_ok());
        let err = ChargeMove::new("Impossible", 150.0, 101.0, 3.8, HitBonuses::default())
            .unwrap_err();
        assert!(err.to_string().contains("energy cap"));
        assert!(ChargeMove::new("Free", 50.0, 0.0, 1.0, HitBonuses::default()).is_err());
    }

    #[test]
    fn test_from_record_derives_stab() {
        let record = FastMoveRecord {
            name: "Snarl".to_string(),
            move_type: PokemonType::Dark,
            pve_power: 12.0,
            pve_energy_gain: 13.0,
            pve_duration_s: 1.0,
            pvp_damage: None,
            pvp_energy_gain: None,
            pvp_turns: None,
        };
        let fast = FastMove::from_record(&record, &hydreigon(), false, 1.0).unwrap();
        assert!(fast.bonuses.stab);

        let record = ChargeMoveRecord {
            name: "Flamethrower".to_string(),
            move_type: PokemonType::Fire,
            pve_power: 70.0,
            pve_energy_cost: 50.0,
            pve_duration_s: 2.2,
            pvp_damage: None,
            pvp_energy_cost: None,
            pvp_has_buff: false,
        };
        let charge = ChargeMove::from_record(&record, &hydreigon(), true, 1.6).unwrap();
        assert!(!charge.bonuses.stab);
        assert!(charge.bonuses.weather_boosted);
    }
}

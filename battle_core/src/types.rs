use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BattleError, BattleResult};

/// Highest individual value for any stat
pub const MAX_IV: u8 = 15;

/// Individual values (0-15) for attack, defense and stamina
///
/// Every spread goes through [`IvSpread::new`], including deserialised ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIvSpread")]
pub struct IvSpread {
    pub(crate) attack: u8,
    pub(crate) defense: u8,
    pub(crate) stamina: u8,
}

#[derive(Deserialize)]
struct RawIvSpread {
    attack: u8,
    defense: u8,
    stamina: u8,
}

impl TryFrom<RawIvSpread> for IvSpread {
    type Error = BattleError;

    fn try_from(raw: RawIvSpread) -> BattleResult<Self> {
        IvSpread::new(raw.attack, raw.defense, raw.stamina)
    }
}

impl IvSpread {
    /// Create a validated spread
    pub fn new(attack: u8, defense: u8, stamina: u8) -> BattleResult<Self> {
        for (field, value) in [
            ("attack IV", attack),
            ("defense IV", defense),
            ("stamina IV", stamina),
        ] {
            if value > MAX_IV {
                return Err(BattleError::OutOfRange {
                    field,
                    requirement: "between 0 and 15",
                    value: f64::from(value),
                });
            }
        }
        Ok(Self {
            attack,
            defense,
            stamina,
        })
    }

    /// 15/15/15
    pub fn perfect() -> Self {
        Self {
            attack: MAX_IV,
            defense: MAX_IV,
            stamina: MAX_IV,
        }
    }

    pub fn attack(&self) -> u8 {
        self.attack
    }

    pub fn defense(&self) -> u8 {
        self.defense
    }

    pub fn stamina(&self) -> u8 {
        self.stamina
    }

    /// Same spread with a different attack IV
    pub fn with_attack(self, attack: u8) -> BattleResult<Self> {
        Self::new(attack, self.defense, self.stamina)
    }

    pub fn with_defense(self, defense: u8) -> BattleResult<Self> {
        Self::new(self.attack, defense, self.stamina)
    }

    pub fn with_stamina(self, stamina: u8) -> BattleResult<Self> {
        Self::new(self.attack, self.defense, stamina)
    }
}

impl fmt::Display for IvSpread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.attack, self.defense, self.stamina)
    }
}

/// Flags that alter the stat transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatModifiers {
    /// Shadow: x1.2 attack, x0.83 defense
    #[serde(default)]
    pub shadow: bool,
    /// Best buddy: multiplier taken one level higher
    #[serde(default)]
    pub best_buddy: bool,
}

impl StatModifiers {
    pub fn shadow() -> Self {
        Self {
            shadow: true,
            best_buddy: false,
        }
    }

    pub fn with_best_buddy(mut self, best_buddy: bool) -> Self {
        self.best_buddy = best_buddy;
        self
    }
}

/// Effective in-combat stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: f64,
    pub defense: f64,
    pub hp: u32,
}

impl CombatStats {
    /// Attack x defense x HP
    pub fn stat_product(&self) -> f64 {
        self.attack * self.defense * f64::from(self.hp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iv_validation() {
        assert!(IvSpread::new(15, 15, 15).is_ok());
        assert!(IvSpread::new(0, 0, 0).is_ok());
        let err = IvSpread::new(15, 16, 0).unwrap_err();
        assert!(err.to_string().contains("defense IV"));
    }

    #[test]
    fn test_deserialised_ivs_are_validated() {
        let ivs: IvSpread = toml::from_str("attack = 12\ndefense = 15\nstamina = 10").unwrap();
        assert_eq!(ivs, IvSpread::new(12, 15, 10).unwrap());

        let result = toml::from_str::<IvSpread>("attack = 40\ndefense = 200\nstamina = 15");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("attack IV"));
    }

    #[test]
    fn test_with_ivs_revalidates() {
        let ivs = IvSpread::perfect();
        assert_eq!(ivs.with_attack(0).unwrap().attack(), 0);
        assert_eq!(ivs.with_stamina(7).unwrap().stamina(), 7);
        assert!(ivs.with_defense(16).is_err());
    }

    #[test]
    fn test_iv_display() {
        assert_eq!(IvSpread::new(12, 15, 10).unwrap().to_string(), "12/15/10");
    }

    #[test]
    fn test_stat_product() {
        let stats = CombatStats {
            attack: 100.0,
            defense: 50.0,
            hp: 120,
        };
        assert!((stats.stat_product() - 600_000.0).abs() < f64::EPSILON);
    }
}

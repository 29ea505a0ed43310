//! Tunable scoring constants

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::leagues::BaitModel;
use super::{load_toml, parse_toml, ConfigError};

/// Scoring defaults for both combat modes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConstants {
    #[serde(default)]
    pub pve: PveDefaults,
    #[serde(default)]
    pub pvp: PvpDefaults,
}

impl ScoringConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: ScoringConstants = load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let constants: ScoringConstants = parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// The "enhanced" bundle: damage-to-energy and relobby for raids,
    /// shield blending and a bait model for trainer battles
    pub fn enhanced() -> Self {
        ScoringConstants {
            pve: PveDefaults {
                energy_from_damage_ratio: Some(0.5),
                relobby_phi: Some(0.0025),
                ..PveDefaults::default()
            },
            pvp: PvpDefaults {
                energy_weight: 1.0,
                buff_weight: 0.6,
                shield_weights: Some(vec![0.2, 0.5, 0.3]),
                bait_model: Some(BaitModel {
                    a: 0.4,
                    b: -0.1,
                    c: 0.35,
                    d: 0.0,
                }),
                ..PvpDefaults::default()
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));
        if !(self.pve.alpha > 0.0 && self.pve.alpha < 1.0) {
            return invalid("pve.alpha must lie strictly between 0 and 1");
        }
        if self.pve.max_total_charge_uses == 0 {
            return invalid("pve.max_total_charge_uses must be at least 1");
        }
        if self.pve.max_simulations == 0 {
            return invalid("pve.max_simulations must be at least 1");
        }
        if !(self.pvp.beta > 0.0 && self.pvp.beta < 1.0) {
            return invalid("pvp.beta must lie strictly between 0 and 1");
        }
        if self.pvp.energy_weight < 0.0 || self.pvp.buff_weight < 0.0 {
            return invalid("pvp weights must be non-negative");
        }
        Ok(())
    }
}

/// Raid scoring defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PveDefaults {
    /// DPS weight in the geometric blend
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Charge executions per simulated cycle
    #[serde(default = "default_max_total_charge_uses")]
    pub max_total_charge_uses: u32,
    /// Ceiling on simulated orderings per rotation search
    #[serde(default = "default_max_simulations")]
    pub max_simulations: usize,
    /// Value bonus per breakpoint reached
    #[serde(default = "default_breakpoint_kappa")]
    pub breakpoint_kappa: f64,
    /// Value adjustment per unit of type coverage
    #[serde(default = "default_coverage_theta")]
    pub coverage_theta: f64,
    #[serde(default)]
    pub energy_from_damage_ratio: Option<f64>,
    #[serde(default)]
    pub relobby_phi: Option<f64>,
}

impl Default for PveDefaults {
    fn default() -> Self {
        PveDefaults {
            alpha: 0.6,
            max_total_charge_uses: 6,
            max_simulations: 250_000,
            breakpoint_kappa: 0.02,
            coverage_theta: 0.05,
            energy_from_damage_ratio: None,
            relobby_phi: None,
        }
    }
}

fn default_alpha() -> f64 {
    0.6
}
fn default_max_total_charge_uses() -> u32 {
    6
}
fn default_max_simulations() -> usize {
    250_000
}
fn default_breakpoint_kappa() -> f64 {
    0.02
}
fn default_coverage_theta() -> f64 {
    0.05
}

/// Trainer-battle scoring defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpDefaults {
    /// Stat-product weight in the geometric blend
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Weight of fast-move energy generation in fast pressure
    #[serde(default = "default_energy_weight")]
    pub energy_weight: f64,
    /// Flat damage credit for charge moves that buff or debuff
    #[serde(default = "default_buff_weight")]
    pub buff_weight: f64,
    #[serde(default = "default_breakpoint_kappa")]
    pub breakpoint_kappa: f64,
    /// Overrides the league's shield weights when set
    #[serde(default)]
    pub shield_weights: Option<Vec<f64>>,
    /// Overrides the league's bait model when set
    #[serde(default)]
    pub bait_model: Option<BaitModel>,
}

impl Default for PvpDefaults {
    fn default() -> Self {
        PvpDefaults {
            beta: 0.52,
            energy_weight: 0.35,
            buff_weight: 12.0,
            breakpoint_kappa: 0.02,
            shield_weights: None,
            bait_model: None,
        }
    }
}

fn default_beta() -> f64 {
    0.52
}
fn default_energy_weight() -> f64 {
    0.35
}
fn default_buff_weight() -> f64 {
    12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let constants = ScoringConstants::default();
        assert!((constants.pve.alpha - 0.6).abs() < f64::EPSILON);
        assert_eq!(constants.pve.max_total_charge_uses, 6);
        assert!((constants.pvp.beta - 0.52).abs() < f64::EPSILON);
        assert!((constants.pvp.energy_weight - 0.35).abs() < f64::EPSILON);
        assert!((constants.pvp.buff_weight - 12.0).abs() < f64::EPSILON);
        assert!(constants.pvp.shield_weights.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let constants = ScoringConstants::from_toml_str(
            r#"
[pve]
alpha = 0.5

[pvp]
bait_model = { a = 0.4, b = -0.1, c = 0.35, d = 0.0 }
"#,
        )
        .unwrap();
        assert!((constants.pve.alpha - 0.5).abs() < f64::EPSILON);
        assert_eq!(constants.pve.max_total_charge_uses, 6);
        assert!((constants.pvp.beta - 0.52).abs() < f64::EPSILON);
        assert!(constants.pvp.bait_model.is_some());
    }

    #[test]
    fn test_invalid_alpha_rejected() {
        let result = ScoringConstants::from_toml_str("[pve]\nalpha = 1.0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_enhanced_bundle() {
        let enhanced = ScoringConstants::enhanced();
        assert_eq!(enhanced.pve.energy_from_damage_ratio, Some(0.5));
        assert!(enhanced.pve.relobby_phi.is_some());
        assert_eq!(enhanced.pvp.shield_weights, Some(vec![0.2, 0.5, 0.3]));
        assert!((enhanced.pvp.buff_weight - 0.6).abs() < f64::EPSILON);
    }
}

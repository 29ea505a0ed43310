//! Trainer-battle league brackets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{load_toml, parse_toml, ConfigError};
use crate::error::{BattleError, BattleResult};

/// Logistic model for the chance an opponent bites on a bait move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaitModel {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl BaitModel {
    /// `sigmoid(a*ept + b*dpt + c*shields + d)`; `ept`/`dpt` are per second
    pub fn probability(&self, ept: f64, dpt: f64, shields: u8) -> f64 {
        let x = self.a * ept + self.b * dpt + self.c * f64::from(shields) + self.d;
        1.0 / (1.0 + (-x).exp())
    }
}

/// Scoring defaults for one bracket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    /// CP cap; `None` for an uncapped bracket
    #[serde(default)]
    pub cp_cap: Option<u32>,
    pub stat_product_reference: f64,
    pub move_pressure_reference: f64,
    #[serde(default)]
    pub bait_probability: Option<f64>,
    /// Weights for the 0, 1 and 2 shield scenarios
    #[serde(default)]
    pub shield_weights: Option<Vec<f64>>,
    #[serde(default)]
    pub bait_model: Option<BaitModel>,
    #[serde(default = "default_cmp_threshold")]
    pub cmp_threshold: f64,
    #[serde(default = "default_cmp_eta")]
    pub cmp_eta: f64,
    #[serde(default = "default_coverage_theta")]
    pub coverage_theta: f64,
    #[serde(default = "default_anti_meta_mu")]
    pub anti_meta_mu: f64,
}

fn default_cmp_threshold() -> f64 {
    0.5
}
fn default_cmp_eta() -> f64 {
    0.03
}
fn default_coverage_theta() -> f64 {
    0.05
}
fn default_anti_meta_mu() -> f64 {
    0.05
}

impl LeagueConfig {
    /// A bracket with the standard modifier coefficients
    pub fn new(
        name: &str,
        cp_cap: Option<u32>,
        stat_product_reference: f64,
        move_pressure_reference: f64,
        bait_probability: f64,
    ) -> Self {
        LeagueConfig {
            name: name.to_string(),
            cp_cap,
            stat_product_reference,
            move_pressure_reference,
            bait_probability: Some(bait_probability),
            shield_weights: None,
            bait_model: None,
            cmp_threshold: default_cmp_threshold(),
            cmp_eta: default_cmp_eta(),
            coverage_theta: default_coverage_theta(),
            anti_meta_mu: default_anti_meta_mu(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));
        if self.name.trim().is_empty() {
            return invalid("league name is empty".to_string());
        }
        if self.stat_product_reference <= 0.0 || self.move_pressure_reference <= 0.0 {
            return invalid(format!("league '{}': references must be positive", self.name));
        }
        if let Some(p) = self.bait_probability {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("league '{}': bait_probability outside [0, 1]", self.name));
            }
        }
        if let Some(weights) = &self.shield_weights {
            if weights.len() != 3 || weights.iter().any(|w| *w < 0.0) {
                return invalid(format!(
                    "league '{}': shield_weights needs three non-negative values",
                    self.name
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct LeagueFile {
    #[serde(default)]
    leagues: Vec<LeagueConfig>,
}

/// Named league brackets, looked up case-insensitively
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueTable {
    leagues: BTreeMap<String, LeagueConfig>,
}

impl Default for LeagueTable {
    fn default() -> Self {
        let mut table = LeagueTable {
            leagues: BTreeMap::new(),
        };
        table.insert(LeagueConfig::new("little", Some(500), 400_000.0, 44.0, 0.55));
        table.insert(LeagueConfig::new("great", Some(1500), 1_600_000.0, 48.0, 0.55));
        table.insert(LeagueConfig::new("ultra", Some(2500), 2_400_000.0, 52.0, 0.5));
        table.insert(LeagueConfig::new("master", None, 3_000_000.0, 56.0, 0.45));
        table
    }
}

impl LeagueTable {
    /// Load brackets from a `[[leagues]]` TOML file, layered over the defaults
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let file: LeagueFile = load_toml(path)?;
        Self::from_file(file)
    }

    /// Parse brackets from a TOML string, layered over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: LeagueFile = parse_toml(content)?;
        Self::from_file(file)
    }

    fn from_file(file: LeagueFile) -> Result<Self, ConfigError> {
        let mut table = Self::default();
        for league in file.leagues {
            league.validate()?;
            table.insert(league);
        }
        Ok(table)
    }

    /// Add or replace a bracket
    pub fn insert(&mut self, league: LeagueConfig) {
        self.leagues.insert(league.name.to_lowercase(), league);
    }

    /// Look up a bracket by name
    pub fn get(&self, name: &str) -> BattleResult<&LeagueConfig> {
        self.leagues
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| BattleError::UnknownLeague {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// The bracket with exactly this cap (`None` for uncapped)
    pub fn for_cap(&self, cap: Option<u32>) -> Option<&LeagueConfig> {
        self.leagues.values().find(|l| l.cp_cap == cap)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.leagues.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brackets() {
        let table = LeagueTable::default();
        let great = table.get("Great").unwrap();
        assert_eq!(great.cp_cap, Some(1500));
        assert!((great.stat_product_reference - 1_600_000.0).abs() < f64::EPSILON);
        assert!((great.move_pressure_reference - 48.0).abs() < f64::EPSILON);
        assert_eq!(great.bait_probability, Some(0.55));

        let master = table.get("master").unwrap();
        assert_eq!(master.cp_cap, None);
        assert_eq!(table.for_cap(Some(2500)).unwrap().name, "ultra");
        assert_eq!(table.for_cap(None).unwrap().name, "master");
    }

    #[test]
    fn test_unknown_league() {
        let table = LeagueTable::default();
        let err = table.get("mythic").unwrap_err();
        assert!(matches!(err, BattleError::UnknownLeague { .. }));
        assert!(err.to_string().contains("great"));
    }

    #[test]
    fn test_toml_overrides_and_adds() {
        let table = LeagueTable::from_toml_str(
            r#"
[[leagues]]
name = "great"
cp_cap = 1500
stat_product_reference = 1700000.0
move_pressure_reference = 50.0
shield_weights = [0.2, 0.5, 0.3]

[[leagues]]
name = "Retro"
cp_cap = 1500
stat_product_reference = 1600000.0
move_pressure_reference = 48.0
"#,
        )
        .unwrap();
        let great = table.get("great").unwrap();
        assert!((great.move_pressure_reference - 50.0).abs() < f64::EPSILON);
        assert_eq!(great.bait_probability, None);
        assert!((great.cmp_eta - 0.03).abs() < f64::EPSILON);
        assert!(table.get("retro").is_ok());
        assert!(table.get("ultra").is_ok());
    }

    #[test]
    fn test_bad_shield_weights_rejected() {
        let result = LeagueTable::from_toml_str(
            r#"
[[leagues]]
name = "great"
stat_product_reference = 1600000.0
move_pressure_reference = 48.0
shield_weights = [1.0, 0.0]
"#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_bait_model_sigmoid() {
        let model = BaitModel {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        };
        assert!((model.probability(6.5, 2.5, 1) - 0.5).abs() < 1e-12);

        let model = BaitModel {
            a: 0.4,
            b: -0.1,
            c: 0.35,
            d: 0.0,
        };
        let x: f64 = 0.4 * 6.5 - 0.1 * 2.5 + 0.35 * 2.0;
        let expected = 1.0 / (1.0 + (-x).exp());
        assert!((model.probability(6.5, 2.5, 2) - expected).abs() < 1e-12);
    }
}

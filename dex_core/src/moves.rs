//! Move records for raid (PvE) and trainer (PvP) combat
//!
//! The input document carries `{ "fast": [...], "charge": [...] }`. Charge
//! entries reuse the `*_energy_gain` field names for their energy cost; the
//! magnitude is taken because game-master dumps store costs as negative
//! deltas.

use crate::names::normalize_name;
use crate::types::PokemonType;
use crate::{read_json, DexError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A repeatable move that builds energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastMoveRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    pub pve_power: f64,
    pub pve_energy_gain: f64,
    pub pve_duration_s: f64,
    #[serde(default)]
    pub pvp_damage: Option<f64>,
    #[serde(default)]
    pub pvp_energy_gain: Option<f64>,
    #[serde(default)]
    pub pvp_turns: Option<u32>,
}

/// A move that spends energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeMoveRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    pub pve_power: f64,
    #[serde(rename = "pve_energy_gain")]
    pub pve_energy_cost: f64,
    pub pve_duration_s: f64,
    #[serde(default)]
    pub pvp_damage: Option<f64>,
    #[serde(default, rename = "pvp_energy_gain")]
    pub pvp_energy_cost: Option<f64>,
    /// Whether the move applies a stat buff or debuff in PvP
    #[serde(default)]
    pub pvp_has_buff: bool,
}

#[derive(Debug, Deserialize)]
struct MoveDocument {
    #[serde(default)]
    fast: Vec<FastMoveRecord>,
    #[serde(default)]
    charge: Vec<ChargeMoveRecord>,
}

/// Fast and charge moves indexed by normalised name
#[derive(Debug, Default)]
pub struct MoveBook {
    fast: HashMap<String, FastMoveRecord>,
    charge: HashMap<String, ChargeMoveRecord>,
}

impl MoveBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a move document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, DexError> {
        let doc: MoveDocument =
            serde_json::from_str(json).map_err(|e| DexError::Parse { error: e, path: None })?;
        Self::from_document(doc)
    }

    /// Load a move document from a file
    pub fn load(path: &Path) -> Result<Self, DexError> {
        let doc: MoveDocument = read_json(path)?;
        Self::from_document(doc)
    }

    fn from_document(doc: MoveDocument) -> Result<Self, DexError> {
        let mut book = Self::new();
        for record in doc.fast {
            book.insert_fast(record)?;
        }
        for record in doc.charge {
            book.insert_charge(record)?;
        }
        tracing::debug!(
            fast = book.fast.len(),
            charge = book.charge.len(),
            "loaded move book"
        );
        Ok(book)
    }

    pub fn insert_fast(&mut self, record: FastMoveRecord) -> Result<(), DexError> {
        let key = move_key(&record.name)?;
        self.fast.insert(key, record);
        Ok(())
    }

    pub fn insert_charge(&mut self, mut record: ChargeMoveRecord) -> Result<(), DexError> {
        let key = move_key(&record.name)?;
        record.pve_energy_cost = record.pve_energy_cost.abs();
        record.pvp_energy_cost = record.pvp_energy_cost.map(f64::abs);
        self.charge.insert(key, record);
        Ok(())
    }

    /// Look up a fast move by any spelling of its name
    pub fn fast(&self, name: &str) -> Result<&FastMoveRecord, DexError> {
        self.fast
            .get(&normalize_name(name))
            .ok_or_else(|| DexError::UnknownMove(name.to_string()))
    }

    /// Look up a charge move by any spelling of its name
    pub fn charge(&self, name: &str) -> Result<&ChargeMoveRecord, DexError> {
        self.charge
            .get(&normalize_name(name))
            .ok_or_else(|| DexError::UnknownMove(name.to_string()))
    }

    pub fn fast_count(&self) -> usize {
        self.fast.len()
    }

    pub fn charge_count(&self) -> usize {
        self.charge.len()
    }
}

fn move_key(name: &str) -> Result<String, DexError> {
    let key = normalize_name(name);
    if key.is_empty() {
        return Err(DexError::Validation(format!("move name '{}' is empty", name)));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "fast": [
            {"name": "Snarl", "type": "dark", "pve_power": 12, "pve_energy_gain": 13,
             "pve_duration_s": 1.0, "pvp_damage": 5, "pvp_energy_gain": 13, "pvp_turns": 4},
            {"name": "Dragon Breath", "type": "dragon", "pve_power": 6, "pve_energy_gain": 4,
             "pve_duration_s": 0.5}
        ],
        "charge": [
            {"name": "Brutal Swing", "type": "dark", "pve_power": 65, "pve_energy_gain": -40,
             "pve_duration_s": 1.9, "pvp_damage": 65, "pvp_energy_gain": -40}
        ]
    }"#;

    #[test]
    fn test_parse_and_lookup() {
        let book = MoveBook::from_json_str(SAMPLE).unwrap();
        assert_eq!(book.fast_count(), 2);
        assert_eq!(book.charge_count(), 1);

        let snarl = book.fast("SNARL").unwrap();
        assert_eq!(snarl.move_type, PokemonType::Dark);
        assert_eq!(snarl.pvp_turns, Some(4));

        let breath = book.fast("dragon_breath").unwrap();
        assert!(breath.pvp_damage.is_none());
    }

    #[test]
    fn test_charge_cost_is_magnitude() {
        let book = MoveBook::from_json_str(SAMPLE).unwrap();
        let swing = book.charge("Brutal Swing").unwrap();
        assert!((swing.pve_energy_cost - 40.0).abs() < f64::EPSILON);
        assert_eq!(swing.pvp_energy_cost, Some(40.0));
        assert!(!swing.pvp_has_buff);
    }

    #[test]
    fn test_unknown_move() {
        let book = MoveBook::from_json_str(SAMPLE).unwrap();
        assert!(matches!(book.charge("Snarl"), Err(DexError::UnknownMove(_))));
    }
}

use dex_core::{normalize_name, Species};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::BoardError;

/// Moves one species can learn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Learnset {
    #[serde(default)]
    pub fast: Vec<String>,
    #[serde(default)]
    pub charge: Vec<String>,
}

/// Learnsets keyed by normalised species name
#[derive(Debug, Clone, Default)]
pub struct Learnsets {
    sets: HashMap<String, Learnset>,
}

impl Learnsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{ "species": { "fast": [...], "charge": [...] } }`
    pub fn from_json_str(json: &str) -> Result<Self, BoardError> {
        let raw: HashMap<String, Learnset> =
            serde_json::from_str(json).map_err(|e| BoardError::Parse {
                error: e,
                path: None,
            })?;
        let mut learnsets = Self::new();
        for (species, set) in raw {
            learnsets.insert(&species, set);
        }
        Ok(learnsets)
    }

    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let content = std::fs::read_to_string(path).map_err(|e| BoardError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        Self::from_json_str(&content).map_err(|e| match e {
            BoardError::Parse { error, .. } => BoardError::Parse {
                error,
                path: Some(path.to_path_buf()),
            },
            other => other,
        })
    }

    pub fn insert(&mut self, species: &str, learnset: Learnset) {
        self.sets.insert(normalize_name(species), learnset);
    }

    /// Learnset by display name, falling back to the slug
    pub fn get(&self, species: &Species) -> Option<&Learnset> {
        self.sets
            .get(&normalize_name(&species.name))
            .or_else(|| self.sets.get(&normalize_name(&species.slug)))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

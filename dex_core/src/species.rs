//! Species records and the alias-indexed repository

use crate::names::normalize_name;
use crate::types::PokemonType;
use crate::{read_json, DexError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Slug prefixes that mark a variant of a base species
const VARIANT_PREFIXES: &[&str] = &[
    "shadow_", "purified_", "mega_", "apex_", "galarian_", "alolan_", "hisuian_", "paldean_",
];

/// Base attack, defense and stamina
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub stamina: u32,
}

impl BaseStats {
    pub fn new(attack: u32, defense: u32, stamina: u32) -> Self {
        Self {
            attack,
            defense,
            stamina,
        }
    }
}

/// An immutable species (or form) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub slug: String,
    pub name: String,
    pub dex: u32,
    pub base: BaseStats,
    pub types: Vec<PokemonType>,
    pub tags: Vec<String>,
    /// Per-league default IVs as published by ranking sites, keyed by cap
    pub default_ivs: Option<BTreeMap<String, Vec<f64>>>,
    pub family: Option<String>,
}

impl Species {
    /// Whether a move of `move_type` receives the same-type bonus
    pub fn has_type(&self, move_type: PokemonType) -> bool {
        self.types.contains(&move_type)
    }

    pub fn is_shadow_variant(&self) -> bool {
        self.slug.starts_with("shadow_") || self.tags.iter().any(|t| t == "shadow")
    }

    pub fn is_mega(&self) -> bool {
        self.slug.starts_with("mega_") || self.tags.iter().any(|t| t == "mega")
    }

    /// Every key this species answers to in the repository index
    fn aliases(&self) -> Vec<String> {
        let raw = self.slug.to_lowercase();
        let mut keys = vec![
            raw.clone(),
            raw.replace('_', "-"),
            raw.replace('_', ""),
            raw.replace('-', ""),
            normalize_name(&self.slug),
            normalize_name(&self.name),
        ];
        if self.dex > 0 {
            keys.push(self.dex.to_string());
            keys.push(format!("#{}", self.dex));
        }
        for prefix in VARIANT_PREFIXES {
            if let Some(trimmed) = raw.strip_prefix(prefix) {
                keys.push(trimmed.to_string());
                keys.push(trimmed.replace('_', "-"));
            }
        }
        if let Some(family) = &self.family {
            keys.push(normalize_name(family));
        }
        keys.retain(|k| !k.is_empty());
        keys
    }
}

/// Family references appear either as a bare id or as `{ "id": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FamilyRef {
    Id(String),
    Detail { id: String },
}

/// One row of the species input document
#[derive(Debug, Deserialize)]
struct SpeciesRow {
    name: String,
    base_attack: u32,
    base_defense: u32,
    base_stamina: u32,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    dex: u32,
    #[serde(default)]
    types: Vec<PokemonType>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, alias = "defaultIVs")]
    default_ivs: Option<BTreeMap<String, Vec<f64>>>,
    #[serde(default)]
    family: Option<FamilyRef>,
}

#[derive(Debug, Deserialize)]
struct SpeciesDocument {
    species: Vec<SpeciesRow>,
}

impl TryFrom<SpeciesRow> for Species {
    type Error = DexError;

    fn try_from(row: SpeciesRow) -> Result<Self, Self::Error> {
        let name = row.name.trim().to_string();
        if name.is_empty() {
            return Err(DexError::Validation("species name is empty".to_string()));
        }
        if row.base_attack == 0 || row.base_defense == 0 || row.base_stamina == 0 {
            return Err(DexError::Validation(format!(
                "species '{}' has a zero base stat",
                name
            )));
        }
        if row.types.len() > 2 {
            return Err(DexError::Validation(format!(
                "species '{}' lists {} types",
                name,
                row.types.len()
            )));
        }
        let slug = row
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| normalize_name(&name).replace('-', "_"));
        Ok(Species {
            slug,
            name,
            dex: row.dex,
            base: BaseStats::new(row.base_attack, row.base_defense, row.base_stamina),
            types: row.types,
            tags: row.tags,
            default_ivs: row.default_ivs,
            family: row.family.map(|f| match f {
                FamilyRef::Id(id) | FamilyRef::Detail { id } => id,
            }),
        })
    }
}

/// Read-only species index keyed by every alias of every record
#[derive(Debug, Default)]
pub struct SpeciesRepository {
    entries: Vec<Species>,
    aliases: HashMap<String, usize>,
}

impl SpeciesRepository {
    /// Build a repository from records; earlier records win alias collisions
    pub fn new(entries: Vec<Species>) -> Self {
        let mut aliases = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            for key in entry.aliases() {
                aliases.entry(key).or_insert(index);
            }
        }
        tracing::debug!(
            species = entries.len(),
            aliases = aliases.len(),
            "built species index"
        );
        Self { entries, aliases }
    }

    /// Parse the `{ "species": [...] }` document
    pub fn from_json_str(json: &str) -> Result<Self, DexError> {
        let doc: SpeciesDocument =
            serde_json::from_str(json).map_err(|e| DexError::Parse { error: e, path: None })?;
        Self::from_rows(doc.species)
    }

    /// Load the species document from a file
    pub fn load(path: &Path) -> Result<Self, DexError> {
        let doc: SpeciesDocument = read_json(path)?;
        Self::from_rows(doc.species)
    }

    fn from_rows(rows: Vec<SpeciesRow>) -> Result<Self, DexError> {
        let entries = rows
            .into_iter()
            .map(Species::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        if entries.is_empty() {
            return Err(DexError::Validation(
                "species document contains no entries".to_string(),
            ));
        }
        Ok(Self::new(entries))
    }

    /// Look up a species by slug, display name, dex number or variant label
    pub fn get(&self, identifier: &str) -> Result<&Species, DexError> {
        self.find(identifier)
            .ok_or_else(|| DexError::UnknownSpecies(identifier.to_string()))
    }

    pub fn find(&self, identifier: &str) -> Option<&Species> {
        let raw = identifier.trim().to_lowercase();
        self.aliases
            .get(&raw)
            .or_else(|| self.aliases.get(&normalize_name(identifier)))
            .map(|&index| &self.entries[index])
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.find(identifier).is_some()
    }

    /// All records sharing a family id
    pub fn family(&self, family_id: &str) -> Vec<&Species> {
        self.entries
            .iter()
            .filter(|s| s.family.as_deref() == Some(family_id))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

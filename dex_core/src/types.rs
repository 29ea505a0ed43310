use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elemental typing shared by species and moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// Get all type variants
    pub fn all() -> &'static [PokemonType] {
        &[
            PokemonType::Normal,
            PokemonType::Fire,
            PokemonType::Water,
            PokemonType::Electric,
            PokemonType::Grass,
            PokemonType::Ice,
            PokemonType::Fighting,
            PokemonType::Poison,
            PokemonType::Ground,
            PokemonType::Flying,
            PokemonType::Psychic,
            PokemonType::Bug,
            PokemonType::Rock,
            PokemonType::Ghost,
            PokemonType::Dragon,
            PokemonType::Dark,
            PokemonType::Steel,
            PokemonType::Fairy,
        ]
    }

    /// Lowercase identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonType::Normal => "normal",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Electric => "electric",
            PokemonType::Grass => "grass",
            PokemonType::Ice => "ice",
            PokemonType::Fighting => "fighting",
            PokemonType::Poison => "poison",
            PokemonType::Ground => "ground",
            PokemonType::Flying => "flying",
            PokemonType::Psychic => "psychic",
            PokemonType::Bug => "bug",
            PokemonType::Rock => "rock",
            PokemonType::Ghost => "ghost",
            PokemonType::Dragon => "dragon",
            PokemonType::Dark => "dark",
            PokemonType::Steel => "steel",
            PokemonType::Fairy => "fairy",
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.as_str();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for PokemonType {
    type Err = String;

    /// Case-insensitive; tolerates the `POKEMON_TYPE_` prefix used by game-master dumps
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let key = lowered.strip_prefix("pokemon_type_").unwrap_or(&lowered);
        PokemonType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| format!("unknown type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_capitalizes() {
        assert_eq!(PokemonType::Dragon.to_string(), "Dragon");
        assert_eq!(PokemonType::Fairy.to_string(), "Fairy");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("DARK".parse::<PokemonType>(), Ok(PokemonType::Dark));
        assert_eq!(
            "POKEMON_TYPE_STEEL".parse::<PokemonType>(),
            Ok(PokemonType::Steel)
        );
        assert!("shadow".parse::<PokemonType>().is_err());
    }

    #[test]
    fn test_all_round_trips_through_serde() {
        for t in PokemonType::all() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
            let back: PokemonType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *t);
        }
        assert_eq!(PokemonType::all().len(), 18);
    }
}

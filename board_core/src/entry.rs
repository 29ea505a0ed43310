use battle_core::IvSpread;
use serde::Serialize;

use crate::config::EntryConfig;
use crate::scoring::{iv_bonus, raid_score, RaidBonuses, SCORE_MAX, SCORE_MIN};
use crate::EntryError;

/// Scoreboard column headers, in display order
pub const HEADERS: [&str; 8] = [
    "Name",
    "IVs",
    "Final Form",
    "Role",
    "Needs TM",
    "Mega",
    "Score",
    "Notes",
];

/// One creature on the raid scoreboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaidEntry {
    pub name: String,
    pub ivs: IvSpread,
    pub final_form: String,
    pub role: String,
    /// Baseline species strength in [1, 100]
    pub base: f64,
    pub lucky: bool,
    pub shadow: bool,
    pub purified: bool,
    pub best_buddy: bool,
    pub needs_special_move: bool,
    pub mega_now: bool,
    pub mega_soon: bool,
    pub notes: String,
}

impl RaidEntry {
    /// Create a validated entry with no flags set
    pub fn new(name: &str, ivs: [u8; 3], base: f64) -> Result<Self, EntryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EntryError::EmptyName);
        }
        let ivs = IvSpread::new(ivs[0], ivs[1], ivs[2])
            .map_err(|e| EntryError::InvalidIvs(e.to_string()))?;
        if !(SCORE_MIN..=SCORE_MAX).contains(&base) {
            return Err(EntryError::BaseOutOfRange(base));
        }
        Ok(RaidEntry {
            name: name.to_string(),
            ivs,
            final_form: String::new(),
            role: String::new(),
            base,
            lucky: false,
            shadow: false,
            purified: false,
            best_buddy: false,
            needs_special_move: false,
            mega_now: false,
            mega_soon: false,
            notes: String::new(),
        })
    }

    /// Build an entry from its TOML form
    pub fn from_config(config: EntryConfig) -> Result<Self, EntryError> {
        let mut entry = Self::new(&config.name, config.ivs, config.base)?;
        entry.final_form = config.final_form;
        entry.role = config.role;
        entry.lucky = config.lucky;
        entry.shadow = config.shadow;
        entry.purified = config.purified;
        entry.best_buddy = config.best_buddy;
        entry.needs_special_move = config.needs_tm;
        entry.mega_now = config.mega_now;
        entry.mega_soon = config.mega_soon;
        entry.notes = config.notes;
        Ok(entry)
    }

    pub fn with_final_form(mut self, final_form: &str) -> Self {
        self.final_form = final_form.to_string();
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = role.to_string();
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    pub fn with_lucky(mut self, lucky: bool) -> Self {
        self.lucky = lucky;
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_purified(mut self, purified: bool) -> Self {
        self.purified = purified;
        self
    }

    pub fn with_best_buddy(mut self, best_buddy: bool) -> Self {
        self.best_buddy = best_buddy;
        self
    }

    pub fn with_needs_special_move(mut self, needs: bool) -> Self {
        self.needs_special_move = needs;
        self
    }

    pub fn with_mega(mut self, now: bool, soon: bool) -> Self {
        self.mega_now = now;
        self.mega_soon = soon;
        self
    }

    /// Name with status suffixes
    pub fn display_name(&self) -> String {
        let mut name = self.name.clone();
        for (flag, suffix) in [
            (self.lucky, " (lucky)"),
            (self.shadow, " (shadow)"),
            (self.purified, " (purified)"),
            (self.best_buddy, " (best buddy)"),
        ] {
            if flag {
                name.push_str(suffix);
            }
        }
        name
    }

    pub fn iv_text(&self) -> String {
        self.ivs.to_string()
    }

    pub fn mega_text(&self) -> &'static str {
        if self.mega_now {
            "Yes"
        } else if self.mega_soon {
            "Soon"
        } else {
            "No"
        }
    }

    pub fn move_text(&self) -> &'static str {
        if self.needs_special_move {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn score(&self) -> f64 {
        raid_score(
            self.base,
            iv_bonus(self.ivs.attack(), self.ivs.defense(), self.ivs.stamina()),
            RaidBonuses {
                lucky: self.lucky,
                needs_special_move: self.needs_special_move,
                mega_now: self.mega_now,
                mega_soon: self.mega_soon,
            },
        )
    }

    pub fn to_row(&self) -> ScoreboardRow {
        ScoreboardRow {
            name: self.display_name(),
            ivs: self.iv_text(),
            final_form: self.final_form.clone(),
            role: self.role.clone(),
            needs_tm: self.move_text().to_string(),
            mega: self.mega_text().to_string(),
            score: self.score(),
            notes: self.notes.clone(),
        }
    }
}

/// Display values for one entry, in [`HEADERS`] order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreboardRow {
    pub name: String,
    pub ivs: String,
    pub final_form: String,
    pub role: String,
    pub needs_tm: String,
    pub mega: String,
    pub score: f64,
    pub notes: String,
}

impl ScoreboardRow {
    /// Cell text for each column
    pub fn cells(&self) -> [String; 8] {
        [
            self.name.clone(),
            self.ivs.clone(),
            self.final_form.clone(),
            self.role.clone(),
            self.needs_tm.clone(),
            self.mega.clone(),
            format!("{:.1}", self.score),
            self.notes.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert_eq!(RaidEntry::new("  ", [1, 2, 3], 70.0), Err(EntryError::EmptyName));
        assert_eq!(
            RaidEntry::new("Riolu", [14, 16, 13], 89.0),
            Err(EntryError::InvalidIvs(
                "defense IV must be between 0 and 15 (got 16)".to_string()
            ))
        );
        assert_eq!(
            RaidEntry::new("Riolu", [14, 12, 13], 100.5),
            Err(EntryError::BaseOutOfRange(100.5))
        );
        assert!(RaidEntry::new("Riolu", [14, 12, 13], 1.0).is_ok());
    }

    #[test]
    fn test_display_helpers() {
        let entry = RaidEntry::new("Starly", [14, 12, 15], 77.0)
            .unwrap()
            .with_best_buddy(true)
            .with_lucky(true)
            .with_shadow(true);
        assert_eq!(entry.display_name(), "Starly (lucky) (shadow) (best buddy)");
        assert_eq!(entry.iv_text(), "14/12/15");
        assert_eq!(entry.mega_text(), "No");
        assert_eq!(entry.move_text(), "No");

        let entry = entry.with_mega(false, true).with_needs_special_move(true);
        assert_eq!(entry.mega_text(), "Soon");
        assert_eq!(entry.move_text(), "Yes");
    }

    #[test]
    fn test_row() {
        let entry = RaidEntry::new("Riolu #1", [14, 12, 13], 89.0)
            .unwrap()
            .with_final_form("Lucario")
            .with_role("Fighting DPS")
            .with_needs_special_move(true)
            .with_notes("Aura Sphere is event-only.");
        let row = entry.to_row();
        // 89 + 2.7 - 2
        assert!((row.score - 89.7).abs() < 1e-9);
        let cells = row.cells();
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(cells[0], "Riolu #1");
        assert_eq!(cells[1], "14/12/13");
        assert_eq!(cells[4], "Yes");
        assert_eq!(cells[5], "No");
        assert_eq!(cells[6], "89.7");
    }
}

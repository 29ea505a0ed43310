use serde::Serialize;
use std::fmt;

use crate::entry::{RaidEntry, ScoreboardRow};

/// Build priority derived from a raid score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PriorityTier {
    S,
    A,
    B,
    C,
    D,
}

impl PriorityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PriorityTier::S
        } else if score >= 85.0 {
            PriorityTier::A
        } else if score >= 78.0 {
            PriorityTier::B
        } else if score >= 70.0 {
            PriorityTier::C
        } else {
            PriorityTier::D
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::S => "S (Build ASAP)",
            PriorityTier::A => "A (High)",
            PriorityTier::B => "B (Good)",
            PriorityTier::C => "C (Situational)",
            PriorityTier::D => "D (Doesn't belong on a Raids list)",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub row: ScoreboardRow,
    pub tier: PriorityTier,
}

/// Raid entries ranked by score, highest first
#[derive(Debug, Clone, Default)]
pub struct RaidBoard {
    rows: Vec<RankedRow>,
}

impl RaidBoard {
    /// Rank entries; ties keep their input order
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a RaidEntry>) -> Self {
        let mut rows: Vec<RankedRow> = entries
            .into_iter()
            .map(|entry| {
                let row = entry.to_row();
                let tier = PriorityTier::from_score(row.score);
                RankedRow { row, tier }
            })
            .collect();
        rows.sort_by(|a, b| b.row.score.total_cmp(&a.row.score));
        tracing::debug!(rows = rows.len(), "built raid board");
        RaidBoard { rows }
    }

    pub fn rows(&self) -> &[RankedRow] {
        &self.rows
    }

    pub fn top(&self, n: usize) -> &[RankedRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in a given tier, in rank order
    pub fn tier(&self, tier: PriorityTier) -> impl Iterator<Item = &RankedRow> {
        self.rows.iter().filter(move |r| r.tier == tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(PriorityTier::from_score(90.0), PriorityTier::S);
        assert_eq!(PriorityTier::from_score(89.9), PriorityTier::A);
        assert_eq!(PriorityTier::from_score(85.0), PriorityTier::A);
        assert_eq!(PriorityTier::from_score(78.0), PriorityTier::B);
        assert_eq!(PriorityTier::from_score(70.0), PriorityTier::C);
        assert_eq!(PriorityTier::from_score(69.9), PriorityTier::D);
        assert_eq!(PriorityTier::S.to_string(), "S (Build ASAP)");
        assert_eq!(
            PriorityTier::D.label(),
            "D (Doesn't belong on a Raids list)"
        );
    }

    #[test]
    fn test_board_is_sorted_and_stable() {
        let entries = vec![
            RaidEntry::new("Exeggutor", [15, 13, 13], 70.0).unwrap(),
            RaidEntry::new("Riolu #1", [15, 15, 15], 88.0).unwrap(),
            RaidEntry::new("Riolu #2", [15, 15, 15], 88.0).unwrap(),
            RaidEntry::new("Snover", [14, 12, 14], 80.0)
                .unwrap()
                .with_mega(true, false),
        ];
        let board = RaidBoard::build(&entries);
        let names: Vec<&str> = board.rows().iter().map(|r| r.row.name.as_str()).collect();
        assert_eq!(names, ["Riolu #1", "Riolu #2", "Snover", "Exeggutor"]);
        assert_eq!(board.rows()[0].tier, PriorityTier::S);
        assert_eq!(board.top(2).len(), 2);
        assert_eq!(board.top(10).len(), 4);
        assert_eq!(board.tier(PriorityTier::S).count(), 2);
    }
}

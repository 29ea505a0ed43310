//! Raid score heuristic for scoreboard entries

/// Lowest raid score
pub const SCORE_MIN: f64 = 1.0;
/// Highest raid score
pub const SCORE_MAX: f64 = 100.0;

const LUCKY_BONUS: f64 = 3.0;
const NEEDS_MOVE_PENALTY: f64 = 2.0;
const MEGA_NOW_BONUS: f64 = 4.0;
const MEGA_SOON_BONUS: f64 = 1.0;

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Additive IV modifier; attack weighs four times as much as the others
pub fn iv_bonus(attack: u8, defense: u8, stamina: u8) -> f64 {
    round_to(
        f64::from(attack) / 15.0 * 2.0
            + f64::from(defense) / 15.0 * 0.5
            + f64::from(stamina) / 15.0 * 0.5,
        2,
    )
}

/// Flags that move a raid score up or down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaidBonuses {
    pub lucky: bool,
    pub needs_special_move: bool,
    pub mega_now: bool,
    pub mega_soon: bool,
}

/// `base + iv_bonus` plus flag adjustments, rounded to one decimal and
/// clamped to [1, 100]. A mega available now supersedes one coming soon.
pub fn raid_score(base: f64, iv_bonus: f64, bonuses: RaidBonuses) -> f64 {
    let mut score = base + iv_bonus;
    if bonuses.lucky {
        score += LUCKY_BONUS;
    }
    if bonuses.needs_special_move {
        score -= NEEDS_MOVE_PENALTY;
    }
    if bonuses.mega_now {
        score += MEGA_NOW_BONUS;
    } else if bonuses.mega_soon {
        score += MEGA_SOON_BONUS;
    }
    round_to(score, 1).clamp(SCORE_MIN, SCORE_MAX)
}

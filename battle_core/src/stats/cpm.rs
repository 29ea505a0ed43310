//! Combat-power multiplier table
//!
//! One entry per half level from 1.0 to 55.0. Levels above 50 are only
//! reachable through the best-buddy offset.

use crate::error::{BattleError, BattleResult};

/// Lowest tabulated level
pub const MIN_LEVEL: f64 = 1.0;
/// Highest level a trainer can power up to
pub const MAX_POWER_UP_LEVEL: f64 = 50.0;
/// Highest tabulated level
pub const MAX_LEVEL: f64 = 55.0;

const CPM_TABLE: [f64; 109] = [
    0.094, 0.1351374318, // 1
    0.16639787, 0.192650919, // 2
    0.21573247, 0.2365726613, // 3
    0.25572005, 0.2735303812, // 4
    0.29024988, 0.3060573775, // 5
    0.3210876, 0.3354450362, // 6
    0.34921268, 0.3624577511, // 7
    0.3752356, 0.387592416, // 8
    0.39956728, 0.4111935514, // 9
    0.42250001, 0.4329264091, // 10
    0.44310755, 0.4530599591, // 11
    0.46279839, 0.472336093, // 12
    0.48168495, 0.4908558003, // 13
    0.49985844, 0.508701765, // 14
    0.51739395, 0.5259425113, // 15
    0.53435433, 0.5426357375, // 16
    0.55079269, 0.5588305862, // 17
    0.56675452, 0.5745691333, // 18
    0.58227891, 0.5898879072, // 19
    0.59740001, 0.6048236651, // 20
    0.61215729, 0.6194041216, // 21
    0.62656713, 0.6336491432, // 22
    0.64065295, 0.6475809666, // 23
    0.65443563, 0.6612192524, // 24
    0.667934, 0.6745818959, // 25
    0.68116492, 0.6876849038, // 26
    0.69414365, 0.7005429688, // 27
    0.70688421, 0.7131607556, // 28
    0.71939909, 0.7255619388, // 29
    0.7317, 0.7347410093, // 30
    0.73776948, 0.7407855938, // 31
    0.74378943, 0.7467812109, // 32
    0.74976104, 0.7527290867, // 33
    0.75568551, 0.7586303683, // 34
    0.76156384, 0.7644860647, // 35
    0.76739717, 0.7702972656, // 36
    0.7731865, 0.7760649616, // 37
    0.77893275, 0.7817900548, // 38
    0.78463697, 0.7874736075, // 39
    0.79030001, 0.792803968, // 40
    0.79530001, 0.797803921, // 41
    0.8003, 0.802803892, // 42
    0.8053, 0.807803863, // 43
    0.81029999, 0.812803834, // 44
    0.81529999, 0.817803806, // 45
    0.82029999, 0.822803778, // 46
    0.82529999, 0.827803749, // 47
    0.83029999, 0.832803721, // 48
    0.83529999, 0.837803693, // 49
    0.84029999, 0.842803665, // 50
    0.84529999, 0.847803637, // 51
    0.85029999, 0.852803609, // 52
    0.85529999, 0.857803581, // 53
    0.86029999, 0.862803553, // 54
    0.86529999, // 55
];

/// Multiplier for a half-step level in [1.0, 55.0]
pub fn cpm(level: f64) -> BattleResult<f64> {
    level_index(level)
        .map(|index| CPM_TABLE[index])
        .ok_or(BattleError::InvalidLevel(level))
}

/// Table index for a level, or `None` when off-table or off-grid
fn level_index(level: f64) -> Option<usize> {
    if !level.is_finite() || !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return None;
    }
    let doubled = level * 2.0;
    if (doubled - doubled.round()).abs() > 1e-9 {
        return None;
    }
    let index = (doubled.round() as usize).checked_sub(2)?;
    (index < CPM_TABLE.len()).then_some(index)
}

/// Every half level from 1.0 to `max_level` inclusive
pub fn level_grid(max_level: f64) -> Vec<f64> {
    let steps = ((max_level.min(MAX_LEVEL) - MIN_LEVEL) * 2.0).floor();
    if steps < 0.0 {
        return Vec::new();
    }
    (0..=steps as usize)
        .map(|i| MIN_LEVEL + i as f64 * 0.5)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert!((cpm(1.0).unwrap() - 0.094).abs() < f64::EPSILON);
        assert!((cpm(33.5).unwrap() - 0.7527290867).abs() < f64::EPSILON);
        assert!((cpm(40.0).unwrap() - 0.79030001).abs() < f64::EPSILON);
        assert!((cpm(50.0).unwrap() - 0.84029999).abs() < f64::EPSILON);
        assert!((cpm(55.0).unwrap() - 0.86529999).abs() < f64::EPSILON);
    }

    #[test]
    fn test_table_is_strictly_increasing() {
        for pair in CPM_TABLE.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_rejects_off_grid_and_out_of_range() {
        assert!(matches!(cpm(0.5), Err(BattleError::InvalidLevel(_))));
        assert!(cpm(55.5).is_err());
        assert!(cpm(20.25).is_err());
        assert!(cpm(f64::NAN).is_err());
    }

    #[test]
    fn test_level_grid() {
        let grid = level_grid(50.0);
        assert_eq!(grid.len(), 99);
        assert!((grid[0] - 1.0).abs() < f64::EPSILON);
        assert!((grid[98] - 50.0).abs() < f64::EPSILON);
        assert!(grid.iter().all(|l| cpm(*l).is_ok()));
    }
}

//! Stat transform and level inference

mod cpm;
mod level;
mod transform;

pub use cpm::{cpm, level_grid, MAX_LEVEL, MAX_POWER_UP_LEVEL, MIN_LEVEL};
pub use level::{infer_level, LevelInference};
pub use transform::{combat_power, combat_stats, effective_cpm, PreMultiplierStats};

/// Added before flooring so values that land exactly on an integer survive
/// floating-point noise
pub(crate) const FLOOR_EPSILON: f64 = 1e-9;

//! Trainer-battle (PvP) scoring: closed-form move pressure, stat product,
//! league resolution and the IV optimizer

mod iv_optimizer;
mod moves;
mod pressure;
mod score;

pub use iv_optimizer::{cap_level, optimize_ivs, IvOptimum, IvSearch};
pub use moves::{PvpChargeMove, PvpFastMove, TURN_SECONDS};
pub use pressure::{
    charge_move_pressure, fast_move_pressure, move_pressure, pair_charge_pressure,
    PressureWeights, BUFF_WEIGHT, FAST_MOVE_ENERGY_WEIGHT,
};
pub use score::{
    compute_pvp_score, normalise, resolve_pvp_config, score_with_config, stat_product,
    PvpModifiers, PvpParams, PvpScore, ResolvedPvpConfig, ShieldScenario, DEFAULT_BETA,
    FALLBACK_BAIT_PROBABILITY, SHIELD_SCENARIOS,
};

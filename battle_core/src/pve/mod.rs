//! Raid (PvE) scoring: moves, rotation search and value aggregation

mod moves;
mod permutations;
mod rotation;
mod value;

pub use moves::{ChargeMove, FastMove};
pub use permutations::{compositions, MultisetPermutations};
pub use rotation::{
    best_rotation, rotation_dps, Rotation, RotationParams, ENERGY_CAP, MAX_SIMULATIONS,
    MAX_TOTAL_CHARGE_USES,
};
pub use value::{
    compute_pve_score, estimate_ehp, pve_value, PveModifiers, PveParams, PveScenario,
    PveScenarioScore, PveScore, ResolvedPve, MAX_AVAILABILITY_PENALTY,
};

//! Steady-state rotation search
//!
//! Every candidate is a cycle of charge-move uses in a fixed order, with just
//! enough fast moves in front of each charge move to afford it. Cycles are
//! enumerated by total charge uses, then by how those uses split across the
//! available charge moves, then by every distinct ordering of the split.
//!
//! A cycle usually ends with energy left over. Charging that leftover back
//! out as a fraction of a fast move turns the cycle average into the
//! asymptotic rate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::moves::{ChargeMove, FastMove};
use super::permutations::{compositions, expand_counts, MultisetPermutations};
use crate::config::PveDefaults;
use crate::damage::raw_damage;
use crate::error::{ensure_dodge, ensure_non_negative, ensure_positive, BattleError, BattleResult};

/// Energy ceiling
pub const ENERGY_CAP: f64 = 100.0;
/// Default bound on charge executions per simulated cycle
pub const MAX_TOTAL_CHARGE_USES: u32 = 6;
/// Default ceiling on simulated orderings per search
pub const MAX_SIMULATIONS: usize = 250_000;

const ENERGY_EPSILON: f64 = 1e-6;
/// A candidate must beat the incumbent by more than this to replace it
const SELECTION_TOLERANCE: f64 = 1e-9;

/// Search knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationParams {
    pub max_total_charge_uses: u32,
    /// Extra energy credited per fast move from damage taken
    pub bonus_energy_per_fast_move: f64,
    /// Fraction of time lost to dodging, in [0, 1)
    pub dodge_factor: f64,
    pub max_simulations: usize,
}

impl Default for RotationParams {
    fn default() -> Self {
        RotationParams {
            max_total_charge_uses: MAX_TOTAL_CHARGE_USES,
            bonus_energy_per_fast_move: 0.0,
            dodge_factor: 0.0,
            max_simulations: MAX_SIMULATIONS,
        }
    }
}

impl RotationParams {
    pub fn from_defaults(defaults: &PveDefaults) -> Self {
        RotationParams {
            max_total_charge_uses: defaults.max_total_charge_uses,
            max_simulations: defaults.max_simulations,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> BattleResult<()> {
        ensure_non_negative("bonus energy per fast move", self.bonus_energy_per_fast_move)?;
        ensure_dodge("dodge factor", self.dodge_factor)?;
        if self.max_simulations == 0 {
            return Err(BattleError::OutOfRange {
                field: "max simulations",
                requirement: "at least 1",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// The best cycle found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Asymptotic damage per second, after any dodge scaling
    pub dps: f64,
    pub cycle_damage: f64,
    pub cycle_time: f64,
    /// Fractional after the leftover-energy correction
    pub fast_moves_per_cycle: f64,
    pub charge_usage: BTreeMap<String, u32>,
}

struct Simulation {
    damage: f64,
    time: f64,
    fast_moves: u32,
    ending_energy: f64,
}

/// Per-search constants shared by every simulated ordering
struct Search<'a> {
    fast: &'a FastMove,
    charges: &'a [ChargeMove],
    fast_damage: f64,
    charge_damages: Vec<f64>,
    energy_per_fast: f64,
}

impl Search<'_> {
    fn simulate(&self, sequence: &[usize]) -> Option<Simulation> {
        let mut energy = 0.0_f64;
        let mut damage = 0.0;
        let mut time = 0.0;
        let mut fast_moves = 0_u32;

        for &index in sequence {
            let charge = &self.charges[index];
            while energy + ENERGY_EPSILON < charge.energy_cost {
                if energy >= ENERGY_CAP - ENERGY_EPSILON {
                    // Capped and still short; unreachable with validated costs
                    return None;
                }
                energy = (energy + self.energy_per_fast).min(ENERGY_CAP);
                damage += self.fast_damage;
                time += self.fast.duration;
                fast_moves += 1;
            }
            energy -= charge.energy_cost;
            damage += self.charge_damages[index];
            time += charge.duration;
        }

        Some(Simulation {
            damage,
            time,
            fast_moves,
            ending_energy: energy.max(0.0),
        })
    }

    /// Remove the leftover energy as a fractional fast move
    fn correct(&self, sim: &Simulation) -> Option<(f64, f64, f64, f64)> {
        if sim.fast_moves == 0 {
            return None;
        }
        let fraction = sim.ending_energy / self.energy_per_fast;
        let fast_moves = f64::from(sim.fast_moves) - fraction;
        if fast_moves < 0.0 {
            return None;
        }
        let time = sim.time - self.fast.duration * fraction;
        if time <= 0.0 {
            return None;
        }
        let damage = sim.damage - self.fast_damage * fraction;
        Some((damage / time, damage, time, fast_moves))
    }

    fn usage(&self, sequence: &[usize]) -> BTreeMap<String, u32> {
        let mut usage = BTreeMap::new();
        for &index in sequence {
            *usage.entry(self.charges[index].name.clone()).or_insert(0) += 1;
        }
        usage
    }
}

/// Find the damage-per-second-maximizing cycle for one fast move and up to
/// a handful of charge moves.
///
/// Fast-move-only play is always a candidate. Ties within a tiny tolerance
/// keep the first cycle found, so results never flip between equivalent
/// orderings.
pub fn best_rotation(
    fast: &FastMove,
    charges: &[ChargeMove],
    attacker_attack: f64,
    defender_defense: f64,
    params: &RotationParams,
) -> BattleResult<Rotation> {
    fast.validate()?;
    for charge in charges {
        charge.validate()?;
    }
    ensure_non_negative("attacker attack", attacker_attack)?;
    ensure_positive("defender defense", defender_defense)?;
    params.validate()?;

    let damage_of = |power: f64, multiplier: f64| {
        f64::from(raw_damage(power, attacker_attack, defender_defense, multiplier))
    };
    let search = Search {
        fast,
        charges,
        fast_damage: damage_of(fast.power, fast.bonuses.multiplier()),
        charge_damages: charges
            .iter()
            .map(|c| damage_of(c.power, c.bonuses.multiplier()))
            .collect(),
        energy_per_fast: fast.energy_gain + params.bonus_energy_per_fast_move,
    };

    let mut best = Rotation {
        dps: search.fast_damage / fast.duration,
        cycle_damage: search.fast_damage,
        cycle_time: fast.duration,
        fast_moves_per_cycle: 1.0,
        charge_usage: BTreeMap::new(),
    };

    let mut simulations = 0_usize;
    let mut exhausted = false;
    'search: for total in 1..=params.max_total_charge_uses {
        for counts in compositions(total, charges.len()) {
            for sequence in MultisetPermutations::new(expand_counts(&counts)) {
                if simulations >= params.max_simulations {
                    exhausted = true;
                    break 'search;
                }
                simulations += 1;

                let Some(sim) = search.simulate(&sequence) else {
                    continue;
                };
                let Some((dps, damage, time, fast_moves)) = search.correct(&sim) else {
                    continue;
                };
                if dps > best.dps + SELECTION_TOLERANCE {
                    best = Rotation {
                        dps,
                        cycle_damage: damage,
                        cycle_time: time,
                        fast_moves_per_cycle: fast_moves,
                        charge_usage: search.usage(&sequence),
                    };
                }
            }
        }
    }

    if exhausted {
        tracing::warn!(
            simulations,
            limit = params.max_simulations,
            "rotation search hit its simulation ceiling; returning best so far"
        );
    }
    if !best.dps.is_finite() {
        return Err(BattleError::NoFeasibleRotation);
    }

    best.dps *= 1.0 - params.dodge_factor;
    tracing::debug!(
        fast = %fast.name,
        charges = charges.len(),
        simulations,
        dps = best.dps,
        "rotation search complete"
    );
    Ok(best)
}

/// Best-rotation damage per second
pub fn rotation_dps(
    fast: &FastMove,
    charges: &[ChargeMove],
    attacker_attack: f64,
    defender_defense: f64,
    params: &RotationParams,
) -> BattleResult<f64> {
    best_rotation(fast, charges, attacker_attack, defender_defense, params).map(|r| r.dps)
}

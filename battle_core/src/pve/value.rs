//! Raid value: rotation output blended with durability and context

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::moves::{ChargeMove, FastMove};
use super::rotation::{best_rotation, Rotation, RotationParams};
use crate::config::PveDefaults;
use crate::error::{
    ensure_dodge, ensure_non_negative, ensure_open_unit, ensure_positive, BattleError,
    BattleResult,
};
use crate::types::CombatStats;

/// Highest availability penalty honoured; larger inputs are clamped
pub const MAX_AVAILABILITY_PENALTY: f64 = 0.99;

/// `hp * defense / target_defense`
pub fn estimate_ehp(defense: f64, hp: u32, target_defense: f64) -> BattleResult<f64> {
    ensure_positive("defense", defense)?;
    ensure_positive("hp", f64::from(hp))?;
    ensure_positive("target defense", target_defense)?;
    Ok(f64::from(hp) * (defense / target_defense))
}

/// Weighted geometric mean `dps^alpha * tdo^(1 - alpha)`
pub fn pve_value(dps: f64, tdo: f64, alpha: f64) -> BattleResult<f64> {
    ensure_open_unit("alpha", alpha)?;
    ensure_non_negative("dps", dps)?;
    ensure_non_negative("tdo", tdo)?;
    Ok(dps.powf(alpha) * tdo.powf(1.0 - alpha))
}

/// One weighted opponent profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PveScenario {
    pub weight: f64,
    pub target_defense: f64,
    pub incoming_dps: f64,
}

/// Optional contextual adjustments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PveModifiers {
    /// Breakpoints this build reaches that others do not
    #[serde(default)]
    pub breakpoint_hits: Option<u32>,
    /// Type coverage in [-1, 1]; negative for liabilities
    #[serde(default)]
    pub coverage: Option<f64>,
    /// Penalty for hard-to-get moves, clamped to [0, 0.99]
    #[serde(default)]
    pub availability_penalty: Option<f64>,
}

/// Caller-facing raid scoring request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PveParams {
    pub target_defense: f64,
    pub incoming_dps: f64,
    pub alpha: f64,
    pub max_total_charge_uses: u32,
    pub max_simulations: usize,
    pub breakpoint_kappa: f64,
    pub coverage_theta: f64,
    pub energy_from_damage_ratio: Option<f64>,
    pub dodge_factor: Option<f64>,
    pub relobby_phi: Option<f64>,
    pub modifiers: PveModifiers,
    pub scenarios: Vec<PveScenario>,
}

impl PveParams {
    /// Request against one opponent profile with stock defaults
    pub fn new(target_defense: f64, incoming_dps: f64) -> Self {
        Self::from_defaults(&PveDefaults::default(), target_defense, incoming_dps)
    }

    pub fn from_defaults(defaults: &PveDefaults, target_defense: f64, incoming_dps: f64) -> Self {
        PveParams {
            target_defense,
            incoming_dps,
            alpha: defaults.alpha,
            max_total_charge_uses: defaults.max_total_charge_uses,
            max_simulations: defaults.max_simulations,
            breakpoint_kappa: defaults.breakpoint_kappa,
            coverage_theta: defaults.coverage_theta,
            energy_from_damage_ratio: defaults.energy_from_damage_ratio,
            dodge_factor: None,
            relobby_phi: defaults.relobby_phi,
            modifiers: PveModifiers::default(),
            scenarios: Vec::new(),
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_dodge(mut self, dodge_factor: f64) -> Self {
        self.dodge_factor = Some(dodge_factor);
        self
    }

    pub fn with_energy_from_damage(mut self, ratio: f64) -> Self {
        self.energy_from_damage_ratio = Some(ratio);
        self
    }

    pub fn with_relobby(mut self, phi: f64) -> Self {
        self.relobby_phi = Some(phi);
        self
    }

    pub fn with_modifiers(mut self, modifiers: PveModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_scenarios(mut self, scenarios: Vec<PveScenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Validate everything and fold the optional knobs into concrete values
    pub fn resolve(&self) -> BattleResult<ResolvedPve> {
        ensure_positive("target defense", self.target_defense)?;
        ensure_positive("incoming dps", self.incoming_dps)?;
        ensure_open_unit("alpha", self.alpha)?;
        let energy_ratio = self
            .energy_from_damage_ratio
            .map(|r| ensure_non_negative("energy from damage ratio", r))
            .transpose()?;
        let dodge = self
            .dodge_factor
            .map(|d| ensure_dodge("dodge factor", d))
            .transpose()?;
        let relobby_phi = self
            .relobby_phi
            .map(|phi| ensure_non_negative("relobby phi", phi))
            .transpose()?;

        let mut factors = BTreeMap::new();
        if let Some(hits) = self.modifiers.breakpoint_hits {
            ensure_non_negative("breakpoint kappa", self.breakpoint_kappa)?;
            factors.insert(
                "breakpoint_bonus".to_string(),
                1.0 + self.breakpoint_kappa * f64::from(hits),
            );
        }
        if let Some(coverage) = self.modifiers.coverage {
            if !(-1.0..=1.0).contains(&coverage) {
                return Err(BattleError::OutOfRange {
                    field: "coverage",
                    requirement: "within [-1, 1]",
                    value: coverage,
                });
            }
            ensure_non_negative("coverage theta", self.coverage_theta)?;
            factors.insert(
                "coverage_adjustment".to_string(),
                1.0 + self.coverage_theta * coverage,
            );
        }
        if let Some(penalty) = self.modifiers.availability_penalty {
            if penalty.is_nan() {
                return Err(BattleError::OutOfRange {
                    field: "availability penalty",
                    requirement: "a number",
                    value: penalty,
                });
            }
            let clamped = penalty.clamp(0.0, MAX_AVAILABILITY_PENALTY);
            factors.insert("availability_penalty".to_string(), 1.0 - clamped);
        }

        if !self.scenarios.is_empty() {
            let mut total_weight = 0.0;
            for scenario in &self.scenarios {
                total_weight += ensure_non_negative("scenario weight", scenario.weight)?;
                ensure_positive("scenario target defense", scenario.target_defense)?;
                ensure_positive("scenario incoming dps", scenario.incoming_dps)?;
            }
            ensure_positive("total scenario weight", total_weight)?;
        }

        Ok(ResolvedPve {
            target_defense: self.target_defense,
            incoming_dps: self.incoming_dps,
            alpha: self.alpha,
            rotation: RotationParams {
                max_total_charge_uses: self.max_total_charge_uses,
                max_simulations: self.max_simulations,
                dodge_factor: dodge.unwrap_or(0.0),
                ..RotationParams::default()
            },
            energy_from_damage_ratio: energy_ratio,
            dodge_factor: dodge,
            relobby_phi,
            modifiers: factors,
            scenarios: self.scenarios.clone(),
        })
    }
}

/// A fully validated raid request
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPve {
    pub target_defense: f64,
    pub incoming_dps: f64,
    pub alpha: f64,
    /// Energy bonus is filled in per opponent profile
    pub rotation: RotationParams,
    pub energy_from_damage_ratio: Option<f64>,
    pub dodge_factor: Option<f64>,
    pub relobby_phi: Option<f64>,
    /// Multiplicative factors keyed by modifier name
    pub modifiers: BTreeMap<String, f64>,
    pub scenarios: Vec<PveScenario>,
}

/// Per-scenario breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PveScenarioScore {
    pub weight: f64,
    pub target_defense: f64,
    pub incoming_dps: f64,
    pub dps: f64,
    pub ehp: f64,
    pub tdo: f64,
    pub value: f64,
    pub modifiers: BTreeMap<String, f64>,
}

/// Full raid scoring breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PveScore {
    pub dps: f64,
    pub cycle_damage: f64,
    pub cycle_time: f64,
    pub fast_moves_per_cycle: f64,
    pub charge_usage: BTreeMap<String, u32>,
    pub ehp: f64,
    pub tdo: f64,
    /// Weighted average over scenarios when any were supplied
    pub value: f64,
    /// Geometric blend before penalties and modifiers
    pub value_raw: f64,
    pub alpha: f64,
    pub energy_from_damage_ratio: Option<f64>,
    pub relobby_phi: Option<f64>,
    pub penalty_factor: f64,
    pub dodge_factor: Option<f64>,
    pub modifiers: BTreeMap<String, f64>,
    pub scenarios: Vec<PveScenarioScore>,
}

struct Evaluation {
    rotation: Rotation,
    ehp: f64,
    tdo: f64,
    value_raw: f64,
    penalty_factor: f64,
    value: f64,
}

fn evaluate(
    stats: &CombatStats,
    fast: &FastMove,
    charges: &[ChargeMove],
    resolved: &ResolvedPve,
    target_defense: f64,
    incoming_dps: f64,
) -> BattleResult<Evaluation> {
    let dodge = resolved.dodge_factor.unwrap_or(0.0);
    let incoming = incoming_dps * (1.0 - dodge);
    let rotation_params = RotationParams {
        bonus_energy_per_fast_move: resolved
            .energy_from_damage_ratio
            .map_or(0.0, |ratio| ratio * incoming * fast.duration),
        ..resolved.rotation
    };
    let rotation = best_rotation(fast, charges, stats.attack, target_defense, &rotation_params)?;

    let ehp = estimate_ehp(stats.defense, stats.hp, target_defense)?;
    let time_to_faint = ehp / incoming;
    let tdo = rotation.dps * time_to_faint;
    let value_raw = pve_value(rotation.dps, tdo, resolved.alpha)?;
    let penalty_factor = resolved.relobby_phi.map_or(1.0, |phi| (-phi * tdo).exp());
    let value = value_raw * penalty_factor * resolved.modifiers.values().product::<f64>();

    Ok(Evaluation {
        rotation,
        ehp,
        tdo,
        value_raw,
        penalty_factor,
        value,
    })
}

/// Score a raid attacker: best rotation, durability, blended value and breakdown
pub fn compute_pve_score(
    stats: &CombatStats,
    fast: &FastMove,
    charges: &[ChargeMove],
    params: &PveParams,
) -> BattleResult<PveScore> {
    ensure_positive("attacker attack", stats.attack)?;
    ensure_positive("attacker defense", stats.defense)?;
    let resolved = params.resolve()?;

    let base = evaluate(
        stats,
        fast,
        charges,
        &resolved,
        resolved.target_defense,
        resolved.incoming_dps,
    )?;

    let mut scenarios = Vec::with_capacity(resolved.scenarios.len());
    for scenario in &resolved.scenarios {
        let eval = evaluate(
            stats,
            fast,
            charges,
            &resolved,
            scenario.target_defense,
            scenario.incoming_dps,
        )?;
        scenarios.push(PveScenarioScore {
            weight: scenario.weight,
            target_defense: scenario.target_defense,
            incoming_dps: scenario.incoming_dps,
            dps: eval.rotation.dps,
            ehp: eval.ehp,
            tdo: eval.tdo,
            value: eval.value,
            modifiers: resolved.modifiers.clone(),
        });
    }

    let value = if scenarios.is_empty() {
        base.value
    } else {
        let total: f64 = scenarios.iter().map(|s| s.weight).sum();
        scenarios.iter().map(|s| s.weight * s.value).sum::<f64>() / total
    };

    Ok(PveScore {
        dps: base.rotation.dps,
        cycle_damage: base.rotation.cycle_damage,
        cycle_time: base.rotation.cycle_time,
        fast_moves_per_cycle: base.rotation.fast_moves_per_cycle,
        charge_usage: base.rotation.charge_usage,
        ehp: base.ehp,
        tdo: base.tdo,
        value,
        value_raw: base.value_raw,
        alpha: resolved.alpha,
        energy_from_damage_ratio: resolved.energy_from_damage_ratio,
        relobby_phi: resolved.relobby_phi,
        penalty_factor: base.penalty_factor,
        dodge_factor: resolved.dodge_factor,
        modifiers: resolved.modifiers,
        scenarios,
    })
}

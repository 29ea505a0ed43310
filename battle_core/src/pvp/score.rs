//! Trainer-battle score: stat product and move pressure blended per league

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::moves::{PvpChargeMove, PvpFastMove};
use super::pressure::{move_pressure, PressureWeights};
use crate::config::{BaitModel, LeagueTable, PvpDefaults};
use crate::error::{
    ensure_non_negative, ensure_open_unit, ensure_positive, ensure_probability, BattleError,
    BattleResult,
};
use crate::pve::MAX_AVAILABILITY_PENALTY;
use crate::types::CombatStats;

/// Stat-product weight when none is configured
pub const DEFAULT_BETA: f64 = 0.52;
/// Bait probability when neither caller nor league supplies one
pub const FALLBACK_BAIT_PROBABILITY: f64 = 0.5;
/// Shield counts covered by scenario blending
pub const SHIELD_SCENARIOS: usize = 3;
/// Shield count assumed by the bait model outside scenario blending
const SINGLE_SCENARIO_SHIELDS: u8 = 1;

/// `attack * defense * stamina`
pub fn stat_product(attack: f64, defense: f64, stamina: u32) -> BattleResult<f64> {
    ensure_positive("attack", attack)?;
    ensure_positive("defense", defense)?;
    ensure_positive("stamina", f64::from(stamina))?;
    Ok(attack * defense * f64::from(stamina))
}

/// `value / reference`
pub fn normalise(value: f64, reference: f64) -> BattleResult<f64> {
    ensure_positive("normalisation reference", reference)?;
    Ok(value / reference)
}

/// Optional contextual adjustments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PvpModifiers {
    /// Attack-stat percentile among peers, in [0, 1]
    #[serde(default)]
    pub cmp_percentile: Option<f64>,
    #[serde(default)]
    pub breakpoint_hits: Option<u32>,
    /// Type coverage in [-1, 1]
    #[serde(default)]
    pub coverage: Option<f64>,
    #[serde(default)]
    pub availability_penalty: Option<f64>,
    /// How well the build counters the current meta, in [0, 1]
    #[serde(default)]
    pub anti_meta: Option<f64>,
}

/// Caller-facing trainer-battle scoring request; unset fields fall back to
/// the league's values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpParams {
    pub league: String,
    pub beta: Option<f64>,
    pub stat_product_reference: Option<f64>,
    pub move_pressure_reference: Option<f64>,
    pub bait_probability: Option<f64>,
    pub shield_weights: Option<Vec<f64>>,
    pub bait_model: Option<BaitModel>,
    pub weights: PressureWeights,
    pub breakpoint_kappa: f64,
    pub cmp_threshold: Option<f64>,
    pub cmp_eta: Option<f64>,
    pub modifiers: PvpModifiers,
}

impl PvpParams {
    pub fn new(league: &str) -> Self {
        Self::from_defaults(&PvpDefaults::default(), league)
    }

    pub fn from_defaults(defaults: &PvpDefaults, league: &str) -> Self {
        PvpParams {
            league: league.to_string(),
            beta: Some(defaults.beta),
            stat_product_reference: None,
            move_pressure_reference: None,
            bait_probability: None,
            shield_weights: defaults.shield_weights.clone(),
            bait_model: defaults.bait_model,
            weights: PressureWeights {
                energy_weight: defaults.energy_weight,
                buff_weight: defaults.buff_weight,
            },
            breakpoint_kappa: defaults.breakpoint_kappa,
            cmp_threshold: None,
            cmp_eta: None,
            modifiers: PvpModifiers::default(),
        }
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn with_references(mut self, stat_product: f64, move_pressure: f64) -> Self {
        self.stat_product_reference = Some(stat_product);
        self.move_pressure_reference = Some(move_pressure);
        self
    }

    pub fn with_bait_probability(mut self, probability: f64) -> Self {
        self.bait_probability = Some(probability);
        self
    }

    pub fn with_shield_weights(mut self, weights: Vec<f64>) -> Self {
        self.shield_weights = Some(weights);
        self
    }

    pub fn with_bait_model(mut self, model: BaitModel) -> Self {
        self.bait_model = Some(model);
        self
    }

    pub fn with_weights(mut self, weights: PressureWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_cmp(mut self, threshold: f64, eta: f64) -> Self {
        self.cmp_threshold = Some(threshold);
        self.cmp_eta = Some(eta);
        self
    }

    pub fn with_modifiers(mut self, modifiers: PvpModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A fully validated trainer-battle request
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPvpConfig {
    pub league: String,
    pub cp_cap: Option<u32>,
    pub beta: f64,
    pub stat_product_reference: f64,
    pub move_pressure_reference: f64,
    pub weights: PressureWeights,
    /// Caller override; wins over every other source
    pub explicit_bait_probability: Option<f64>,
    pub bait_model: Option<BaitModel>,
    /// League static value, or the fallback
    pub default_bait_probability: f64,
    pub shield_weights: Option<[f64; SHIELD_SCENARIOS]>,
    /// Multiplicative factors keyed by modifier name
    pub modifiers: BTreeMap<String, f64>,
}

impl ResolvedPvpConfig {
    /// Bait probability for `fast` facing `shields` shields
    pub fn bait_probability(&self, fast: &PvpFastMove, shields: u8) -> f64 {
        if let Some(p) = self.explicit_bait_probability {
            return p;
        }
        match &self.bait_model {
            Some(model) => {
                model.probability(fast.energy_per_second(), fast.damage_per_second(), shields)
            }
            None => self.default_bait_probability,
        }
    }
}

fn resolve_shield_weights(weights: &[f64]) -> BattleResult<[f64; SHIELD_SCENARIOS]> {
    let resolved: [f64; SHIELD_SCENARIOS] = weights.try_into().map_err(|_| {
        BattleError::InvalidShieldWeights(format!(
            "expected {} weights, got {}",
            SHIELD_SCENARIOS,
            weights.len()
        ))
    })?;
    if resolved.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(BattleError::InvalidShieldWeights(
            "weights must be non-negative".to_string(),
        ));
    }
    if resolved.iter().sum::<f64>() <= 0.0 {
        return Err(BattleError::InvalidShieldWeights(
            "weights must not all be zero".to_string(),
        ));
    }
    Ok(resolved)
}

/// Layer the request over its league and validate the result
pub fn resolve_pvp_config(
    leagues: &LeagueTable,
    params: &PvpParams,
) -> BattleResult<ResolvedPvpConfig> {
    let league = leagues.get(&params.league)?;

    let beta = ensure_open_unit("beta", params.beta.unwrap_or(DEFAULT_BETA))?;
    let stat_product_reference = ensure_positive(
        "stat product reference",
        params
            .stat_product_reference
            .unwrap_or(league.stat_product_reference),
    )?;
    let move_pressure_reference = ensure_positive(
        "move pressure reference",
        params
            .move_pressure_reference
            .unwrap_or(league.move_pressure_reference),
    )?;
    params.weights.validate()?;
    let explicit_bait_probability = params
        .bait_probability
        .map(|p| ensure_probability("bait probability", p))
        .transpose()?;
    let default_bait_probability = ensure_probability(
        "league bait probability",
        league.bait_probability.unwrap_or(FALLBACK_BAIT_PROBABILITY),
    )?;
    let shield_weights = params
        .shield_weights
        .as_ref()
        .or(league.shield_weights.as_ref())
        .map(|w| resolve_shield_weights(w))
        .transpose()?;

    let mut factors = BTreeMap::new();
    let modifiers = &params.modifiers;
    if let Some(percentile) = modifiers.cmp_percentile {
        ensure_probability("cmp percentile", percentile)?;
        let threshold = params.cmp_threshold.unwrap_or(league.cmp_threshold);
        let eta = ensure_non_negative("cmp eta", params.cmp_eta.unwrap_or(league.cmp_eta))?;
        if percentile > threshold {
            factors.insert("cmp_bonus".to_string(), 1.0 + eta);
        }
    }
    if let Some(hits) = modifiers.breakpoint_hits {
        ensure_non_negative("breakpoint kappa", params.breakpoint_kappa)?;
        factors.insert(
            "breakpoint_bonus".to_string(),
            1.0 + params.breakpoint_kappa * f64::from(hits),
        );
    }
    if let Some(coverage) = modifiers.coverage {
        if !(-1.0..=1.0).contains(&coverage) {
            return Err(BattleError::OutOfRange {
                field: "coverage",
                requirement: "within [-1, 1]",
                value: coverage,
            });
        }
        factors.insert(
            "coverage_bonus".to_string(),
            1.0 + league.coverage_theta * coverage,
        );
    }
    if let Some(penalty) = modifiers.availability_penalty {
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
    if let Some(anti_meta) = modifiers.anti_meta {
        ensure_probability("anti-meta", anti_meta)?;
        factors.insert(
            "anti_meta_bonus".to_string(),
            1.0 + league.anti_meta_mu * anti_meta,
        );
    }

    Ok(ResolvedPvpConfig {
        league: league.name.clone(),
        cp_cap: league.cp_cap,
        beta,
        stat_product_reference,
        move_pressure_reference,
        weights: params.weights,
        explicit_bait_probability,
        bait_model: params.bait_model.or(league.bait_model),
        default_bait_probability,
        shield_weights,
        modifiers: factors,
    })
}

/// Move pressure under one shield count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldScenario {
    pub shield_count: u8,
    pub bait_probability: f64,
    pub move_pressure: f64,
    pub weight: f64,
}

/// Full trainer-battle scoring breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvpScore {
    pub stat_product: f64,
    pub stat_product_normalised: f64,
    /// Weighted average over shield scenarios when blending
    pub move_pressure: f64,
    pub move_pressure_normalised: f64,
    pub score: f64,
    pub beta: f64,
    /// `None` when shield scenarios were blended
    pub bait_probability: Option<f64>,
    pub shield_breakdown: Vec<ShieldScenario>,
    pub modifiers: BTreeMap<String, f64>,
}

/// Score a build against an already-resolved league configuration
pub fn score_with_config(
    stats: &CombatStats,
    fast: &PvpFastMove,
    charges: &[PvpChargeMove],
    config: &ResolvedPvpConfig,
) -> BattleResult<PvpScore> {
    let sp = stat_product(stats.attack, stats.defense, stats.hp)?;
    let sp_norm = normalise(sp, config.stat_product_reference)?;

    let (mp, bait_probability, shield_breakdown) = match config.shield_weights {
        Some(weights) => {
            let total: f64 = weights.iter().sum();
            let mut breakdown = Vec::with_capacity(SHIELD_SCENARIOS);
            let mut blended = 0.0;
            for (shield_count, weight) in (0u8..).zip(weights) {
                let p = config.bait_probability(fast, shield_count);
                let pressure = move_pressure(fast, charges, p, &config.weights)?;
                blended += weight * pressure;
                breakdown.push(ShieldScenario {
                    shield_count,
                    bait_probability: p,
                    move_pressure: pressure,
                    weight,
                });
            }
            (blended / total, None, breakdown)
        }
        None => {
            let p = config.bait_probability(fast, SINGLE_SCENARIO_SHIELDS);
            let pressure = move_pressure(fast, charges, p, &config.weights)?;
            (pressure, Some(p), Vec::new())
        }
    };
    let mp_norm = normalise(mp, config.move_pressure_reference)?;

    let blended = sp_norm.powf(config.beta) * mp_norm.powf(1.0 - config.beta);
    let score = blended * config.modifiers.values().product::<f64>();

    Ok(PvpScore {
        stat_product: sp,
        stat_product_normalised: sp_norm,
        move_pressure: mp,
        move_pressure_normalised: mp_norm,
        score,
        beta: config.beta,
        bait_probability,
        shield_breakdown,
        modifiers: config.modifiers.clone(),
    })
}

/// Score a trainer-battle build: stat product, move pressure and modifiers
pub fn compute_pvp_score(
    stats: &CombatStats,
    fast: &PvpFastMove,
    charges: &[PvpChargeMove],
    leagues: &LeagueTable,
    params: &PvpParams,
) -> BattleResult<PvpScore> {
    let config = resolve_pvp_config(leagues, params)?;
    score_with_config(stats, fast, charges, &config)
}

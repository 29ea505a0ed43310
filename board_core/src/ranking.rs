//! Parallel ranking batches over a species repository
//!
//! Every species with a learnset is scored with each fast move paired with
//! every one- or two-move charge set; the best set represents the species.

use battle_core::config::LeagueTable;
use battle_core::damage::breakpoints_between;
use battle_core::pve::{compute_pve_score, ChargeMove, FastMove, PveParams, PveScore};
use battle_core::pvp::{
    cap_level, optimize_ivs, resolve_pvp_config, score_with_config, IvSearch, PvpChargeMove,
    PvpFastMove, PvpParams, PvpScore, ResolvedPvpConfig,
};
use battle_core::stats::{combat_power, combat_stats, MAX_POWER_UP_LEVEL};
use battle_core::{BattleError, CombatStats, IvSpread, StatModifiers};
use dex_core::{DexError, MoveBook, Species, SpeciesRepository};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::learnsets::{Learnset, Learnsets};
use crate::BoardError;

/// Default level for raid rankings
const DEFAULT_PVE_LEVEL: f64 = 40.0;

/// Reference data shared by every ranking batch
#[derive(Debug, Clone, Copy)]
pub struct BoardInputs<'a> {
    pub species: &'a SpeciesRepository,
    pub moves: &'a MoveBook,
    pub learnsets: &'a Learnsets,
}

/// How IVs are chosen for a trainer-battle ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum IvMode {
    /// Same spread for every species, levelled up to the cap
    Fixed(IvSpread),
    /// Stat-product-maximal spread under the cap
    MaxStatProduct { iv_floor: u8 },
}

impl Default for IvMode {
    fn default() -> Self {
        IvMode::MaxStatProduct { iv_floor: 0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PvpRankOptions {
    pub params: PvpParams,
    pub iv_mode: IvMode,
    pub max_level: f64,
    pub modifiers: StatModifiers,
}

impl PvpRankOptions {
    pub fn new(params: PvpParams) -> Self {
        PvpRankOptions {
            params,
            iv_mode: IvMode::default(),
            max_level: MAX_POWER_UP_LEVEL,
            modifiers: StatModifiers::default(),
        }
    }

    pub fn with_iv_mode(mut self, iv_mode: IvMode) -> Self {
        self.iv_mode = iv_mode;
        self
    }

    pub fn with_max_level(mut self, max_level: f64) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_modifiers(mut self, modifiers: StatModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Best trainer-battle build for one species
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PvpRanking {
    pub species: String,
    pub league: String,
    pub level: f64,
    pub ivs: IvSpread,
    pub cp: u32,
    pub stats: CombatStats,
    pub score: PvpScore,
    pub fast: String,
    pub charges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PveRankOptions {
    pub params: PveParams,
    pub ivs: IvSpread,
    pub level: f64,
    pub modifiers: StatModifiers,
    pub weather_boosted: bool,
    pub type_effectiveness: f64,
    /// Feed the fast move's attack-IV breakpoints into the breakpoint bonus
    pub count_breakpoints: bool,
}

impl PveRankOptions {
    pub fn new(params: PveParams) -> Self {
        PveRankOptions {
            params,
            ivs: IvSpread::perfect(),
            level: DEFAULT_PVE_LEVEL,
            modifiers: StatModifiers::default(),
            weather_boosted: false,
            type_effectiveness: 1.0,
            count_breakpoints: false,
        }
    }

    pub fn with_ivs(mut self, ivs: IvSpread) -> Self {
        self.ivs = ivs;
        self
    }

    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    pub fn with_modifiers(mut self, modifiers: StatModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_weather(mut self, weather_boosted: bool) -> Self {
        self.weather_boosted = weather_boosted;
        self
    }

    pub fn with_type_effectiveness(mut self, type_effectiveness: f64) -> Self {
        self.type_effectiveness = type_effectiveness;
        self
    }

    pub fn with_breakpoints(mut self, count_breakpoints: bool) -> Self {
        self.count_breakpoints = count_breakpoints;
        self
    }
}

/// Best raid build for one species
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PveRanking {
    pub species: String,
    pub level: f64,
    pub ivs: IvSpread,
    pub stats: CombatStats,
    pub score: PveScore,
    pub fast: String,
    pub charges: Vec<String>,
}

/// Index sets of every single charge move and every unordered pair
fn charge_sets(count: usize) -> Vec<Vec<usize>> {
    let mut sets: Vec<Vec<usize>> = (0..count).map(|i| vec![i]).collect();
    for i in 0..count {
        for j in (i + 1)..count {
            sets.push(vec![i, j]);
        }
    }
    sets
}

/// Species-level modifiers layered over the caller's
fn species_modifiers(species: &Species, modifiers: StatModifiers) -> StatModifiers {
    StatModifiers {
        shadow: modifiers.shadow || species.is_shadow_variant(),
        ..modifiers
    }
}

fn unknown_move(species: &Species, error: DexError) -> BoardError {
    match error {
        DexError::UnknownMove(name) => {
            warn!(species = %species.name, name = %name, "learnset names an unknown move");
            BoardError::UnknownMove {
                species: species.name.clone(),
                name,
            }
        }
        other => BoardError::Dex(other),
    }
}

/// Trainer-battle moves from a learnset; moves without PvP data are dropped
fn pvp_moves(
    moves: &MoveBook,
    species: &Species,
    learnset: &Learnset,
) -> Result<(Vec<PvpFastMove>, Vec<PvpChargeMove>), BoardError> {
    let mut fasts = Vec::with_capacity(learnset.fast.len());
    for name in &learnset.fast {
        let record = moves.fast(name).map_err(|e| unknown_move(species, e))?;
        match PvpFastMove::from_record(record) {
            Ok(fast) => fasts.push(fast),
            Err(BattleError::MissingPvpData(name)) => {
                debug!(species = %species.name, name = %name, "fast move has no PvP data");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let mut charges = Vec::with_capacity(learnset.charge.len());
    for name in &learnset.charge {
        let record = moves.charge(name).map_err(|e| unknown_move(species, e))?;
        match PvpChargeMove::from_record(record) {
            Ok(charge) => charges.push(charge),
            Err(BattleError::MissingPvpData(name)) => {
                debug!(species = %species.name, name = %name, "charge move has no PvP data");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok((fasts, charges))
}

fn rank_species_pvp(
    inputs: &BoardInputs<'_>,
    species: &Species,
    config: &ResolvedPvpConfig,
    options: &PvpRankOptions,
) -> Result<Option<PvpRanking>, BoardError> {
    let Some(learnset) = inputs.learnsets.get(species) else {
        debug!(species = %species.name, "no learnset; skipped");
        return Ok(None);
    };
    let (fasts, charges) = pvp_moves(inputs.moves, species, learnset)?;
    if fasts.is_empty() || charges.is_empty() {
        debug!(species = %species.name, "no usable PvP moveset; skipped");
        return Ok(None);
    }

    let mods = species_modifiers(species, options.modifiers);
    let placement = match options.iv_mode {
        IvMode::Fixed(ivs) => {
            cap_level(&species.base, ivs, config.cp_cap, options.max_level, mods)
                .map(|level| (ivs, level))
        }
        IvMode::MaxStatProduct { iv_floor } => {
            let search = IvSearch {
                iv_floor,
                max_level: options.max_level,
                modifiers: mods,
            };
            optimize_ivs(&species.base, config.cp_cap, &search).map(|opt| (opt.ivs, opt.level))
        }
    };
    let (ivs, level) = match placement {
        Ok(found) => found,
        Err(BattleError::NoFeasibleIvs { cap }) => {
            debug!(species = %species.name, cap, "does not fit under the cap; skipped");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let stats = combat_stats(&species.base, ivs, level, mods)?;
    let cp = combat_power(&species.base, ivs, level, mods)?;

    let mut best: Option<(PvpScore, usize, Vec<usize>)> = None;
    for (fast_index, fast) in fasts.iter().enumerate() {
        for set in charge_sets(charges.len()) {
            let moveset: Vec<PvpChargeMove> = set.iter().map(|&i| charges[i].clone()).collect();
            let score = score_with_config(&stats, fast, &moveset, config)?;
            if best.as_ref().map_or(true, |(b, _, _)| score.score > b.score) {
                best = Some((score, fast_index, set));
            }
        }
    }

    Ok(best.map(|(score, fast_index, set)| PvpRanking {
        species: species.name.clone(),
        league: config.league.clone(),
        level,
        ivs,
        cp,
        stats,
        score,
        fast: fasts[fast_index].name.clone(),
        charges: set.iter().map(|&i| charges[i].name.clone()).collect(),
    }))
}

/// Rank every species with a learnset for one league, best first
pub fn rank_pvp(
    inputs: &BoardInputs<'_>,
    leagues: &LeagueTable,
    options: &PvpRankOptions,
) -> Result<Vec<PvpRanking>, BoardError> {
    let config = resolve_pvp_config(leagues, &options.params)?;
    let species: Vec<&Species> = inputs.species.iter().collect();

    let ranked: Vec<Option<PvpRanking>> = species
        .par_iter()
        .map(|s| rank_species_pvp(inputs, s, &config, options))
        .collect::<Result<_, _>>()?;
    let mut ranked: Vec<PvpRanking> = ranked.into_iter().flatten().collect();
    ranked.sort_by(|a, b| b.score.score.total_cmp(&a.score.score));

    info!(
        league = %config.league,
        species = species.len(),
        ranked = ranked.len(),
        "ranked PvP batch"
    );
    Ok(ranked)
}

fn pve_moves(
    moves: &MoveBook,
    species: &Species,
    learnset: &Learnset,
    options: &PveRankOptions,
) -> Result<(Vec<FastMove>, Vec<ChargeMove>), BoardError> {
    let weather = options.weather_boosted;
    let effectiveness = options.type_effectiveness;
    let fasts = learnset
        .fast
        .iter()
        .map(|name| -> Result<FastMove, BoardError> {
            let record = moves.fast(name).map_err(|e| unknown_move(species, e))?;
            Ok(FastMove::from_record(record, species, weather, effectiveness)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let charges = learnset
        .charge
        .iter()
        .map(|name| -> Result<ChargeMove, BoardError> {
            let record = moves.charge(name).map_err(|e| unknown_move(species, e))?;
            Ok(ChargeMove::from_record(record, species, weather, effectiveness)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((fasts, charges))
}

fn rank_species_pve(
    inputs: &BoardInputs<'_>,
    species: &Species,
    options: &PveRankOptions,
) -> Result<Option<PveRanking>, BoardError> {
    let Some(learnset) = inputs.learnsets.get(species) else {
        debug!(species = %species.name, "no learnset; skipped");
        return Ok(None);
    };
    let (fasts, charges) = pve_moves(inputs.moves, species, learnset, options)?;
    if fasts.is_empty() || charges.is_empty() {
        debug!(species = %species.name, "no usable raid moveset; skipped");
        return Ok(None);
    }

    let mods = species_modifiers(species, options.modifiers);
    let stats = combat_stats(&species.base, options.ivs, options.level, mods)?;
    let floor_ivs = options.ivs.with_attack(0)?;
    let floor_attack = combat_stats(&species.base, floor_ivs, options.level, mods)?.attack;

    let mut best: Option<(PveScore, usize, Vec<usize>)> = None;
    for (fast_index, fast) in fasts.iter().enumerate() {
        let params = if options.count_breakpoints {
            let hits = breakpoints_between(
                fast.power,
                options.params.target_defense,
                fast.bonuses,
                floor_attack,
                stats.attack,
            )?;
            let mut params = options.params.clone();
            params.modifiers.breakpoint_hits = Some(hits);
            params
        } else {
            options.params.clone()
        };

        for set in charge_sets(charges.len()) {
            let moveset: Vec<ChargeMove> = set.iter().map(|&i| charges[i].clone()).collect();
            let score = compute_pve_score(&stats, fast, &moveset, &params)?;
            if best.as_ref().map_or(true, |(b, _, _)| score.value > b.value) {
                best = Some((score, fast_index, set));
            }
        }
    }

    Ok(best.map(|(score, fast_index, set)| PveRanking {
        species: species.name.clone(),
        level: options.level,
        ivs: options.ivs,
        stats,
        score,
        fast: fasts[fast_index].name.clone(),
        charges: set.iter().map(|&i| charges[i].name.clone()).collect(),
    }))
}

/// Rank every species with a learnset by raid value, best first
pub fn rank_pve(
    inputs: &BoardInputs<'_>,
    options: &PveRankOptions,
) -> Result<Vec<PveRanking>, BoardError> {
    options.params.resolve()?;
    let species: Vec<&Species> = inputs.species.iter().collect();

    let ranked: Vec<Option<PveRanking>> = species
        .par_iter()
        .map(|s| rank_species_pve(inputs, s, options))
        .collect::<Result<_, _>>()?;
    let mut ranked: Vec<PveRanking> = ranked.into_iter().flatten().collect();
    ranked.sort_by(|a, b| b.score.value.total_cmp(&a.score.value));

    info!(
        species = species.len(),
        ranked = ranked.len(),
        target_defense = options.params.target_defense,
        "ranked PvE batch"
    );
    Ok(ranked)
}

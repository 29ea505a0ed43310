//! Stat-product-maximal IVs and level under a CP cap

use dex_core::BaseStats;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BattleError, BattleResult};
use crate::stats::{effective_cpm, level_grid, PreMultiplierStats, MAX_POWER_UP_LEVEL};
use crate::types::{CombatStats, IvSpread, StatModifiers, MAX_IV};

/// Half-steps below the zero-attack frontier that are also examined
const FRONTIER_NEIGHBOURHOOD: usize = 4;
const IMPROVEMENT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvSearch {
    /// Lowest IV allowed in any stat (trades, raids and the like)
    pub iv_floor: u8,
    pub max_level: f64,
    pub modifiers: StatModifiers,
}

impl Default for IvSearch {
    fn default() -> Self {
        IvSearch {
            iv_floor: 0,
            max_level: MAX_POWER_UP_LEVEL,
            modifiers: StatModifiers::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvOptimum {
    pub ivs: IvSpread,
    pub level: f64,
    pub cp: u32,
    pub stats: CombatStats,
    pub stat_product: f64,
}

/// Levels up to `max_level` with their effective multipliers
fn level_table(max_level: f64, modifiers: StatModifiers) -> BattleResult<Vec<(f64, f64)>> {
    effective_cpm(max_level, modifiers)?;
    level_grid(max_level)
        .into_iter()
        .map(|level| Ok((level, effective_cpm(level, modifiers)?)))
        .collect()
}

fn optimum_at(
    base: &BaseStats,
    ivs: IvSpread,
    level: f64,
    multiplier: f64,
    modifiers: StatModifiers,
) -> IvOptimum {
    let pre = PreMultiplierStats::new(base, ivs, modifiers);
    let stats = pre.combat_stats_at(multiplier);
    IvOptimum {
        ivs,
        level,
        cp: pre.combat_power_at(multiplier),
        stats,
        stat_product: stats.stat_product(),
    }
}

/// Highest level (up to `max_level`) at which `ivs` stays within `cap`
pub fn cap_level(
    base: &BaseStats,
    ivs: IvSpread,
    cap: Option<u32>,
    max_level: f64,
    modifiers: StatModifiers,
) -> BattleResult<f64> {
    let table = level_table(max_level, modifiers)?;
    let cap = match cap {
        Some(cap) => cap,
        None => return Ok(max_level),
    };
    let pre = PreMultiplierStats::new(base, ivs, modifiers);
    let fits = table.partition_point(|(_, m)| pre.combat_power_at(*m) <= cap);
    match fits.checked_sub(1) {
        Some(index) => Ok(table[index].0),
        None => Err(BattleError::NoFeasibleIvs { cap }),
    }
}

/// Search the IV/level space for the highest stat product within `cap`.
///
/// For every defense/stamina pair this binary-searches the highest level at
/// which the floor attack IV still fits, then at that level and a few
/// half-steps below it binary-searches the highest attack IV that fits.
/// CP is monotonic in every IV and in level, so no other point can win.
/// Without a cap the answer is 15/15/15 at `max_level`.
pub fn optimize_ivs(
    base: &BaseStats,
    cap: Option<u32>,
    search: &IvSearch,
) -> BattleResult<IvOptimum> {
    if search.iv_floor > MAX_IV {
        return Err(BattleError::OutOfRange {
            field: "IV floor",
            requirement: "between 0 and 15",
            value: f64::from(search.iv_floor),
        });
    }
    let table = level_table(search.max_level, search.modifiers)?;

    let cap = match cap {
        Some(cap) => cap,
        None => {
            let multiplier = effective_cpm(search.max_level, search.modifiers)?;
            return Ok(optimum_at(
                base,
                IvSpread::perfect(),
                search.max_level,
                multiplier,
                search.modifiers,
            ));
        }
    };

    let floor = search.iv_floor;
    let attacks: Vec<u8> = (floor..=MAX_IV).collect();
    let mut best: Option<IvOptimum> = None;

    for defense in floor..=MAX_IV {
        for stamina in floor..=MAX_IV {
            let lowest = IvSpread {
                attack: floor,
                defense,
                stamina,
            };
            let pre = PreMultiplierStats::new(base, lowest, search.modifiers);
            let fits = table.partition_point(|(_, m)| pre.combat_power_at(*m) <= cap);
            let Some(frontier) = fits.checked_sub(1) else {
                continue;
            };

            let neighbourhood = &table[frontier.saturating_sub(FRONTIER_NEIGHBOURHOOD)..=frontier];
            for &(level, multiplier) in neighbourhood {
                let fitting = attacks.partition_point(|&attack| {
                    let ivs = IvSpread { attack, ..lowest };
                    PreMultiplierStats::new(base, ivs, search.modifiers).combat_power_at(multiplier)
                        <= cap
                });
                let Some(&attack) = fitting.checked_sub(1).and_then(|i| attacks.get(i)) else {
                    continue;
                };
                let candidate = optimum_at(
                    base,
                    IvSpread { attack, ..lowest },
                    level,
                    multiplier,
                    search.modifiers,
                );
                let improves = best.as_ref().map_or(true, |current| {
                    candidate.stat_product > current.stat_product + IMPROVEMENT_TOLERANCE
                });
                if improves {
                    best = Some(candidate);
                }
            }
        }
    }

    let best = best.ok_or(BattleError::NoFeasibleIvs { cap })?;
    debug!(
        cap,
        ivs = %best.ivs,
        level = best.level,
        cp = best.cp,
        stat_product = best.stat_product,
        "IV optimum found"
    );
    Ok(best)
}

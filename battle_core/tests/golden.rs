//! End-to-end scoring of a reference build

use battle_core::config::{LeagueTable, ScoringConstants};
use battle_core::pve::{compute_pve_score, ChargeMove, FastMove, PveParams};
use battle_core::pvp::{compute_pvp_score, PvpChargeMove, PvpFastMove, PvpParams};
use battle_core::stats::{combat_power, combat_stats, infer_level};
use battle_core::{IvSpread, StatModifiers};
use dex_core::{BaseStats, MoveBook, SpeciesRepository};

const SPECIES_JSON: &str = r#"{
  "species": [
    {"name": "Hydreigon", "dex": 635, "base_attack": 256, "base_defense": 188,
     "base_stamina": 216, "types": ["dark", "dragon"]}
  ]
}"#;

const MOVES_JSON: &str = r#"{
  "fast": [
    {"name": "Snarl", "type": "dark", "pve_power": 12, "pve_energy_gain": 13,
     "pve_duration_s": 1.0, "pvp_damage": 5, "pvp_energy_gain": 13, "pvp_turns": 4}
  ],
  "charge": [
    {"name": "Brutal Swing", "type": "dark", "pve_power": 65, "pve_energy_gain": -40,
     "pve_duration_s": 1.9, "pvp_damage": 65, "pvp_energy_gain": -40}
  ]
}"#;

fn hydreigon() -> BaseStats {
    BaseStats::new(256, 188, 216)
}

fn rel(actual: f64, expected: f64) -> f64 {
    ((actual - expected) / expected).abs()
}

#[test]
fn test_level_inference_and_stats() {
    let mods = StatModifiers::default();
    let inferred = infer_level(&hydreigon(), IvSpread::perfect(), 3325, mods, None).unwrap();
    assert!((inferred.level - 33.5).abs() < f64::EPSILON);
    assert!((inferred.cpm - 0.7527290867).abs() < 1e-10);

    let stats = combat_stats(&hydreigon(), IvSpread::perfect(), inferred.level, mods).unwrap();
    assert!((stats.attack - 203.9895824957).abs() < 1e-8);
    assert!((stats.defense - 152.8040046001).abs() < 1e-8);
    assert_eq!(stats.hp, 173);
}

#[test]
fn test_perfect_ivs_round_trip_at_35() {
    let mods = StatModifiers::default();
    let cp = combat_power(&hydreigon(), IvSpread::perfect(), 35.0, mods).unwrap();
    assert_eq!(cp, 3403);
    let inferred = infer_level(&hydreigon(), IvSpread::perfect(), i64::from(cp), mods, None).unwrap();
    assert!((inferred.level - 35.0).abs() < f64::EPSILON);
}

#[test]
fn test_level_round_trip_at_35() {
    let mods = StatModifiers::default();
    let ivs = IvSpread::new(12, 14, 13).unwrap();
    let cp = combat_power(&hydreigon(), ivs, 35.0, mods).unwrap();
    let hp = combat_stats(&hydreigon(), ivs, 35.0, mods).unwrap().hp;
    let inferred =
        infer_level(&hydreigon(), ivs, i64::from(cp), mods, Some(i64::from(hp))).unwrap();
    assert!((inferred.level - 35.0).abs() < f64::EPSILON);
}

#[test]
fn test_raid_value_from_reference_data() {
    let species = SpeciesRepository::from_json_str(SPECIES_JSON).unwrap();
    let book = MoveBook::from_json_str(MOVES_JSON).unwrap();
    let hydreigon = species.get("hydreigon").unwrap();

    let fast = FastMove::from_record(book.fast("Snarl").unwrap(), hydreigon, false, 1.0).unwrap();
    let swing =
        ChargeMove::from_record(book.charge("brutal swing").unwrap(), hydreigon, false, 1.0)
            .unwrap();
    assert!(fast.bonuses.stab);
    assert!((swing.energy_cost - 40.0).abs() < f64::EPSILON);

    let stats = combat_stats(
        &hydreigon.base,
        IvSpread::perfect(),
        33.5,
        StatModifiers::default(),
    )
    .unwrap();
    let score = compute_pve_score(&stats, &fast, &[swing], &PveParams::new(180.0, 35.0)).unwrap();

    assert!(rel(score.dps, 14.605873261205565) < 1e-9);
    assert!(rel(score.cycle_damage, 72.6923076923077) < 1e-9);
    assert!(rel(score.cycle_time, 4.976923076923077) < 1e-9);
    assert!(rel(score.fast_moves_per_cycle, 3.0769230769230766) < 1e-9);
    assert!(rel(score.ehp, 146.86162664342945) < 1e-9);
    assert!(rel(score.tdo, 61.286923019669175) < 1e-9);
    assert!(rel(score.value, 25.921709769448622) < 1e-9);
}

#[test]
fn test_trainer_battle_score_from_reference_data() {
    let book = MoveBook::from_json_str(MOVES_JSON).unwrap();
    let fast = PvpFastMove::from_record(book.fast("snarl").unwrap()).unwrap();
    let swing = PvpChargeMove::from_record(book.charge("Brutal Swing").unwrap()).unwrap();

    let stats = combat_stats(
        &hydreigon(),
        IvSpread::perfect(),
        33.5,
        StatModifiers::default(),
    )
    .unwrap();
    let score = compute_pvp_score(
        &stats,
        &fast,
        &[swing],
        &LeagueTable::default(),
        &PvpParams::new("great"),
    )
    .unwrap();

    assert!(rel(score.stat_product, 5392483.542653858) < 1e-9);
    assert!(rel(score.stat_product_normalised, 3.370302214158661) < 1e-9);
    assert!((score.move_pressure - 6.4).abs() < 1e-12);
    assert!(rel(score.score, 0.7150861940536062) < 1e-9);
}

#[test]
fn test_enhanced_constants_change_both_modes() {
    let enhanced = ScoringConstants::enhanced();
    let stats = combat_stats(
        &hydreigon(),
        IvSpread::perfect(),
        33.5,
        StatModifiers::default(),
    )
    .unwrap();

    let fast = FastMove::new("Snarl", 12.0, 13.0, 1.0, Default::default()).unwrap();
    let swing = ChargeMove::new("Brutal Swing", 65.0, 40.0, 1.9, Default::default()).unwrap();
    let raid = compute_pve_score(
        &stats,
        &fast,
        &[swing],
        &PveParams::from_defaults(&enhanced.pve, 180.0, 35.0),
    )
    .unwrap();
    assert!(raid.penalty_factor < 1.0);
    assert_eq!(raid.energy_from_damage_ratio, Some(0.5));

    let snarl = PvpFastMove::new("Snarl", 5.0, 13.0, 4).unwrap();
    let swing = PvpChargeMove::new("Brutal Swing", 65.0, 40.0).unwrap();
    let pvp = compute_pvp_score(
        &stats,
        &snarl,
        &[swing],
        &LeagueTable::default(),
        &PvpParams::from_defaults(&enhanced.pvp, "great"),
    )
    .unwrap();
    assert_eq!(pvp.shield_breakdown.len(), 3);
    assert!(pvp.score.is_finite() && pvp.score > 0.0);
}

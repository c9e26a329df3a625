//! Test fixtures and helpers.
//!
//! Pre-built content tables and generator configs for consistent testing.

use std::collections::BTreeMap;

use scengen_core::data::modifiers::TURN_LIMIT_CHANGE;
use scengen_core::data::{
    BattleModifier, Biome, ContentTables, Era, MapPreset, ModifierEffect, ModifierKind,
    ObjectiveType, RatEntry, ScenarioTemplate, UnitTable, UnitType,
};
use scengen_core::opfor::OpForGeneratorConfig;
use scengen_core::scenario::ScenarioGeneratorConfig;

/// Faction every fixture table is registered for.
pub const TEST_FACTION: &str = "Test Raiders";

/// Era every fixture table is registered for.
pub const TEST_ERA: Era = Era::ClanInvasion;

/// The built-in catalog.
#[must_use]
pub fn builtin_content() -> ContentTables {
    ContentTables::builtin()
}

/// The concrete Pirates request: 5000 BV, 4 units, Clan Invasion,
/// even difficulty, no modifiers.
#[must_use]
pub fn pirates_config() -> ScenarioGeneratorConfig {
    ScenarioGeneratorConfig::new(5000, 4, "Pirates", Era::ClanInvasion)
}

/// A Pirates OpFor request for `player_bv`, lance bounds scaled like the
/// scenario generator does for a matching player force (about 1200 BV per
/// player unit).
#[must_use]
pub fn pirates_opfor_config(player_bv: i64) -> OpForGeneratorConfig {
    let (min, max) = ScenarioGeneratorConfig::new(
        player_bv,
        player_unit_count_for(player_bv),
        "Pirates",
        Era::ClanInvasion,
    )
    .lance_bounds();
    OpForGeneratorConfig::new(player_bv, "Pirates", Era::ClanInvasion).with_lance_bounds(min, max)
}

/// Plausible player unit count for a BV budget.
#[must_use]
pub fn player_unit_count_for(player_bv: i64) -> u32 {
    u32::try_from((player_bv / 1200).max(1)).unwrap_or(u32::MAX)
}

/// Small hand-built catalog with one template, one preset per biome used,
/// and a conflicting modifier pair.
#[must_use]
pub fn minimal_content() -> ContentTables {
    ContentTables {
        unit_tables: vec![UnitTable {
            faction: TEST_FACTION.to_string(),
            era: TEST_ERA,
            entries: vec![
                RatEntry::new("Trainer", "TR-1", 300, 20, UnitType::BattleMech),
                RatEntry::new("Brawler", "BR-2", 900, 50, UnitType::BattleMech),
                RatEntry::new("Bruiser", "BZ-3", 1400, 75, UnitType::BattleMech),
                RatEntry::new("Runabout", "RA", 350, 30, UnitType::Vehicle),
                RatEntry::new("Siege Tank", "ST", 800, 60, UnitType::Vehicle),
            ],
        }],
        templates: vec![ScenarioTemplate {
            id: "skirmish".to_string(),
            name: "Skirmish".to_string(),
            objective_type: ObjectiveType::Destroy,
            victory_conditions: vec!["Destroy the enemy".to_string()],
            turn_limit: 10,
            suggested_biomes: vec![Biome::Desert],
            min_player_units: 1,
            max_player_units: 0,
            default_opfor_multiplier: 1.0,
        }],
        map_presets: vec![
            MapPreset::new("dunes", "Dunes", Biome::Desert, 10),
            MapPreset::new("fields", "Fields", Biome::Temperate, 10),
        ],
        modifiers: vec![
            BattleModifier::new(
                "long-fight",
                "Long Fight",
                ModifierEffect::Neutral,
                ModifierKind::ObjectiveModifier,
            )
            .with_parameter(TURN_LIMIT_CHANGE, 3.0)
            .exclusive_with(["short-fight"]),
            BattleModifier::new(
                "short-fight",
                "Short Fight",
                ModifierEffect::Neutral,
                ModifierKind::ObjectiveModifier,
            )
            .with_parameter(TURN_LIMIT_CHANGE, -3.0),
            BattleModifier::new(
                "ambush",
                "Ambush",
                ModifierEffect::Negative,
                ModifierKind::ReinforcementModifier,
            ),
        ],
    }
}

/// A mix that only asks for one unit type.
#[must_use]
pub fn single_type_mix(unit_type: UnitType) -> BTreeMap<UnitType, f64> {
    BTreeMap::from([(unit_type, 100.0)])
}

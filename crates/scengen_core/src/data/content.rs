//! In-memory content tables backing every catalog trait.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BattleModifier, Era, MapPreset, RatEntry, ScenarioTemplate, UnitTable};
use crate::catalog::{MapPresetCatalog, ModifierCatalog, TemplateCatalog, UnitTableSource};
use crate::error::{GeneratorError, Result};

/// All lookup data the generators consume.
///
/// # Example RON
///
/// ```ron
/// ContentTables(
///     unit_tables: [UnitTable(faction: "Pirates", era: ClanInvasion, entries: [...])],
///     templates: [...],
///     map_presets: [...],
///     modifiers: [...],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentTables {
    /// Faction/era unit tables.
    #[serde(default)]
    pub unit_tables: Vec<UnitTable>,
    /// Scenario templates.
    #[serde(default)]
    pub templates: Vec<ScenarioTemplate>,
    /// Map presets.
    #[serde(default)]
    pub map_presets: Vec<MapPreset>,
    /// Battle modifiers.
    #[serde(default)]
    pub modifiers: Vec<BattleModifier>,
}

impl ContentTables {
    /// Load content tables from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| GeneratorError::ContentRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse_ron(&contents, &path.display().to_string())
    }

    /// Load from a RON string (useful for embedded content).
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        Self::parse_ron(ron, "<inline>")
    }

    fn parse_ron(ron: &str, origin: &str) -> Result<Self> {
        let tables: Self = ron::from_str(ron).map_err(|e| GeneratorError::ContentParse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            "Loaded content from {origin}: {} unit tables, {} templates, {} presets, {} modifiers",
            tables.unit_tables.len(),
            tables.templates.len(),
            tables.map_presets.len(),
            tables.modifiers.len()
        );
        Ok(tables)
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| {
            GeneratorError::ContentParse {
                path: "<serialize>".to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Get the table for a faction/era pair.
    #[must_use]
    pub fn table(&self, faction: &str, era: Era) -> Option<&UnitTable> {
        self.unit_tables.iter().find(|t| t.serves(faction, era))
    }

    /// All faction names with at least one table, in table order, deduplicated.
    #[must_use]
    pub fn factions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for table in &self.unit_tables {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&table.faction)) {
                names.push(&table.faction);
            }
        }
        names
    }

    /// Look up a modifier by id.
    #[must_use]
    pub fn modifier(&self, id: &str) -> Option<&BattleModifier> {
        self.modifiers.iter().find(|m| m.id == id)
    }
}

impl UnitTableSource for ContentTables {
    fn unit_table(&self, faction: &str, era: Era) -> Option<&[RatEntry]> {
        self.table(faction, era).map(|t| t.entries.as_slice())
    }
}

impl TemplateCatalog for ContentTables {
    fn templates(&self) -> &[ScenarioTemplate] {
        &self.templates
    }
}

impl MapPresetCatalog for ContentTables {
    fn presets(&self) -> &[MapPreset] {
        &self.map_presets
    }
}

impl ModifierCatalog for ContentTables {
    fn modifiers(&self) -> &[BattleModifier] {
        &self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Biome, ObjectiveType, UnitType};

    const SAMPLE: &str = r#"
        ContentTables(
            unit_tables: [
                UnitTable(
                    faction: "Pirates",
                    era: ClanInvasion,
                    entries: [
                        RatEntry(
                            chassis: "Locust",
                            variant: "LCT-1V",
                            designation: "Locust LCT-1V",
                            bv: 432,
                            tonnage: 20,
                            unit_type: BattleMech,
                        ),
                    ],
                ),
            ],
            templates: [
                ScenarioTemplate(
                    id: "standup-fight",
                    name: "Standup Fight",
                    objective_type: Destroy,
                    victory_conditions: ["Destroy all enemy units"],
                    turn_limit: 12,
                    suggested_biomes: [Temperate],
                ),
            ],
            map_presets: [
                MapPreset(id: "hills", name: "Rolling Hills", biome: Temperate, radius: 12),
            ],
            modifiers: [
                BattleModifier(
                    id: "extended",
                    name: "Extended Engagement",
                    effect: Neutral,
                    applicability: ModifierApplicability(
                        weight: 0.5,
                        exclusive_with: ["time-pressure"],
                        objective_types: [Destroy],
                    ),
                    implementation: ModifierImplementation(
                        kind: ObjectiveModifier,
                        parameters: { "turn_limit_change": 4.0 },
                    ),
                ),
            ],
        )
    "#;

    #[test]
    fn test_parse_from_ron() {
        let tables = ContentTables::from_ron_str(SAMPLE).unwrap();
        assert_eq!(tables.unit_tables.len(), 1);

        let entries = tables.unit_table("pirates", Era::ClanInvasion).unwrap();
        assert_eq!(entries[0].unit_type, UnitType::BattleMech);
        assert_eq!(entries[0].weight, 1.0);

        let template = tables.template("standup-fight").unwrap();
        assert_eq!(template.objective_type, ObjectiveType::Destroy);
        assert_eq!(template.min_player_units, 1);
        assert_eq!(template.max_player_units, 0);

        assert_eq!(tables.presets_for_biome(Biome::Temperate).len(), 1);

        let modifier = tables.modifier("extended").unwrap();
        assert_eq!(modifier.turn_limit_change(), Some(4));
        assert!(modifier.excludes("time-pressure"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = ContentTables::from_ron_str("ContentTables(templates: 7)").unwrap_err();
        assert!(matches!(err, GeneratorError::ContentParse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ContentTables::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, GeneratorError::ContentRead { .. }));
    }

    #[test]
    fn test_builtin_round_trips_through_ron() {
        let builtin = ContentTables::builtin();
        let ron = builtin.to_ron_string().unwrap();
        let parsed = ContentTables::from_ron_str(&ron).unwrap();
        assert_eq!(parsed.templates, builtin.templates);
        assert_eq!(parsed.modifiers.len(), builtin.modifiers.len());
    }

    #[test]
    fn test_factions_deduplicated() {
        let tables = ContentTables::builtin();
        let factions = tables.factions();
        assert!(factions.contains(&"Pirates"));
        let pirates = factions.iter().filter(|f| **f == "Pirates").count();
        assert_eq!(pirates, 1);
    }
}

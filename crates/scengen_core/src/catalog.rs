//! Read-only content lookups consumed by the generators.
//!
//! Generators never own content; they query it through these traits so
//! callers can back them with compiled-in tables, RON files or anything
//! else. All lookups are synchronous and in-process.
//!
//! Results are returned in table order. Generators rely on that order being
//! stable for seeded reproducibility, so implementations must not iterate
//! hash maps here.

use crate::data::{
    BattleModifier, Biome, Era, MapPreset, ObjectiveType, RatEntry, ScenarioTemplate,
};

/// Faction/era scoped unit tables.
pub trait UnitTableSource: Send + Sync {
    /// Entries of the table for `faction` in `era`, or `None` when no such
    /// table exists.
    fn unit_table(&self, faction: &str, era: Era) -> Option<&[RatEntry]>;
}

/// Scenario template catalog.
pub trait TemplateCatalog: Send + Sync {
    /// All templates in catalog order.
    fn templates(&self) -> &[ScenarioTemplate];

    /// Look up a template by id.
    fn template(&self, id: &str) -> Option<&ScenarioTemplate> {
        self.templates().iter().find(|t| t.id == id)
    }

    /// Templates built around `objective`.
    fn templates_for_objective(&self, objective: ObjectiveType) -> Vec<&ScenarioTemplate> {
        self.templates()
            .iter()
            .filter(|t| t.objective_type == objective)
            .collect()
    }
}

/// Map preset catalog.
pub trait MapPresetCatalog: Send + Sync {
    /// All presets in catalog order.
    fn presets(&self) -> &[MapPreset];

    /// Presets belonging to `biome`.
    fn presets_for_biome(&self, biome: Biome) -> Vec<&MapPreset> {
        self.presets().iter().filter(|p| p.biome == biome).collect()
    }
}

/// Battle modifier catalog.
pub trait ModifierCatalog: Send + Sync {
    /// All modifiers in catalog order.
    fn modifiers(&self) -> &[BattleModifier];

    /// Modifiers offered for `objective` (including universal ones).
    fn modifiers_for_objective(&self, objective: ObjectiveType) -> Vec<&BattleModifier> {
        self.modifiers()
            .iter()
            .filter(|m| m.applies_to_objective(objective))
            .collect()
    }

    /// Modifiers offered for `biome` (including universal ones).
    fn modifiers_for_biome(&self, biome: Biome) -> Vec<&BattleModifier> {
        self.modifiers()
            .iter()
            .filter(|m| m.applies_to_biome(biome))
            .collect()
    }
}

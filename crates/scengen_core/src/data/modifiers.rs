//! Battle modifier catalog records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Biome, ObjectiveType};

/// Parameter key read by objective modifiers to shift the turn limit.
pub const TURN_LIMIT_CHANGE: &str = "turn_limit_change";

/// Whether a modifier helps or hurts the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierEffect {
    /// Favors the player.
    Positive,
    /// Favors the opposing force.
    Negative,
    /// Changes the battle without favoring either side.
    Neutral,
}

/// How a modifier is applied by the battle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Alters objectives or the turn limit.
    ObjectiveModifier,
    /// Weather and lighting.
    EnvironmentModifier,
    /// Map features.
    TerrainModifier,
    /// Per-unit bonuses or penalties.
    UnitModifier,
    /// Additional forces arriving mid-battle.
    ReinforcementModifier,
}

/// Selection rules for a modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierApplicability {
    /// Relative selection weight.
    #[serde(default = "default_modifier_weight")]
    pub weight: f64,
    /// Modifier ids that must never appear alongside this one.
    #[serde(default)]
    pub exclusive_with: Vec<String>,
    /// Objectives the modifier is offered for.
    #[serde(default)]
    pub objective_types: Vec<ObjectiveType>,
    /// Biomes the modifier is offered for.
    #[serde(default)]
    pub biomes: Vec<Biome>,
}

/// Default modifier weight.
const fn default_modifier_weight() -> f64 {
    1.0
}

impl Default for ModifierApplicability {
    fn default() -> Self {
        Self {
            weight: default_modifier_weight(),
            exclusive_with: Vec::new(),
            objective_types: Vec::new(),
            biomes: Vec::new(),
        }
    }
}

/// Engine-facing description of what the modifier does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierImplementation {
    /// Application mechanism.
    pub kind: ModifierKind,
    /// Numeric parameters, keyed by name.
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}

/// A battle modifier from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleModifier {
    /// Unique modifier identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Player-facing description.
    #[serde(default)]
    pub description: String,
    /// Who the modifier favors.
    pub effect: ModifierEffect,
    /// Selection rules.
    #[serde(default)]
    pub applicability: ModifierApplicability,
    /// Engine-facing behavior.
    pub implementation: ModifierImplementation,
}

impl BattleModifier {
    /// Create a modifier with default applicability.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        effect: ModifierEffect,
        kind: ModifierKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            effect,
            applicability: ModifierApplicability::default(),
            implementation: ModifierImplementation {
                kind,
                parameters: BTreeMap::new(),
            },
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the selection weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.applicability.weight = weight;
        self
    }

    /// Declare mutually exclusive modifier ids.
    #[must_use]
    pub fn exclusive_with<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applicability
            .exclusive_with
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Restrict the modifier to some objectives.
    #[must_use]
    pub fn for_objectives(mut self, objectives: &[ObjectiveType]) -> Self {
        self.applicability.objective_types.extend_from_slice(objectives);
        self
    }

    /// Restrict the modifier to some biomes.
    #[must_use]
    pub fn for_biomes(mut self, biomes: &[Biome]) -> Self {
        self.applicability.biomes.extend_from_slice(biomes);
        self
    }

    /// Set a numeric implementation parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: f64) -> Self {
        self.implementation.parameters.insert(key.into(), value);
        self
    }

    /// Whether the modifier applies regardless of objective and biome.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.applicability.objective_types.is_empty() && self.applicability.biomes.is_empty()
    }

    /// Whether the catalog offers this modifier for `objective`.
    #[must_use]
    pub fn applies_to_objective(&self, objective: ObjectiveType) -> bool {
        self.is_universal() || self.applicability.objective_types.contains(&objective)
    }

    /// Whether the catalog offers this modifier for `biome`.
    #[must_use]
    pub fn applies_to_biome(&self, biome: Biome) -> bool {
        self.is_universal() || self.applicability.biomes.contains(&biome)
    }

    /// Whether this modifier declares `other_id` as mutually exclusive.
    #[must_use]
    pub fn excludes(&self, other_id: &str) -> bool {
        self.applicability.exclusive_with.iter().any(|id| id == other_id)
    }

    /// Whether the two modifiers may not appear together, in either direction.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.excludes(&other.id) || other.excludes(&self.id)
    }

    /// Turn-limit delta carried by an objective modifier, if any.
    #[must_use]
    pub fn turn_limit_change(&self) -> Option<i64> {
        if self.implementation.kind != ModifierKind::ObjectiveModifier {
            return None;
        }
        self.implementation
            .parameters
            .get(TURN_LIMIT_CHANGE)
            .filter(|v| v.is_finite())
            .map(|v| v.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_applies_everywhere() {
        let m = BattleModifier::new(
            "good-intel",
            "Good Intelligence",
            ModifierEffect::Positive,
            ModifierKind::UnitModifier,
        );
        assert!(m.is_universal());
        assert!(m.applies_to_objective(ObjectiveType::Recon));
        assert!(m.applies_to_biome(Biome::Lunar));
    }

    #[test]
    fn test_biome_only_modifier_not_offered_by_objective() {
        let m = BattleModifier::new(
            "sandstorm",
            "Sandstorm",
            ModifierEffect::Negative,
            ModifierKind::EnvironmentModifier,
        )
        .for_biomes(&[Biome::Desert]);
        assert!(!m.applies_to_objective(ObjectiveType::Destroy));
        assert!(m.applies_to_biome(Biome::Desert));
        assert!(!m.applies_to_biome(Biome::Arctic));
    }

    #[test]
    fn test_conflict_is_symmetric() {
        let a =
            BattleModifier::new("a", "A", ModifierEffect::Neutral, ModifierKind::TerrainModifier)
                .exclusive_with(["b"]);
        let b =
            BattleModifier::new("b", "B", ModifierEffect::Neutral, ModifierKind::TerrainModifier);
        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
    }

    #[test]
    fn test_turn_limit_change_only_for_objective_modifiers() {
        let objective = BattleModifier::new(
            "extended",
            "Extended",
            ModifierEffect::Neutral,
            ModifierKind::ObjectiveModifier,
        )
        .with_parameter(TURN_LIMIT_CHANGE, 4.0);
        assert_eq!(objective.turn_limit_change(), Some(4));

        let env = BattleModifier::new(
            "fog",
            "Fog",
            ModifierEffect::Neutral,
            ModifierKind::EnvironmentModifier,
        )
        .with_parameter(TURN_LIMIT_CHANGE, 4.0);
        assert_eq!(env.turn_limit_change(), None);
    }
}

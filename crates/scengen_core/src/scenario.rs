//! Full scenario generation.
//!
//! [`ScenarioGenerator`] chooses a template, biome and map preset, builds the
//! opposing force, picks battle modifiers and resolves the turn limit. Every
//! random decision, including those inside OpFor generation, flows through
//! the single [`RandomSource`] of the call, so the same seed and config always
//! produce the same scenario apart from its `id` and `generated_at`.
//!
//! Steps that cannot be satisfied fall back instead of failing:
//!
//! | Step | Fallback |
//! |------|----------|
//! | Template by objective | ignore the objective |
//! | Template by unit count | first template |
//! | Biome | template suggestion, then the baseline biome |
//! | Map preset | a baseline-biome preset, then the first preset |

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{MapPresetCatalog, ModifierCatalog, TemplateCatalog, UnitTableSource};
use crate::config::{validate_mix, GeneratorSettings, MAX_PLAYER_UNITS};
use crate::data::{
    BattleModifier, Biome, ContentTables, Era, MapPreset, ObjectiveType, ScenarioTemplate,
    UnitType,
};
use crate::error::{GeneratorError, Result};
use crate::modifiers::{candidate_modifiers, effective_turn_limit, select_modifiers};
use crate::opfor::{OpForGenerator, OpForGeneratorConfig, OpForGeneratorResult};
use crate::random::{pick, random_source, RandomSource};
use crate::skills::skill_level_for_difficulty;

/// Input to [`ScenarioGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioGeneratorConfig {
    /// BV of the player's force.
    pub player_bv: i64,
    /// Units in the player's force.
    pub player_unit_count: u32,
    /// Desired objective.
    #[serde(default)]
    pub scenario_type: Option<ObjectiveType>,
    /// Use this template instead of choosing one.
    #[serde(default)]
    pub template_id: Option<String>,
    /// OpFor faction.
    pub faction: String,
    /// OpFor era.
    pub era: Era,
    /// Battle biome.
    #[serde(default)]
    pub biome: Option<Biome>,
    /// Difficulty multiplier; 1.0 is an even fight.
    pub difficulty: f64,
    /// Most modifiers to apply.
    #[serde(default)]
    pub max_modifiers: i32,
    /// Whether modifiers that favor the OpFor may be chosen.
    #[serde(default)]
    pub allow_negative_modifiers: bool,
    /// Seed for a reproducible scenario.
    #[serde(default)]
    pub seed: Option<u64>,
    /// OpFor unit-type mix; the settings' default when absent.
    #[serde(default)]
    pub unit_type_mix: Option<BTreeMap<UnitType, f64>>,
}

impl ScenarioGeneratorConfig {
    /// An even-difficulty request with no modifiers.
    #[must_use]
    pub fn new(
        player_bv: i64,
        player_unit_count: u32,
        faction: impl Into<String>,
        era: Era,
    ) -> Self {
        Self {
            player_bv,
            player_unit_count,
            scenario_type: None,
            template_id: None,
            faction: faction.into(),
            era,
            biome: None,
            difficulty: 1.0,
            max_modifiers: 0,
            allow_negative_modifiers: false,
            seed: None,
            unit_type_mix: None,
        }
    }

    /// Builder: request an objective.
    #[must_use]
    pub fn with_scenario_type(mut self, objective: ObjectiveType) -> Self {
        self.scenario_type = Some(objective);
        self
    }

    /// Builder: request a specific template.
    #[must_use]
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Builder: request a biome.
    #[must_use]
    pub fn with_biome(mut self, biome: Biome) -> Self {
        self.biome = Some(biome);
        self
    }

    /// Builder: set the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Builder: allow up to `max` modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, max: i32, allow_negative: bool) -> Self {
        self.max_modifiers = max;
        self.allow_negative_modifiers = allow_negative;
        self
    }

    /// Builder: set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set the OpFor unit-type mix.
    #[must_use]
    pub fn with_unit_type_mix(mut self, mix: BTreeMap<UnitType, f64>) -> Self {
        self.unit_type_mix = Some(mix);
        self
    }

    /// OpFor lance-size bounds derived from the player's unit count.
    #[must_use]
    pub fn lance_bounds(&self) -> (u32, u32) {
        let count = f64::from(self.player_unit_count);
        let min = ((count * 0.5).floor() as u32).max(1);
        let max = ((count * 1.5).ceil() as u32).max(min);
        (min, max)
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.player_bv <= 0 {
            return Err(GeneratorError::invalid(
                "player_bv",
                format!("must be positive, got {}", self.player_bv),
            ));
        }
        if self.player_unit_count == 0 {
            return Err(GeneratorError::invalid("player_unit_count", "must be at least 1"));
        }
        if self.player_unit_count > MAX_PLAYER_UNITS {
            return Err(GeneratorError::invalid(
                "player_unit_count",
                format!("must be at most {MAX_PLAYER_UNITS}, got {}", self.player_unit_count),
            ));
        }
        if !self.difficulty.is_finite() || self.difficulty <= 0.0 {
            return Err(GeneratorError::invalid(
                "difficulty",
                format!("must be positive, got {}", self.difficulty),
            ));
        }
        if self.max_modifiers < 0 {
            return Err(GeneratorError::invalid(
                "max_modifiers",
                format!("must not be negative, got {}", self.max_modifiers),
            ));
        }
        if let Some(mix) = &self.unit_type_mix {
            validate_mix("unit_type_mix", mix)?;
        }
        Ok(())
    }
}

/// A complete generated scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedScenario {
    /// Unique id of this scenario.
    pub id: Uuid,
    /// Template the scenario is built on.
    pub template: ScenarioTemplate,
    /// Biome the battle takes place in.
    pub biome: Biome,
    /// Map to fight on.
    pub map_preset: MapPreset,
    /// The opposing force.
    pub op_for: OpForGeneratorResult,
    /// Applied modifiers, in selection order.
    pub modifiers: Vec<BattleModifier>,
    /// Turn limit after modifiers; 0 means unlimited.
    pub turn_limit: u32,
    /// When the scenario was generated.
    pub generated_at: DateTime<Utc>,
    /// Seed the scenario was generated from.
    pub seed: Option<u64>,
}

impl GeneratedScenario {
    /// Ids of the applied modifiers, in order.
    #[must_use]
    pub fn modifier_ids(&self) -> Vec<&str> {
        self.modifiers.iter().map(|m| m.id.as_str()).collect()
    }
}

/// Generates scenarios from read-only catalogs.
pub struct ScenarioGenerator<'a> {
    units: &'a dyn UnitTableSource,
    templates: &'a dyn TemplateCatalog,
    presets: &'a dyn MapPresetCatalog,
    modifiers: &'a dyn ModifierCatalog,
    settings: GeneratorSettings,
}

impl<'a> ScenarioGenerator<'a> {
    /// Generator backed by one set of content tables.
    #[must_use]
    pub fn new(content: &'a ContentTables) -> Self {
        Self::with_catalogs(content, content, content, content)
    }

    /// Generator backed by separate catalogs.
    #[must_use]
    pub fn with_catalogs(
        units: &'a dyn UnitTableSource,
        templates: &'a dyn TemplateCatalog,
        presets: &'a dyn MapPresetCatalog,
        modifiers: &'a dyn ModifierCatalog,
    ) -> Self {
        Self {
            units,
            templates,
            presets,
            modifiers,
            settings: GeneratorSettings::default(),
        }
    }

    /// Replace the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Active settings.
    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generate a scenario, seeded from `config.seed` when present.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_with`].
    pub fn generate(&self, config: &ScenarioGeneratorConfig) -> Result<GeneratedScenario> {
        let mut rng = random_source(config.seed);
        self.generate_with(config, &mut rng)
    }

    /// Generate a scenario drawing from a caller-supplied source.
    ///
    /// # Errors
    ///
    /// Fails before drawing when the config is out of range, the requested
    /// template does not exist, or there are no templates or map presets.
    pub fn generate_with(
        &self,
        config: &ScenarioGeneratorConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<GeneratedScenario> {
        config.validate()?;
        if self.templates.templates().is_empty() {
            return Err(GeneratorError::EmptyCatalog("templates"));
        }
        if self.presets.presets().is_empty() {
            return Err(GeneratorError::EmptyCatalog("map presets"));
        }
        if let Some(id) = &config.template_id {
            if self.templates.template(id).is_none() {
                return Err(GeneratorError::TemplateNotFound(id.clone()));
            }
        }

        let template = self.choose_template(config, rng)?.clone();
        let biome = self.choose_biome(config, &template, rng);
        let map_preset = self.choose_map_preset(biome, rng)?.clone();
        let op_for = self.generate_op_for(config, &template, rng)?;

        let candidates = candidate_modifiers(
            self.modifiers,
            template.objective_type,
            biome,
            config.allow_negative_modifiers,
        );
        let max_modifiers = usize::try_from(config.max_modifiers).unwrap_or(0);
        let modifiers = select_modifiers(&candidates, max_modifiers, rng);
        let turn_limit =
            effective_turn_limit(template.turn_limit, &modifiers, self.settings.min_turn_limit);

        let scenario = GeneratedScenario {
            id: Uuid::new_v4(),
            template,
            biome,
            map_preset,
            op_for,
            modifiers,
            turn_limit,
            generated_at: Utc::now(),
            seed: config.seed,
        };
        tracing::info!(
            "Generated scenario '{}' on {} ({}): {} OpFor units at {} BV, {} modifier(s), turn limit {}",
            scenario.template.id,
            scenario.map_preset.id,
            scenario.biome,
            scenario.op_for.units.len(),
            scenario.op_for.total_bv,
            scenario.modifiers.len(),
            scenario.turn_limit
        );
        Ok(scenario)
    }

    fn choose_template(
        &self,
        config: &ScenarioGeneratorConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<&'a ScenarioTemplate> {
        let templates = self.templates;

        if let Some(id) = &config.template_id {
            return templates
                .template(id)
                .ok_or_else(|| GeneratorError::TemplateNotFound(id.clone()));
        }

        if let Some(objective) = config.scenario_type {
            let matching = templates.templates_for_objective(objective);
            if let Some(template) = pick(rng, &matching).copied() {
                return Ok(template);
            }
            tracing::debug!("No template for objective {objective}; ignoring the objective");
        }

        let fitting: Vec<&ScenarioTemplate> = templates
            .templates()
            .iter()
            .filter(|t| t.accepts_unit_count(config.player_unit_count))
            .collect();
        if let Some(template) = pick(rng, &fitting).copied() {
            return Ok(template);
        }

        tracing::debug!(
            "No template fits {} player units; using the first template",
            config.player_unit_count
        );
        templates
            .templates()
            .first()
            .ok_or(GeneratorError::EmptyCatalog("templates"))
    }

    fn choose_biome(
        &self,
        config: &ScenarioGeneratorConfig,
        template: &ScenarioTemplate,
        rng: &mut dyn RandomSource,
    ) -> Biome {
        if let Some(biome) = config.biome {
            return biome;
        }
        pick(rng, &template.suggested_biomes)
            .copied()
            .unwrap_or(self.settings.baseline_biome)
    }

    fn choose_map_preset(&self, biome: Biome, rng: &mut dyn RandomSource) -> Result<&'a MapPreset> {
        let presets = self.presets;
        let in_biome = presets.presets_for_biome(biome);
        if let Some(preset) = pick(rng, &in_biome).copied() {
            return Ok(preset);
        }

        let baseline = self.settings.baseline_biome;
        let fallback = presets.presets_for_biome(baseline);
        if let Some(preset) = pick(rng, &fallback).copied() {
            tracing::warn!("No map preset for {biome}; using a {baseline} preset");
            return Ok(preset);
        }

        tracing::warn!("No map preset for {biome} or {baseline}; using the first preset");
        presets
            .presets()
            .first()
            .ok_or(GeneratorError::EmptyCatalog("map presets"))
    }

    fn generate_op_for(
        &self,
        config: &ScenarioGeneratorConfig,
        template: &ScenarioTemplate,
        rng: &mut dyn RandomSource,
    ) -> Result<OpForGeneratorResult> {
        let (min_lance, max_lance) = config.lance_bounds();
        let mix = config
            .unit_type_mix
            .clone()
            .unwrap_or_else(|| self.settings.default_unit_type_mix.clone());

        let mut template_multiplier = template.default_opfor_multiplier;
        if !template_multiplier.is_finite() || template_multiplier <= 0.0 {
            tracing::warn!(
                "Template '{}' has OpFor multiplier {}; using 1.0",
                template.id,
                template_multiplier
            );
            template_multiplier = 1.0;
        }

        let op_for_config =
            OpForGeneratorConfig::new(config.player_bv, config.faction.clone(), config.era)
                .with_difficulty(config.difficulty * template_multiplier)
                .with_unit_type_mix(mix)
                .with_skill_level(skill_level_for_difficulty(config.difficulty))
                .with_lance_bounds(min_lance, max_lance);

        OpForGenerator::new(self.units)
            .with_settings(self.settings.clone())
            .generate(&op_for_config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SeededRandom, SequenceRandom};
    use crate::skills::SkillLevel;

    fn pirates() -> ScenarioGeneratorConfig {
        ScenarioGeneratorConfig::new(5000, 4, "Pirates", Era::ClanInvasion)
    }

    #[test]
    fn test_concrete_pirates_scenario() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let scenario = generator.generate(&pirates()).unwrap();

        assert!(!scenario.op_for.units.is_empty());
        assert!(scenario.modifiers.is_empty());
        assert_eq!(scenario.op_for.target_bv, 5000);
        assert_eq!(scenario.op_for.metadata.skill_level, SkillLevel::Mixed);
    }

    #[test]
    fn test_lance_bounds() {
        assert_eq!(pirates().lance_bounds(), (2, 6));
        let mut single = pirates();
        single.player_unit_count = 1;
        assert_eq!(single.lance_bounds(), (1, 2));
        single.player_unit_count = 5;
        assert_eq!(single.lance_bounds(), (2, 8));
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let config = pirates().with_modifiers(3, true).with_seed(42);

        let a = generator.generate(&config).unwrap();
        let b = generator.generate(&config).unwrap();
        assert_eq!(a.template.id, b.template.id);
        assert_eq!(a.map_preset.id, b.map_preset.id);
        assert_eq!(a.modifier_ids(), b.modifier_ids());
        assert_eq!(a.turn_limit, b.turn_limit);
        assert_eq!(a.op_for, b.op_for);
        assert_ne!(a.id, b.id);
        assert_eq!(a.seed, Some(42));
    }

    #[test]
    fn test_explicit_template_and_biome() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let config = pirates().with_template("base-assault").with_biome(Biome::Urban);
        let mut rng = SeededRandom::new(1);
        let scenario = generator.generate_with(&config, &mut rng).unwrap();

        assert_eq!(scenario.template.id, "base-assault");
        assert_eq!(scenario.biome, Biome::Urban);
        assert_eq!(scenario.map_preset.biome, Biome::Urban);
    }

    #[test]
    fn test_unknown_template_rejected() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let err = generator
            .generate(&pirates().with_template("no-such-template"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::TemplateNotFound(_)));
    }

    #[test]
    fn test_objective_filter() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let config = pirates().with_scenario_type(ObjectiveType::Defend);
        let mut rng = SeededRandom::new(4);
        let scenario = generator.generate_with(&config, &mut rng).unwrap();
        assert_eq!(scenario.template.objective_type, ObjectiveType::Defend);
    }

    #[test]
    fn test_objective_without_template_falls_through() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let config = pirates().with_scenario_type(ObjectiveType::Extraction);
        let mut rng = SeededRandom::new(4);
        let scenario = generator.generate_with(&config, &mut rng).unwrap();
        assert!(scenario.template.accepts_unit_count(4));
    }

    #[test]
    fn test_no_fitting_template_uses_first() {
        let content = ContentTables {
            templates: vec![
                ScenarioTemplate {
                    min_player_units: 10,
                    ..ContentTables::builtin().templates[2].clone()
                },
                ScenarioTemplate {
                    min_player_units: 12,
                    ..ContentTables::builtin().templates[0].clone()
                },
            ],
            ..ContentTables::builtin()
        };
        let generator = ScenarioGenerator::new(&content);
        let scenario = generator.generate(&pirates()).unwrap();
        assert_eq!(scenario.template.id, content.templates[0].id);
    }

    #[test]
    fn test_biome_without_presets_uses_baseline() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let config = pirates().with_biome(Biome::Lunar);
        let mut rng = SeededRandom::new(9);
        let scenario = generator.generate_with(&config, &mut rng).unwrap();
        assert_eq!(scenario.biome, Biome::Lunar);
        assert_eq!(scenario.map_preset.biome, Biome::Temperate);
    }

    #[test]
    fn test_settings_shape_fallbacks_and_turn_floor() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content).with_settings(
            GeneratorSettings::default()
                .with_baseline_biome(Biome::Desert)
                .with_min_turn_limit(8),
        );
        let config = pirates()
            .with_template("recon-in-force")
            .with_biome(Biome::Lunar)
            .with_modifiers(6, true);

        let mut shortened = 0;
        for seed in 0..100 {
            let scenario = generator.generate(&config.clone().with_seed(seed)).unwrap();
            assert_eq!(scenario.map_preset.biome, Biome::Desert);
            if scenario.modifier_ids().contains(&"time-pressure") {
                // 8 - 4 is positive but under the configured floor
                assert_eq!(scenario.turn_limit, 8);
                shortened += 1;
            } else {
                assert!(scenario.turn_limit >= 8);
            }
        }
        assert!(shortened > 0);
    }

    #[test]
    fn test_turn_limit_unlimited_template() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let config = ScenarioGeneratorConfig::new(9000, 8, "Pirates", Era::ClanInvasion)
            .with_template("war-of-attrition");
        let scenario = generator.generate(&config).unwrap();
        assert!(!scenario.template.has_turn_limit());
        assert_eq!(scenario.turn_limit, 0);
    }

    #[test]
    fn test_extension_gives_unlimited_template_a_limit() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let config = ScenarioGeneratorConfig::new(9000, 8, "Pirates", Era::ClanInvasion)
            .with_template("war-of-attrition")
            .with_modifiers(6, true);

        let mut extended = 0;
        for seed in 0..100 {
            let scenario = generator.generate(&config.clone().with_seed(seed)).unwrap();
            if scenario.modifier_ids().contains(&"extended-engagement") {
                // 0 + 4 is positive but under the minimum
                assert_eq!(scenario.turn_limit, 5);
                extended += 1;
            } else {
                assert_eq!(scenario.turn_limit, 0);
            }
        }
        assert!(extended > 0);
    }

    #[test]
    fn test_invalid_config_rejected_before_drawing() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let mut rng = SequenceRandom::new(vec![0.5]);

        let mut negative_bv = pirates();
        negative_bv.player_bv = -10;
        let mut no_units = pirates();
        no_units.player_unit_count = 0;
        let mut huge_force = pirates();
        huge_force.player_unit_count = u32::MAX;
        for config in [
            negative_bv,
            no_units,
            huge_force,
            pirates().with_difficulty(0.0),
            pirates().with_modifiers(-1, false),
        ] {
            let err = generator.generate_with(&config, &mut rng).unwrap_err();
            assert!(matches!(err, GeneratorError::InvalidConfig { .. }));
        }
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_largest_force_is_accepted() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let config =
            ScenarioGeneratorConfig::new(120_000, MAX_PLAYER_UNITS, "Pirates", Era::ClanInvasion)
                .with_seed(4);
        let scenario = generator.generate(&config).unwrap();
        assert!(!scenario.op_for.units.is_empty());
    }

    #[test]
    fn test_bad_template_multiplier_falls_back() {
        let mut content = ContentTables::builtin();
        for template in &mut content.templates {
            template.default_opfor_multiplier = 0.0;
        }
        let generator = ScenarioGenerator::new(&content);
        let scenario = generator.generate(&pirates().with_seed(3)).unwrap();

        assert_eq!(scenario.op_for.target_bv, 5000);
        assert!((scenario.op_for.metadata.difficulty_multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_catalogs_rejected() {
        let content = ContentTables::default();
        let generator = ScenarioGenerator::new(&content);
        let err = generator.generate(&pirates()).unwrap_err();
        assert!(matches!(err, GeneratorError::EmptyCatalog(_)));
    }

    #[test]
    fn test_scenario_serializes_to_json() {
        let content = ContentTables::builtin();
        let generator = ScenarioGenerator::new(&content);
        let scenario = generator.generate(&pirates().with_seed(5)).unwrap();
        let json = serde_json::to_string(&scenario).unwrap();
        let back: GeneratedScenario = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, scenario.id);
        assert_eq!(back.template, scenario.template);
    }
}

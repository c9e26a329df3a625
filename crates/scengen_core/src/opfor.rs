//! Opposing force generation.
//!
//! [`OpForGenerator`] turns a player BV budget into a crewed, lance-organized
//! force drawn from a faction/era unit table:
//!
//! 1. `target_bv = round(player_bv × difficulty_multiplier)`.
//! 2. Each unit-type category in the mix gets `target_bv × pct / 100` of the
//!    budget. Shares below the settings' minimum are skipped. Percentages are
//!    proportions of target BV (not of unit count) and need not total 100.
//! 3. If no category produced a unit, one unconstrained selection over the
//!    whole table fills the full target within the lance-size bounds.
//! 4. Every unit gets a pilot; lances are filled four at a time in
//!    production order.
//!
//! A missing or empty table yields an empty force (`total_bv = 0`,
//! `bv_deviation = -1.0`) rather than an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::UnitTableSource;
use crate::config::{
    validate_mix, validate_tolerance, GeneratorSettings, LANCE_SIZE, MAX_OPFOR_UNITS,
};
use crate::data::{Era, RatEntry, UnitType};
use crate::error::{GeneratorError, Result};
use crate::names::generate_pilot_name;
use crate::random::RandomSource;
use crate::rat::{select_units, UnitQuery};
use crate::skills::{estimate_skill_bv_multiplier, roll_pilot_skills, SkillLevel, SkillVariance};

/// Input to [`OpForGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpForGeneratorConfig {
    /// BV of the player's force. Must be positive.
    pub player_bv: i64,
    /// Scales the player BV into the OpFor target. Must be positive.
    pub difficulty_multiplier: f64,
    /// Faction whose table to draw from.
    pub faction: String,
    /// Era of the table.
    pub era: Era,
    /// Category → percentage of target BV.
    pub unit_type_mix: BTreeMap<UnitType, f64>,
    /// Skill level of every pilot.
    #[serde(default)]
    pub skill_level: SkillLevel,
    /// Overrides the settings' variance for `Mixed` pilots.
    #[serde(default)]
    pub skill_variance: Option<SkillVariance>,
    /// Fewest units in the fallback selection.
    pub min_lance_size: u32,
    /// Most units in the fallback selection; also scales per-category caps.
    pub max_lance_size: u32,
    /// Overrides the settings' BV tolerance.
    #[serde(default)]
    pub bv_tolerance: Option<f64>,
}

impl OpForGeneratorConfig {
    /// A Regular-skill, single-lance config with the default unit-type mix.
    #[must_use]
    pub fn new(player_bv: i64, faction: impl Into<String>, era: Era) -> Self {
        Self {
            player_bv,
            difficulty_multiplier: 1.0,
            faction: faction.into(),
            era,
            unit_type_mix: GeneratorSettings::default().default_unit_type_mix,
            skill_level: SkillLevel::Regular,
            skill_variance: None,
            min_lance_size: 1,
            max_lance_size: LANCE_SIZE as u32,
            bv_tolerance: None,
        }
    }

    /// Builder: set the difficulty multiplier.
    #[must_use]
    pub fn with_difficulty(mut self, multiplier: f64) -> Self {
        self.difficulty_multiplier = multiplier;
        self
    }

    /// Builder: set the unit-type mix.
    #[must_use]
    pub fn with_unit_type_mix(mut self, mix: BTreeMap<UnitType, f64>) -> Self {
        self.unit_type_mix = mix;
        self
    }

    /// Builder: set the skill level.
    #[must_use]
    pub fn with_skill_level(mut self, level: SkillLevel) -> Self {
        self.skill_level = level;
        self
    }

    /// Builder: override the `Mixed` variance.
    #[must_use]
    pub fn with_skill_variance(mut self, variance: SkillVariance) -> Self {
        self.skill_variance = Some(variance);
        self
    }

    /// Builder: set the lance-size bounds.
    #[must_use]
    pub fn with_lance_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_lance_size = min;
        self.max_lance_size = max;
        self
    }

    /// Builder: override the BV tolerance.
    #[must_use]
    pub fn with_bv_tolerance(mut self, tolerance: f64) -> Self {
        self.bv_tolerance = Some(tolerance);
        self
    }

    /// The BV the force should total.
    #[must_use]
    pub fn target_bv(&self) -> u64 {
        (self.player_bv as f64 * self.difficulty_multiplier)
            .round()
            .max(0.0) as u64
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.player_bv <= 0 {
            return Err(GeneratorError::invalid(
                "player_bv",
                format!("must be positive, got {}", self.player_bv),
            ));
        }
        if !self.difficulty_multiplier.is_finite() || self.difficulty_multiplier <= 0.0 {
            return Err(GeneratorError::invalid(
                "difficulty_multiplier",
                format!("must be positive, got {}", self.difficulty_multiplier),
            ));
        }
        if self.min_lance_size < 1 {
            return Err(GeneratorError::invalid("min_lance_size", "must be at least 1"));
        }
        if self.max_lance_size < self.min_lance_size {
            return Err(GeneratorError::invalid(
                "max_lance_size",
                format!(
                    "must be at least min_lance_size ({}), got {}",
                    self.min_lance_size, self.max_lance_size
                ),
            ));
        }
        if self.max_lance_size > MAX_OPFOR_UNITS {
            return Err(GeneratorError::invalid(
                "max_lance_size",
                format!("must be at most {MAX_OPFOR_UNITS}, got {}", self.max_lance_size),
            ));
        }
        if let Some(tolerance) = self.bv_tolerance {
            validate_tolerance("bv_tolerance", tolerance)?;
        }
        validate_mix("unit_type_mix", &self.unit_type_mix)?;
        if let Some(variance) = &self.skill_variance {
            variance.validate()?;
        }
        Ok(())
    }
}

/// A generated pilot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPilot {
    /// Full name.
    pub name: String,
    /// Gunnery, 1 (best) to 6.
    pub gunnery: i32,
    /// Piloting, 2 (best) to 7.
    pub piloting: i32,
}

/// A crewed unit in the generated force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedUnit {
    /// Chassis name.
    pub chassis: String,
    /// Variant code.
    pub variant: String,
    /// Full designation.
    pub designation: String,
    /// Table BV, before skill adjustment.
    pub bv: u32,
    /// Mass in tons.
    pub tonnage: u32,
    /// Unit type.
    pub unit_type: UnitType,
    /// Assigned pilot.
    pub pilot: GeneratedPilot,
    /// `lance-1`, `lance-2`, ... in production order.
    pub lance_id: String,
}

impl GeneratedUnit {
    fn crew(entry: RatEntry, pilot: GeneratedPilot, lance_id: String) -> Self {
        Self {
            chassis: entry.chassis,
            variant: entry.variant,
            designation: entry.designation,
            bv: entry.bv,
            tonnage: entry.tonnage,
            unit_type: entry.unit_type,
            pilot,
            lance_id,
        }
    }

    /// BV adjusted for the pilot's skill.
    #[must_use]
    pub fn adjusted_bv(&self) -> u64 {
        let multiplier = estimate_skill_bv_multiplier(self.pilot.gunnery, self.pilot.piloting);
        (f64::from(self.bv) * multiplier).round().max(0.0) as u64
    }
}

/// Descriptive data about a generated force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpForMetadata {
    /// Faction the force was drawn for.
    pub faction: String,
    /// Era of the table.
    pub era: Era,
    /// Multiplier applied to the player BV.
    pub difficulty_multiplier: f64,
    /// Number of distinct lances.
    pub lance_count: u32,
    /// Skill level requested.
    pub skill_level: SkillLevel,
}

/// Output of [`OpForGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpForGeneratorResult {
    /// Units in production order.
    pub units: Vec<GeneratedUnit>,
    /// Sum of table BV.
    pub total_bv: u64,
    /// BV the force aimed for.
    pub target_bv: u64,
    /// `(total_bv - target_bv) / target_bv`.
    pub bv_deviation: f64,
    /// Descriptive data.
    pub metadata: OpForMetadata,
}

impl OpForGeneratorResult {
    /// Units grouped by lance, lances in production order.
    #[must_use]
    pub fn lances(&self) -> Vec<(&str, Vec<&GeneratedUnit>)> {
        let mut lances: Vec<(&str, Vec<&GeneratedUnit>)> = Vec::new();
        for unit in &self.units {
            match lances.iter_mut().find(|(id, _)| *id == unit.lance_id) {
                Some((_, members)) => members.push(unit),
                None => lances.push((&unit.lance_id, vec![unit])),
            }
        }
        lances
    }

    /// Total BV after skill adjustment.
    #[must_use]
    pub fn adjusted_total_bv(&self) -> u64 {
        self.units.iter().map(GeneratedUnit::adjusted_bv).sum()
    }

    /// Whether the deviation magnitude is within `tolerance`.
    #[must_use]
    pub fn is_within_tolerance(&self, tolerance: f64) -> bool {
        self.bv_deviation.abs() <= tolerance
    }
}

/// Builds opposing forces from a unit table source.
///
/// Holds no random state; every call takes its own [`RandomSource`], so one
/// generator can serve many threads.
pub struct OpForGenerator<'a> {
    units: &'a dyn UnitTableSource,
    settings: GeneratorSettings,
}

impl<'a> OpForGenerator<'a> {
    /// Create a generator with default settings.
    #[must_use]
    pub fn new(units: &'a dyn UnitTableSource) -> Self {
        Self {
            units,
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

    /// Generate a force.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidConfig`] for out-of-range config
    /// values, before any draw is taken.
    pub fn generate(
        &self,
        config: &OpForGeneratorConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<OpForGeneratorResult> {
        config.validate()?;
        let target_bv = config.target_bv();

        let entries = match self.units.unit_table(&config.faction, config.era) {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                tracing::warn!(
                    "No unit table for {} in {}; generating an empty force",
                    config.faction,
                    config.era
                );
                return Ok(assemble(config, target_bv, Vec::new()));
            }
        };

        let selected = self.select(entries, config, target_bv, rng);
        let variance = config.skill_variance.unwrap_or(self.settings.skill_variance);
        let units = selected
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| {
                let skills = roll_pilot_skills(config.skill_level, &variance, rng);
                let pilot = GeneratedPilot {
                    name: generate_pilot_name(rng),
                    gunnery: skills.gunnery,
                    piloting: skills.piloting,
                };
                GeneratedUnit::crew(entry, pilot, lance_id(idx))
            })
            .collect();

        let result = assemble(config, target_bv, units);
        tracing::debug!(
            "Generated {} OpFor: {} units, {} / {} BV ({:+.1}%)",
            config.faction,
            result.units.len(),
            result.total_bv,
            result.target_bv,
            result.bv_deviation * 100.0
        );
        Ok(result)
    }

    fn select(
        &self,
        entries: &[RatEntry],
        config: &OpForGeneratorConfig,
        target_bv: u64,
        rng: &mut dyn RandomSource,
    ) -> Vec<RatEntry> {
        let tolerance = config.bv_tolerance.unwrap_or(self.settings.bv_tolerance);
        let target = target_bv as f64;
        let mut selected = Vec::new();

        for (&unit_type, &pct) in &config.unit_type_mix {
            if pct <= 0.0 {
                continue;
            }
            let share = target * pct / 100.0;
            if share < self.settings.min_category_bv {
                tracing::debug!("Skipping {unit_type}: share {share:.0} BV is too small");
                continue;
            }
            let cap = (f64::from(config.max_lance_size) * pct / 100.0).ceil().max(1.0) as usize;
            let query = UnitQuery::new(share, tolerance)
                .with_unit_type(unit_type)
                .with_unit_bounds(1, cap);
            selected.extend(select_units(entries, &query, rng));
        }

        if selected.is_empty() {
            tracing::debug!(
                "No category produced units; selecting across the whole {} table",
                config.faction
            );
            let query = UnitQuery::new(target, tolerance).with_unit_bounds(
                config.min_lance_size as usize,
                config.max_lance_size as usize,
            );
            selected = select_units(entries, &query, rng);
        }
        selected
    }
}

fn lance_id(index: usize) -> String {
    format!("lance-{}", index / LANCE_SIZE + 1)
}

fn assemble(
    config: &OpForGeneratorConfig,
    target_bv: u64,
    units: Vec<GeneratedUnit>,
) -> OpForGeneratorResult {
    let total_bv: u64 = units.iter().map(|u| u64::from(u.bv)).sum();
    let bv_deviation = if target_bv == 0 {
        0.0
    } else {
        (total_bv as f64 - target_bv as f64) / target_bv as f64
    };
    let lance_count = units.len().div_ceil(LANCE_SIZE) as u32;

    OpForGeneratorResult {
        units,
        total_bv,
        target_bv,
        bv_deviation,
        metadata: OpForMetadata {
            faction: config.faction.clone(),
            era: config.era,
            difficulty_multiplier: config.difficulty_multiplier,
            lance_count,
            skill_level: config.skill_level,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ContentTables;
    use crate::random::{SeededRandom, SequenceRandom};

    fn pirates(player_bv: i64) -> OpForGeneratorConfig {
        OpForGeneratorConfig::new(player_bv, "Pirates", Era::ClanInvasion).with_lance_bounds(2, 6)
    }

    #[test]
    fn test_target_bv_rounds() {
        let config = pirates(5000).with_difficulty(1.25);
        assert_eq!(config.target_bv(), 6250);
        let config = pirates(333).with_difficulty(1.5);
        assert_eq!(config.target_bv(), 500);
    }

    #[test]
    fn test_generates_units_near_target() {
        let content = ContentTables::builtin();
        let generator = OpForGenerator::new(&content);
        let mut rng = SeededRandom::new(42);
        let result = generator.generate(&pirates(5000), &mut rng).unwrap();

        assert!(!result.units.is_empty());
        assert_eq!(result.target_bv, 5000);
        assert!(result.bv_deviation.abs() < 0.3, "deviation {}", result.bv_deviation);
        let sum: u64 = result.units.iter().map(|u| u64::from(u.bv)).sum();
        assert_eq!(sum, result.total_bv);
    }

    #[test]
    fn test_lances_hold_at_most_four() {
        let content = ContentTables::builtin();
        let generator = OpForGenerator::new(&content);
        let config = pirates(12_000).with_lance_bounds(6, 12);
        let mut rng = SeededRandom::new(7);
        let result = generator.generate(&config, &mut rng).unwrap();

        let lances = result.lances();
        assert!(lances.iter().all(|(_, members)| members.len() <= LANCE_SIZE));
        assert_eq!(result.metadata.lance_count as usize, lances.len());
        assert_eq!(result.units[0].lance_id, "lance-1");
    }

    #[test]
    fn test_fixed_skill_is_exact() {
        let content = ContentTables::builtin();
        let generator = OpForGenerator::new(&content);
        let config = pirates(6000).with_skill_level(SkillLevel::Veteran);
        let mut rng = SeededRandom::new(3);
        let result = generator.generate(&config, &mut rng).unwrap();
        for unit in &result.units {
            assert_eq!((unit.pilot.gunnery, unit.pilot.piloting), (3, 4));
        }
    }

    #[test]
    fn test_missing_table_degrades() {
        let content = ContentTables::builtin();
        let generator = OpForGenerator::new(&content);
        let config = OpForGeneratorConfig::new(5000, "Nobody", Era::DarkAge);
        let mut rng = SequenceRandom::new(vec![0.5]);
        let result = generator.generate(&config, &mut rng).unwrap();

        assert!(result.units.is_empty());
        assert_eq!(result.total_bv, 0);
        assert!((result.bv_deviation + 1.0).abs() < f64::EPSILON);
        assert_eq!(result.metadata.lance_count, 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_fallback_when_mix_matches_nothing() {
        let content = ContentTables::builtin();
        let generator = OpForGenerator::new(&content);
        let config = pirates(4000)
            .with_unit_type_mix(BTreeMap::from([(UnitType::Aerospace, 100.0)]));
        let mut rng = SeededRandom::new(5);
        let result = generator.generate(&config, &mut rng).unwrap();

        assert!(result.units.len() >= 2);
        assert!(result.units.len() <= 6);
    }

    #[test]
    fn test_small_shares_are_skipped() {
        let content = ContentTables::builtin();
        let generator = OpForGenerator::new(&content);
        // 1% of 5000 is 50 BV, under the 100 BV floor.
        let config = pirates(5000).with_unit_type_mix(BTreeMap::from([
            (UnitType::BattleMech, 99.0),
            (UnitType::Infantry, 1.0),
        ]));
        let mut rng = SeededRandom::new(8);
        let result = generator.generate(&config, &mut rng).unwrap();
        assert!(result.units.iter().all(|u| u.unit_type != UnitType::Infantry));
    }

    #[test]
    fn test_category_counts_capped_by_share() {
        let content = ContentTables::builtin();
        let generator = OpForGenerator::new(&content);
        // Budget far above what six units can reach, so only the caps bind:
        // ceil(6 * 0.75) = 5 mechs, ceil(6 * 0.25) = 2 vehicles.
        let config = pirates(30_000).with_unit_type_mix(BTreeMap::from([
            (UnitType::BattleMech, 75.0),
            (UnitType::Vehicle, 25.0),
        ]));

        for seed in 0..20 {
            let mut rng = SeededRandom::new(seed);
            let result = generator.generate(&config, &mut rng).unwrap();
            let count = |t: UnitType| result.units.iter().filter(|u| u.unit_type == t).count();

            assert_eq!(count(UnitType::BattleMech), 5, "seed {seed}");
            assert_eq!(count(UnitType::Vehicle), 2, "seed {seed}");
        }
    }

    #[test]
    fn test_min_category_bv_setting() {
        let content = ContentTables::builtin();
        // The 25% vehicle share of 5000 BV is 1250, under a 2000 BV floor.
        let generator = OpForGenerator::new(&content)
            .with_settings(GeneratorSettings::default().with_min_category_bv(2000.0));
        let mut rng = SeededRandom::new(11);
        let result = generator.generate(&pirates(5000), &mut rng).unwrap();

        assert!(!result.units.is_empty());
        assert!(result.units.iter().all(|u| u.unit_type == UnitType::BattleMech));
        assert!((generator.settings().min_category_bv - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_adjusted_total_and_tolerance() {
        let veteran = |bv: u32, idx: usize| {
            GeneratedUnit::crew(
                RatEntry::new("Griffin", "GRF-1N", bv, 55, UnitType::BattleMech),
                GeneratedPilot {
                    name: "Test Pilot".to_string(),
                    gunnery: 3,
                    piloting: 4,
                },
                lance_id(idx),
            )
        };
        let config = pirates(2500);
        let result = assemble(&config, 2500, vec![veteran(1000, 0), veteran(1000, 1)]);

        assert_eq!(result.total_bv, 2000);
        assert_eq!(result.adjusted_total_bv(), 2400);
        assert!((result.bv_deviation + 0.2).abs() < 1e-9);
        assert!(result.is_within_tolerance(0.2));
        assert!(!result.is_within_tolerance(0.15));
    }

    #[test]
    fn test_invalid_config_rejected_before_drawing() {
        let content = ContentTables::builtin();
        let generator = OpForGenerator::new(&content);
        let mut rng = SequenceRandom::new(vec![0.5]);

        for config in [
            pirates(0),
            pirates(5000).with_difficulty(0.0),
            pirates(5000).with_lance_bounds(0, 4),
            pirates(5000).with_lance_bounds(4, 2),
            pirates(5000).with_lance_bounds(1, MAX_OPFOR_UNITS + 1),
            pirates(5000).with_bv_tolerance(1.5),
        ] {
            let err = generator.generate(&config, &mut rng).unwrap_err();
            assert!(matches!(err, GeneratorError::InvalidConfig { .. }));
        }
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_adjusted_bv_uses_skill() {
        let unit = GeneratedUnit::crew(
            RatEntry::new("Marauder", "MAD-3R", 1000, 75, UnitType::BattleMech),
            GeneratedPilot {
                name: "Test Pilot".to_string(),
                gunnery: 3,
                piloting: 4,
            },
            lance_id(0),
        );
        assert_eq!(unit.adjusted_bv(), 1200);
    }

    #[test]
    fn test_lance_ids() {
        assert_eq!(lance_id(0), "lance-1");
        assert_eq!(lance_id(3), "lance-1");
        assert_eq!(lance_id(4), "lance-2");
        assert_eq!(lance_id(9), "lance-3");
    }
}

//! Generator-wide tuning knobs.
//!
//! [`GeneratorSettings`] holds the constants both generators share. Every
//! field has a default, so a settings file only needs to list what it
//! overrides:
//!
//! ```ron
//! GeneratorSettings(
//!     bv_tolerance: 0.2,
//!     baseline_biome: Desert,
//! )
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{Biome, UnitType};
use crate::error::{GeneratorError, Result};
use crate::skills::SkillVariance;

/// Maximum number of units in one lance.
pub const LANCE_SIZE: usize = 4;

/// Largest player force a scenario can be generated for.
pub const MAX_PLAYER_UNITS: u32 = 100;

/// Largest force the OpFor generator will field.
pub const MAX_OPFOR_UNITS: u32 = 150;

/// Shared settings for [`crate::opfor::OpForGenerator`] and
/// [`crate::scenario::ScenarioGenerator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Relative BV tolerance used when filling a budget.
    pub bv_tolerance: f64,
    /// Categories whose BV share falls below this are skipped.
    pub min_category_bv: f64,
    /// Shortest turn limit a modifier may push a limited scenario down to.
    pub min_turn_limit: u32,
    /// Biome used when a template suggests none, and for the preset fallback.
    pub baseline_biome: Biome,
    /// Unit-type mix used when a scenario request does not carry one.
    pub default_unit_type_mix: BTreeMap<UnitType, f64>,
    /// Variance applied to `Mixed` pilots.
    pub skill_variance: SkillVariance,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            bv_tolerance: 0.15,
            min_category_bv: 100.0,
            min_turn_limit: 5,
            baseline_biome: Biome::Temperate,
            default_unit_type_mix: BTreeMap::from([
                (UnitType::BattleMech, 75.0),
                (UnitType::Vehicle, 25.0),
            ]),
            skill_variance: SkillVariance::default(),
        }
    }
}

impl GeneratorSettings {
    /// Load settings from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| GeneratorError::ContentRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings: Self = ron::from_str(&contents).map_err(|e| GeneratorError::ContentParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let settings: Self = ron::from_str(ron).map_err(|e| GeneratorError::ContentParse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Builder: set the BV tolerance.
    #[must_use]
    pub fn with_bv_tolerance(mut self, tolerance: f64) -> Self {
        self.bv_tolerance = tolerance;
        self
    }

    /// Builder: set the minimum category share.
    #[must_use]
    pub fn with_min_category_bv(mut self, bv: f64) -> Self {
        self.min_category_bv = bv;
        self
    }

    /// Builder: set the minimum turn limit.
    #[must_use]
    pub fn with_min_turn_limit(mut self, turns: u32) -> Self {
        self.min_turn_limit = turns;
        self
    }

    /// Builder: set the baseline biome.
    #[must_use]
    pub fn with_baseline_biome(mut self, biome: Biome) -> Self {
        self.baseline_biome = biome;
        self
    }

    /// Builder: set the default unit-type mix.
    #[must_use]
    pub fn with_unit_type_mix(mut self, mix: BTreeMap<UnitType, f64>) -> Self {
        self.default_unit_type_mix = mix;
        self
    }

    /// Builder: set the `Mixed` skill variance.
    #[must_use]
    pub fn with_skill_variance(mut self, variance: SkillVariance) -> Self {
        self.skill_variance = variance;
        self
    }

    /// Check every field is within range.
    pub fn validate(&self) -> Result<()> {
        validate_tolerance("bv_tolerance", self.bv_tolerance)?;
        if !self.min_category_bv.is_finite() || self.min_category_bv < 0.0 {
            return Err(GeneratorError::invalid(
                "min_category_bv",
                format!("must be a non-negative number, got {}", self.min_category_bv),
            ));
        }
        if self.min_turn_limit == 0 {
            return Err(GeneratorError::invalid("min_turn_limit", "must be at least 1"));
        }
        validate_mix("default_unit_type_mix", &self.default_unit_type_mix)?;
        self.skill_variance.validate()
    }
}

/// Tolerances are fractions of the target within `[0, 1]`.
pub(crate) fn validate_tolerance(field: &'static str, tolerance: f64) -> Result<()> {
    if (0.0..=1.0).contains(&tolerance) {
        Ok(())
    } else {
        Err(GeneratorError::invalid(
            field,
            format!("must be within [0, 1], got {tolerance}"),
        ))
    }
}

/// Mix percentages must be finite and non-negative; they need not total 100.
pub(crate) fn validate_mix(field: &'static str, mix: &BTreeMap<UnitType, f64>) -> Result<()> {
    for (unit_type, pct) in mix {
        if !pct.is_finite() || *pct < 0.0 {
            return Err(GeneratorError::invalid(
                field,
                format!("percentage for {unit_type} must be non-negative, got {pct}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GeneratorSettings::default();
        assert!((settings.bv_tolerance - 0.15).abs() < f64::EPSILON);
        assert_eq!(settings.min_turn_limit, 5);
        assert_eq!(settings.baseline_biome, Biome::Temperate);
        assert_eq!(settings.default_unit_type_mix.get(&UnitType::BattleMech), Some(&75.0));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let settings = GeneratorSettings::from_ron_str(
            "GeneratorSettings(bv_tolerance: 0.2, baseline_biome: Desert)",
        )
        .unwrap();
        assert!((settings.bv_tolerance - 0.2).abs() < f64::EPSILON);
        assert_eq!(settings.baseline_biome, Biome::Desert);
        assert_eq!(settings.min_turn_limit, 5);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err =
            GeneratorSettings::from_ron_str("GeneratorSettings(bv_tolerance: 3.0)").unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::InvalidConfig { field: "bv_tolerance", .. }
        ));
    }

    #[test]
    fn test_builders() {
        let settings = GeneratorSettings::default()
            .with_min_category_bv(250.0)
            .with_min_turn_limit(8)
            .with_baseline_biome(Biome::Arctic);
        assert!((settings.min_category_bv - 250.0).abs() < f64::EPSILON);
        assert_eq!(settings.min_turn_limit, 8);
        assert_eq!(settings.baseline_biome, Biome::Arctic);
        assert!(settings.validate().is_ok());

        let err = GeneratorSettings::default()
            .with_min_turn_limit(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::InvalidConfig { field: "min_turn_limit", .. }
        ));
        assert!(GeneratorSettings::default()
            .with_min_category_bv(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_negative_mix_rejected() {
        let settings = GeneratorSettings::default()
            .with_unit_type_mix(BTreeMap::from([(UnitType::Vehicle, -5.0)]));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        std::fs::write(&path, "GeneratorSettings(min_turn_limit: 3)").unwrap();
        let settings = GeneratorSettings::load(&path).unwrap();
        assert_eq!(settings.min_turn_limit, 3);
    }
}

//! Pilot skill levels, skill rolls and the skill BV multiplier.
//!
//! Gunnery and piloting are "lower is better" target numbers. Gunnery stays
//! within [`GUNNERY_MIN`]..=[`GUNNERY_MAX`] and piloting within
//! [`PILOTING_MIN`]..=[`PILOTING_MAX`] no matter how a pilot was rolled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::ParseNameError;
use crate::error::{GeneratorError, Result};
use crate::random::{int_in_range, RandomSource};

/// Best possible gunnery.
pub const GUNNERY_MIN: i32 = 1;
/// Worst possible gunnery.
pub const GUNNERY_MAX: i32 = 6;
/// Best possible piloting.
pub const PILOTING_MIN: i32 = 2;
/// Worst possible piloting.
pub const PILOTING_MAX: i32 = 7;

/// Reference skill (4/5) used by [`estimate_skill_bv_multiplier`].
pub const REFERENCE_SKILL_SUM: i32 = 9;
/// BV gained per point better than the reference.
const BV_GAIN_PER_POINT: f64 = 0.10;
/// BV lost per point worse than the reference.
const BV_LOSS_PER_POINT: f64 = 0.08;

/// Named skill level of a generated force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SkillLevel {
    /// 5/6.
    Green,
    /// 4/5.
    #[default]
    Regular,
    /// 3/4.
    Veteran,
    /// 2/3.
    Elite,
    /// 1/3.
    Heroic,
    /// 1/2.
    Legendary,
    /// Regular baseline with per-pilot variance.
    Mixed,
}

impl SkillLevel {
    /// Every skill level.
    pub const ALL: [Self; 7] = [
        Self::Green,
        Self::Regular,
        Self::Veteran,
        Self::Elite,
        Self::Heroic,
        Self::Legendary,
        Self::Mixed,
    ];

    /// Base `(gunnery, piloting)` for this level. `Mixed` uses the Regular pair.
    #[must_use]
    pub const fn base_skills(&self) -> (i32, i32) {
        match self {
            Self::Green => (5, 6),
            Self::Regular | Self::Mixed => (4, 5),
            Self::Veteran => (3, 4),
            Self::Elite => (2, 3),
            Self::Heroic => (1, 3),
            Self::Legendary => (1, 2),
        }
    }

    /// Get the display name for this skill level.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Regular => "Regular",
            Self::Veteran => "Veteran",
            Self::Elite => "Elite",
            Self::Heroic => "Heroic",
            Self::Legendary => "Legendary",
            Self::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SkillLevel {
    type Err = ParseNameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError::new("skill level", s))
    }
}

/// Map a numeric difficulty to the skill level of the opposing force.
#[must_use]
pub fn skill_level_for_difficulty(difficulty: f64) -> SkillLevel {
    if difficulty < 0.7 {
        SkillLevel::Green
    } else if difficulty < 0.9 {
        SkillLevel::Regular
    } else if difficulty < 1.1 {
        SkillLevel::Mixed
    } else if difficulty < 1.3 {
        SkillLevel::Veteran
    } else if difficulty < 1.6 {
        SkillLevel::Elite
    } else {
        SkillLevel::Legendary
    }
}

/// Tuning for `Mixed` skill rolls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillVariance {
    /// Chance that a pilot is one step better on both skills.
    pub elite_chance: f64,
    /// Chance that a pilot is one step worse on both skills.
    pub green_chance: f64,
    /// Maximum per-skill deviation for everyone else.
    pub variance: i32,
}

impl Default for SkillVariance {
    fn default() -> Self {
        Self {
            elite_chance: 0.1,
            green_chance: 0.1,
            variance: 1,
        }
    }
}

impl SkillVariance {
    /// Check that both chances are probabilities and the variance is sane.
    pub fn validate(&self) -> Result<()> {
        for (field, chance) in [
            ("skill_variance.elite_chance", self.elite_chance),
            ("skill_variance.green_chance", self.green_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(GeneratorError::invalid(
                    field,
                    format!("must be within [0, 1], got {chance}"),
                ));
            }
        }
        if !(0..=GUNNERY_MAX).contains(&self.variance) {
            return Err(GeneratorError::invalid(
                "skill_variance.variance",
                format!("must be within [0, {GUNNERY_MAX}], got {}", self.variance),
            ));
        }
        Ok(())
    }
}

/// Outcome of the single roll that decides how a `Mixed` pilot deviates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixedRoll {
    /// Both skills one step better.
    Elite,
    /// Both skills one step worse.
    Green,
    /// Independent signed deltas per skill.
    Variance,
}

impl MixedRoll {
    /// Classify `roll` (in `[0, 1)`) against the two thresholds.
    ///
    /// `roll < elite_chance` is Elite. Otherwise `roll ≥ 1 − green_chance`
    /// (the top of the range) is Green. Elite is tested first, so when the
    /// chances sum past 1 the overlap belongs to Elite and Green keeps only
    /// `1 − elite_chance` of the mass.
    #[must_use]
    pub fn classify(roll: f64, elite_chance: f64, green_chance: f64) -> Self {
        if roll < elite_chance {
            Self::Elite
        } else if green_chance > 0.0 && roll >= 1.0 - green_chance {
            Self::Green
        } else {
            Self::Variance
        }
    }
}

/// A rolled gunnery/piloting pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PilotSkills {
    /// Gunnery target number.
    pub gunnery: i32,
    /// Piloting target number.
    pub piloting: i32,
}

impl PilotSkills {
    /// Build a pair, clamping both skills into their legal ranges.
    #[must_use]
    pub fn clamped(gunnery: i32, piloting: i32) -> Self {
        Self {
            gunnery: gunnery.clamp(GUNNERY_MIN, GUNNERY_MAX),
            piloting: piloting.clamp(PILOTING_MIN, PILOTING_MAX),
        }
    }
}

/// Roll skills for one pilot.
///
/// Fixed levels return their base pair without drawing. `Mixed` takes one
/// draw to classify the pilot, plus two more for [`MixedRoll::Variance`].
pub fn roll_pilot_skills(
    level: SkillLevel,
    variance: &SkillVariance,
    rng: &mut dyn RandomSource,
) -> PilotSkills {
    let (gunnery, piloting) = level.base_skills();
    if level != SkillLevel::Mixed {
        return PilotSkills { gunnery, piloting };
    }

    match MixedRoll::classify(rng.next_f64(), variance.elite_chance, variance.green_chance) {
        MixedRoll::Elite => PilotSkills::clamped(gunnery - 1, piloting - 1),
        MixedRoll::Green => PilotSkills::clamped(gunnery + 1, piloting + 1),
        MixedRoll::Variance => {
            let spread = variance.variance.max(0);
            let gunnery_delta = int_in_range(rng, -spread, spread);
            let piloting_delta = int_in_range(rng, -spread, spread);
            PilotSkills::clamped(gunnery + gunnery_delta, piloting + piloting_delta)
        }
    }
}

/// Estimate how much a pilot's skill changes a unit's effective BV.
///
/// Reference skill is 4/5. Each point better than the reference adds 10%,
/// each point worse removes 8%.
#[must_use]
pub fn estimate_skill_bv_multiplier(gunnery: i32, piloting: i32) -> f64 {
    let diff = REFERENCE_SKILL_SUM - (gunnery + piloting);
    if diff > 0 {
        1.0 + BV_GAIN_PER_POINT * f64::from(diff)
    } else {
        1.0 + BV_LOSS_PER_POINT * f64::from(diff)
    }
}

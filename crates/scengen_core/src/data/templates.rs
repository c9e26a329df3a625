//! Scenario templates and objective types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{matches_name, Biome, ParseNameError};

/// What the player has to accomplish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectiveType {
    /// Destroy or rout the opposing force.
    Destroy,
    /// Seize and hold an objective.
    Capture,
    /// Hold a position against an attacker.
    Defend,
    /// Get units off the far map edge.
    Breakthrough,
    /// Bring a convoy through safely.
    Escort,
    /// Scan objectives and withdraw.
    Recon,
    /// Pick up an asset and leave.
    Extraction,
}

impl ObjectiveType {
    /// Every objective type.
    pub const ALL: [Self; 7] = [
        Self::Destroy,
        Self::Capture,
        Self::Defend,
        Self::Breakthrough,
        Self::Escort,
        Self::Recon,
        Self::Extraction,
    ];

    /// Get the display name for this objective type.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Destroy => "Destroy",
            Self::Capture => "Capture",
            Self::Defend => "Defend",
            Self::Breakthrough => "Breakthrough",
            Self::Escort => "Escort",
            Self::Recon => "Recon",
            Self::Extraction => "Extraction",
        }
    }
}

impl fmt::Display for ObjectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ObjectiveType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| matches_name(s, kind.display_name()))
            .ok_or_else(|| ParseNameError::new("objective type", s))
    }
}

/// A reusable scenario layout.
///
/// # Example RON
///
/// ```ron
/// ScenarioTemplate(
///     id: "standup-fight",
///     name: "Standup Fight",
///     objective_type: Destroy,
///     victory_conditions: ["Destroy or rout all enemy units"],
///     turn_limit: 12,
///     suggested_biomes: [Temperate, Desert],
///     min_player_units: 1,
///     max_player_units: 0,
///     default_opfor_multiplier: 1.0,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTemplate {
    /// Unique template identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Objective the template is built around.
    pub objective_type: ObjectiveType,
    /// Human-readable victory conditions.
    #[serde(default)]
    pub victory_conditions: Vec<String>,
    /// Turn limit; 0 means no limit.
    pub turn_limit: u32,
    /// Biomes the template plays well in.
    #[serde(default)]
    pub suggested_biomes: Vec<Biome>,
    /// Smallest player force the template suits.
    #[serde(default = "default_min_player_units")]
    pub min_player_units: u32,
    /// Largest player force the template suits; 0 means unbounded.
    #[serde(default)]
    pub max_player_units: u32,
    /// Multiplier applied on top of the requested difficulty.
    #[serde(default = "default_opfor_multiplier")]
    pub default_opfor_multiplier: f64,
}

/// Default minimum player unit count.
const fn default_min_player_units() -> u32 {
    1
}

/// Default OpFor multiplier.
const fn default_opfor_multiplier() -> f64 {
    1.0
}

impl ScenarioTemplate {
    /// Check whether a player force of `unit_count` fits this template.
    #[must_use]
    pub fn accepts_unit_count(&self, unit_count: u32) -> bool {
        unit_count >= self.min_player_units
            && (self.max_player_units == 0 || unit_count <= self.max_player_units)
    }

    /// Whether the template has a turn limit at all.
    #[must_use]
    pub const fn has_turn_limit(&self) -> bool {
        self.turn_limit > 0
    }
}

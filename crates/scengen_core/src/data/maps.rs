//! Biomes and map presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{matches_name, ParseNameError};

/// Terrain category used to pick maps and filter modifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Biome {
    /// Mixed grassland, light woods and rivers.
    #[default]
    Temperate,
    /// Built-up city terrain.
    Urban,
    /// Sand, rock and heat.
    Desert,
    /// Ice, snow and tundra.
    Arctic,
    /// Heavy woods and ruins.
    Jungle,
    /// Wetlands and deltas.
    Swamp,
    /// Lava fields and calderas.
    Volcanic,
    /// Airless, low-gravity terrain.
    Lunar,
}

impl Biome {
    /// Every biome.
    pub const ALL: [Self; 8] = [
        Self::Temperate,
        Self::Urban,
        Self::Desert,
        Self::Arctic,
        Self::Jungle,
        Self::Swamp,
        Self::Volcanic,
        Self::Lunar,
    ];

    /// Get the display name for this biome.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Temperate => "Temperate",
            Self::Urban => "Urban",
            Self::Desert => "Desert",
            Self::Arctic => "Arctic",
            Self::Jungle => "Jungle",
            Self::Swamp => "Swamp",
            Self::Volcanic => "Volcanic",
            Self::Lunar => "Lunar",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Biome {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|biome| matches_name(s, biome.display_name()))
            .ok_or_else(|| ParseNameError::new("biome", s))
    }
}

/// A playable map layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPreset {
    /// Unique preset identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Biome the map belongs to.
    pub biome: Biome,
    /// Map radius in hexes.
    pub radius: u32,
}

impl MapPreset {
    /// Create a new map preset.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, biome: Biome, radius: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            biome,
            radius,
        }
    }
}

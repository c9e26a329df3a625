//! Unit table data: eras, unit types and RAT entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{matches_name, ParseNameError};

/// Historical era used to scope unit tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Era {
    /// 2005-2570.
    AgeOfWar,
    /// 2571-2780.
    StarLeague,
    /// 2781-3049.
    SuccessionWars,
    /// 3050-3061.
    ClanInvasion,
    /// 3062-3067.
    CivilWar,
    /// 3068-3085.
    Jihad,
    /// 3086-3150.
    DarkAge,
    /// 3151 onwards.
    IlClan,
}

impl Era {
    /// Every era in chronological order.
    pub const ALL: [Self; 8] = [
        Self::AgeOfWar,
        Self::StarLeague,
        Self::SuccessionWars,
        Self::ClanInvasion,
        Self::CivilWar,
        Self::Jihad,
        Self::DarkAge,
        Self::IlClan,
    ];

    /// Get the display name for this era.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::AgeOfWar => "Age of War",
            Self::StarLeague => "Star League",
            Self::SuccessionWars => "Succession Wars",
            Self::ClanInvasion => "Clan Invasion",
            Self::CivilWar => "Civil War",
            Self::Jihad => "Jihad",
            Self::DarkAge => "Dark Age",
            Self::IlClan => "ilClan",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Era {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|era| matches_name(s, &format!("{era:?}")) || matches_name(s, era.display_name()))
            .ok_or_else(|| ParseNameError::new("era", s))
    }
}

/// Unit type, also used as the category key of a unit-type mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitType {
    /// Walking war machine.
    BattleMech,
    /// Tracked, wheeled or hover combat vehicle.
    Vehicle,
    /// Conventional infantry platoon.
    Infantry,
    /// Powered-armor squad or point.
    BattleArmor,
    /// Aerospace fighter.
    Aerospace,
    /// ProtoMech point.
    ProtoMech,
}

impl UnitType {
    /// Every unit type.
    pub const ALL: [Self; 6] = [
        Self::BattleMech,
        Self::Vehicle,
        Self::Infantry,
        Self::BattleArmor,
        Self::Aerospace,
        Self::ProtoMech,
    ];

    /// Get the display name for this unit type.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::BattleMech => "BattleMech",
            Self::Vehicle => "Vehicle",
            Self::Infantry => "Infantry",
            Self::BattleArmor => "Battle Armor",
            Self::Aerospace => "Aerospace",
            Self::ProtoMech => "ProtoMech",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for UnitType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| matches_name(s, kind.display_name()))
            .ok_or_else(|| ParseNameError::new("unit type", s))
    }
}

/// One purchasable unit archetype in a faction/era table.
///
/// # Example RON
///
/// ```ron
/// RatEntry(
///     chassis: "Griffin",
///     variant: "GRF-1N",
///     designation: "Griffin GRF-1N",
///     bv: 1272,
///     tonnage: 55,
///     unit_type: BattleMech,
///     weight: 2.0,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatEntry {
    /// Chassis name.
    pub chassis: String,
    /// Variant code.
    pub variant: String,
    /// Full designation shown to players.
    pub designation: String,
    /// Battle value.
    pub bv: u32,
    /// Mass in tons.
    pub tonnage: u32,
    /// Unit type.
    pub unit_type: UnitType,
    /// Relative frequency of this entry within its table.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Default table weight for entries without an explicit weight.
const fn default_weight() -> f64 {
    1.0
}

impl RatEntry {
    /// Create an entry with the default weight. The designation is
    /// `"{chassis} {variant}"`.
    #[must_use]
    pub fn new(
        chassis: impl Into<String>,
        variant: impl Into<String>,
        bv: u32,
        tonnage: u32,
        unit_type: UnitType,
    ) -> Self {
        let chassis = chassis.into();
        let variant = variant.into();
        Self {
            designation: format!("{chassis} {variant}"),
            chassis,
            variant,
            bv,
            tonnage,
            unit_type,
            weight: default_weight(),
        }
    }

    /// Set the table weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A faction/era-scoped random assignment table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitTable {
    /// Faction name (e.g. "Pirates").
    pub faction: String,
    /// Era the table applies to.
    pub era: Era,
    /// Entries available to the faction in this era.
    pub entries: Vec<RatEntry>,
}

impl UnitTable {
    /// Check whether this table serves `faction` in `era`. Faction names
    /// compare case-insensitively.
    #[must_use]
    pub fn serves(&self, faction: &str, era: Era) -> bool {
        self.era == era && self.faction.eq_ignore_ascii_case(faction)
    }
}

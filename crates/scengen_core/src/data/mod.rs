//! Content data structures consumed by the generators.
//!
//! This module contains pure data structures for unit tables, scenario
//! templates, map presets and battle modifiers. All structs are designed to
//! be deserialized from RON files.
//!
//! The generators treat this data as read-only lookup tables; they never
//! validate or modify it.

mod builtin;
mod content;
mod maps;
pub mod modifiers;
mod templates;
mod units;

use thiserror::Error;

pub use content::ContentTables;
pub use maps::{Biome, MapPreset};
pub use modifiers::{
    BattleModifier, ModifierApplicability, ModifierEffect, ModifierImplementation, ModifierKind,
};
pub use templates::{ObjectiveType, ScenarioTemplate};
pub use units::{Era, RatEntry, UnitTable, UnitType};

/// Error returned when parsing an enum from a user-supplied name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseNameError {
    kind: &'static str,
    value: String,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Compare names ignoring case, spaces, dashes and underscores.
fn matches_name(input: &str, candidate: &str) -> bool {
    let normalize = |s: &str| -> String {
        s.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    normalize(input) == normalize(candidate)
}

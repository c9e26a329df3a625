//! # Scenario Generation Core
//!
//! Scenario and opposing-force (OpFor) generation for BattleTech-style
//! tabletop battles.
//!
//! This crate contains **only** generation logic:
//! - No rendering
//! - No IO during generation (content and settings loaders are explicit)
//! - No ambient randomness (every call takes its own [`random::RandomSource`])
//!
//! This separation enables:
//! - Reproducible scenarios from a seed
//! - Sharing one generator across threads
//! - Replaying recorded decisions in tests
//!
//! ## Crate Structure
//!
//! - [`data`] - Content records and the built-in catalog
//! - [`catalog`] - Read-only lookup traits
//! - [`rat`] - Budget-constrained unit selection
//! - [`skills`] - Pilot skill levels and rolls
//! - [`opfor`] - Opposing force generation
//! - [`modifiers`] - Battle modifier selection and turn limits
//! - [`scenario`] - Full scenario generation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod modifiers;
pub mod names;
pub mod opfor;
pub mod random;
pub mod rat;
pub mod scenario;
pub mod skills;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{MapPresetCatalog, ModifierCatalog, TemplateCatalog, UnitTableSource};
    pub use crate::config::{GeneratorSettings, LANCE_SIZE};
    pub use crate::data::{
        BattleModifier, Biome, ContentTables, Era, MapPreset, ModifierEffect, ModifierKind,
        ObjectiveType, RatEntry, ScenarioTemplate, UnitTable, UnitType,
    };
    pub use crate::error::{GeneratorError, Result};
    pub use crate::opfor::{
        GeneratedPilot, GeneratedUnit, OpForGenerator, OpForGeneratorConfig,
        OpForGeneratorResult, OpForMetadata,
    };
    pub use crate::random::{random_source, RandomSource, SeededRandom, SequenceRandom};
    pub use crate::scenario::{GeneratedScenario, ScenarioGenerator, ScenarioGeneratorConfig};
    pub use crate::skills::{estimate_skill_bv_multiplier, SkillLevel, SkillVariance};
}

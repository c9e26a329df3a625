//! Content validation utilities.
//!
//! Structural checks only: ids are unique, numbers are in range and
//! cross-references resolve. Game legality of the units themselves is not
//! checked.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use scengen_core::catalog::MapPresetCatalog;
use scengen_core::data::modifiers::TURN_LIMIT_CHANGE;
use scengen_core::data::{ContentTables, ModifierKind};
use scengen_core::error::Result;

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Generation may misbehave.
    Error,
    /// Suspicious but usable.
    Warning,
}

/// One problem found in a content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// How serious it is.
    pub severity: Severity,
    /// Where it was found, e.g. `template 'base-assault'`.
    pub context: String,
    /// What is wrong.
    pub message: String,
}

/// All issues found in one content set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Issues in discovery order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn error(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, context.into(), message.into());
    }

    fn warning(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, context.into(), message.into());
    }

    fn push(&mut self, severity: Severity, context: String, message: String) {
        self.issues.push(ValidationIssue {
            severity,
            context,
            message,
        });
    }

    /// Number of errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Number of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }

    /// Whether any error was found.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Load a RON content file and validate it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn validate_content_file(path: &Path) -> Result<ValidationReport> {
    let content = ContentTables::load(path)?;
    Ok(validate_content(&content))
}

/// Validate content tables.
#[must_use]
pub fn validate_content(content: &ContentTables) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_unit_tables(content, &mut report);
    validate_templates(content, &mut report);
    validate_presets(content, &mut report);
    validate_modifiers(content, &mut report);
    report
}

fn validate_unit_tables(content: &ContentTables, report: &mut ValidationReport) {
    let mut seen = BTreeSet::new();
    for table in &content.unit_tables {
        let context = format!("unit table '{}' / {}", table.faction, table.era);
        if !seen.insert((table.faction.to_ascii_lowercase(), table.era)) {
            report.error(&context, "duplicate faction/era table; only the first is used");
        }
        if table.entries.is_empty() {
            report.warning(&context, "table has no entries");
        }
        for entry in &table.entries {
            if entry.bv == 0 {
                report.error(&context, format!("'{}' has zero BV", entry.designation));
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                report.error(
                    &context,
                    format!("'{}' has invalid weight {}", entry.designation, entry.weight),
                );
            }
        }
    }
}

fn validate_templates(content: &ContentTables, report: &mut ValidationReport) {
    if content.templates.is_empty() {
        report.error("templates", "no scenario templates defined");
    }
    let mut seen = BTreeSet::new();
    for template in &content.templates {
        let context = format!("template '{}'", template.id);
        if !seen.insert(template.id.as_str()) {
            report.error(&context, "duplicate template id");
        }
        if template.max_player_units != 0 && template.max_player_units < template.min_player_units {
            report.error(
                &context,
                format!(
                    "max_player_units {} is below min_player_units {}",
                    template.max_player_units, template.min_player_units
                ),
            );
        }
        if !template.default_opfor_multiplier.is_finite()
            || template.default_opfor_multiplier <= 0.0
        {
            report.error(
                &context,
                format!(
                    "default_opfor_multiplier must be positive, got {}",
                    template.default_opfor_multiplier
                ),
            );
        }
        if template.victory_conditions.is_empty() {
            report.warning(&context, "no victory conditions");
        }
        if template.suggested_biomes.is_empty() {
            report.warning(&context, "no suggested biomes; the baseline biome will be used");
        }
        for biome in &template.suggested_biomes {
            if content.presets_for_biome(*biome).is_empty() {
                report.warning(
                    &context,
                    format!("suggested biome {biome} has no map presets"),
                );
            }
        }
    }
}

fn validate_presets(content: &ContentTables, report: &mut ValidationReport) {
    if content.map_presets.is_empty() {
        report.error("map presets", "no map presets defined");
    }
    let mut seen = BTreeSet::new();
    for preset in &content.map_presets {
        let context = format!("map preset '{}'", preset.id);
        if !seen.insert(preset.id.as_str()) {
            report.error(&context, "duplicate map preset id");
        }
        if preset.radius == 0 {
            report.error(&context, "radius must be positive");
        }
    }
}

fn validate_modifiers(content: &ContentTables, report: &mut ValidationReport) {
    let ids: BTreeSet<&str> = content.modifiers.iter().map(|m| m.id.as_str()).collect();
    let mut seen = BTreeSet::new();
    for modifier in &content.modifiers {
        let context = format!("modifier '{}'", modifier.id);
        if !seen.insert(modifier.id.as_str()) {
            report.error(&context, "duplicate modifier id");
        }
        let weight = modifier.applicability.weight;
        if !weight.is_finite() || weight < 0.0 {
            report.error(&context, format!("invalid weight {weight}"));
        } else if weight == 0.0 {
            report.warning(&context, "zero weight; the modifier can never be selected");
        }
        for other in &modifier.applicability.exclusive_with {
            if other == &modifier.id {
                report.error(&context, "modifier excludes itself");
            } else if !ids.contains(other.as_str()) {
                report.warning(&context, format!("excludes unknown modifier '{other}'"));
            }
        }
        if modifier.implementation.kind != ModifierKind::ObjectiveModifier
            && modifier.implementation.parameters.contains_key(TURN_LIMIT_CHANGE)
        {
            report.warning(
                &context,
                format!("{TURN_LIMIT_CHANGE} is only applied for objective modifiers"),
            );
        }
    }
}

//! Battle modifier selection and turn-limit resolution.

use std::collections::BTreeSet;

use crate::catalog::ModifierCatalog;
use crate::data::{BattleModifier, Biome, ModifierEffect, ObjectiveType};
use crate::random::{sample_weighted, RandomSource};

/// Modifiers offered for a scenario.
///
/// The objective's list comes first, followed by biome-only extras, with
/// duplicates removed by id. Negative modifiers are dropped unless
/// `allow_negative` is set.
#[must_use]
pub fn candidate_modifiers<'c>(
    catalog: &'c dyn ModifierCatalog,
    objective: ObjectiveType,
    biome: Biome,
    allow_negative: bool,
) -> Vec<&'c BattleModifier> {
    let mut candidates: Vec<&BattleModifier> = Vec::new();
    let by_objective = catalog.modifiers_for_objective(objective);
    let by_biome = catalog.modifiers_for_biome(biome);

    for modifier in by_objective.into_iter().chain(by_biome) {
        if !allow_negative && modifier.effect == ModifierEffect::Negative {
            continue;
        }
        if candidates.iter().any(|m| m.id == modifier.id) {
            continue;
        }
        candidates.push(modifier);
    }
    candidates
}

/// Pick up to `max` mutually compatible modifiers by weight.
///
/// Each round draws once from the modifiers still available: not yet chosen,
/// not excluded by an earlier pick, and not themselves excluding an earlier
/// pick. Stops early when nothing is available.
pub fn select_modifiers(
    candidates: &[&BattleModifier],
    max: usize,
    rng: &mut dyn RandomSource,
) -> Vec<BattleModifier> {
    let mut chosen: Vec<BattleModifier> = Vec::new();
    let mut excluded: BTreeSet<&str> = BTreeSet::new();

    while chosen.len() < max {
        let available: Vec<&BattleModifier> = candidates
            .iter()
            .copied()
            .filter(|m| {
                !excluded.contains(m.id.as_str())
                    && !chosen.iter().any(|c| c.id == m.id || m.excludes(&c.id))
            })
            .collect();

        let weights: Vec<f64> = available.iter().map(|m| m.applicability.weight).collect();
        let Some(idx) = sample_weighted(rng, &weights) else {
            break;
        };

        let pick = available[idx];
        tracing::debug!("Selected modifier '{}'", pick.id);
        excluded.extend(pick.applicability.exclusive_with.iter().map(String::as_str));
        chosen.push(pick.clone());
    }
    chosen
}

/// Resolve the turn limit after modifiers.
///
/// Every objective modifier's `turn_limit_change` is added to `base`. A
/// positive result below `min_turn_limit` is raised to `min_turn_limit`; a
/// result of zero or less means "no limit" and comes back as 0.
#[must_use]
pub fn effective_turn_limit(base: u32, modifiers: &[BattleModifier], min_turn_limit: u32) -> u32 {
    let delta: i64 = modifiers
        .iter()
        .filter_map(BattleModifier::turn_limit_change)
        .sum();
    let limit = i64::from(base) + delta;
    if limit <= 0 {
        0
    } else if limit < i64::from(min_turn_limit) {
        min_turn_limit
    } else {
        u32::try_from(limit).unwrap_or(u32::MAX)
    }
}

//! Budget-constrained selection from a random assignment table.
//!
//! [`select_units`] fills a BV budget from a list of table entries. It keeps
//! drawing until the running total reaches the lower edge of the tolerance
//! band and the minimum unit count is met, never adding an entry that would
//! push the total past the upper edge unless that is the only way to reach
//! the minimum unit count.

use crate::data::{RatEntry, UnitType};
use crate::random::{pick_index, sample_weighted, RandomSource};

/// A request against a unit table.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitQuery {
    /// Restrict the selection to one unit type.
    pub unit_type: Option<UnitType>,
    /// BV the selection should total.
    pub target_bv: f64,
    /// Relative tolerance around `target_bv`.
    pub tolerance: f64,
    /// Fewest units to return when the table has any match.
    pub min_units: usize,
    /// Most units to return.
    pub max_units: usize,
}

impl UnitQuery {
    /// Query for `target_bv` across every unit type, between 1 and 4 units.
    #[must_use]
    pub fn new(target_bv: f64, tolerance: f64) -> Self {
        Self {
            unit_type: None,
            target_bv,
            tolerance,
            min_units: 1,
            max_units: 4,
        }
    }

    /// Builder: restrict to one unit type.
    #[must_use]
    pub fn with_unit_type(mut self, unit_type: UnitType) -> Self {
        self.unit_type = Some(unit_type);
        self
    }

    /// Builder: set the unit-count bounds.
    #[must_use]
    pub fn with_unit_bounds(mut self, min_units: usize, max_units: usize) -> Self {
        self.min_units = min_units;
        self.max_units = max_units;
        self
    }

    /// Lower and upper edge of the acceptable total.
    #[must_use]
    pub fn bv_band(&self) -> (f64, f64) {
        (
            self.target_bv * (1.0 - self.tolerance),
            self.target_bv * (1.0 + self.tolerance),
        )
    }

    fn matches(&self, entry: &RatEntry) -> bool {
        self.unit_type.map_or(true, |t| entry.unit_type == t)
    }
}

/// Select entries from `entries` to fill `query`.
///
/// Each round:
/// - stop once `min_units` is met and the total has reached the lower edge;
/// - *affordable* entries keep the total at or under the upper edge;
/// - *preferred* entries are affordable and at least the average BV each
///   remaining slot must contribute to reach the lower edge;
/// - pick among preferred by table weight, else take the most expensive
///   affordable entry, else (only below `min_units`) the cheapest entry,
///   else stop.
///
/// Only the weighted pick draws from `rng`.
pub fn select_units(
    entries: &[RatEntry],
    query: &UnitQuery,
    rng: &mut dyn RandomSource,
) -> Vec<RatEntry> {
    let pool: Vec<&RatEntry> = entries.iter().filter(|e| query.matches(e)).collect();
    if pool.is_empty() {
        return Vec::new();
    }

    let (lower, upper) = query.bv_band();
    let mut selected: Vec<RatEntry> = Vec::new();
    let mut total = 0.0_f64;

    while selected.len() < query.max_units {
        if selected.len() >= query.min_units && total >= lower {
            break;
        }

        let slots_left = (query.max_units - selected.len()) as f64;
        let per_slot = (lower - total) / slots_left;
        let affordable: Vec<&RatEntry> = pool
            .iter()
            .copied()
            .filter(|e| total + f64::from(e.bv) <= upper)
            .collect();
        let preferred: Vec<&RatEntry> = affordable
            .iter()
            .copied()
            .filter(|e| f64::from(e.bv) >= per_slot)
            .collect();

        let choice = if preferred.is_empty() {
            affordable
                .iter()
                .copied()
                .max_by_key(|e| e.bv)
                .or_else(|| {
                    (selected.len() < query.min_units)
                        .then(|| pool.iter().copied().min_by_key(|e| e.bv))
                        .flatten()
                })
        } else {
            pick_preferred(&preferred, rng)
        };

        let Some(entry) = choice else {
            break;
        };
        total += f64::from(entry.bv);
        selected.push(entry.clone());
    }

    tracing::debug!(
        "Selected {} {} unit(s) for {:.0} BV (band {:.0}..{:.0}): total {:.0}",
        selected.len(),
        query
            .unit_type
            .map_or_else(|| "mixed".to_string(), |t| t.to_string()),
        query.target_bv,
        lower,
        upper,
        total
    );
    selected
}

/// Weighted pick by table weight. Tables whose weights are all zero fall
/// back to a uniform pick so the entries stay reachable.
fn pick_preferred<'a>(
    preferred: &[&'a RatEntry],
    rng: &mut dyn RandomSource,
) -> Option<&'a RatEntry> {
    let weights: Vec<f64> = preferred.iter().map(|e| e.weight).collect();
    sample_weighted(rng, &weights)
        .or_else(|| pick_index(rng, preferred.len()))
        .map(|idx| preferred[idx])
}

/// Sum of BV over `units`.
#[must_use]
pub fn total_bv(units: &[RatEntry]) -> u64 {
    units.iter().map(|e| u64::from(e.bv)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SeededRandom, SequenceRandom};

    fn table() -> Vec<RatEntry> {
        vec![
            RatEntry::new("Locust", "LCT-1V", 432, 20, UnitType::BattleMech),
            RatEntry::new("Phoenix Hawk", "PXH-1", 1041, 45, UnitType::BattleMech),
            RatEntry::new("Wolverine", "WVR-6R", 1101, 55, UnitType::BattleMech),
            RatEntry::new("Marauder", "MAD-3R", 1363, 75, UnitType::BattleMech),
            RatEntry::new("Scorpion", "Standard", 291, 25, UnitType::Vehicle),
            RatEntry::new("Manticore", "Standard", 815, 60, UnitType::Vehicle),
        ]
    }

    #[test]
    fn test_no_matching_type_yields_nothing() {
        let query = UnitQuery::new(1000.0, 0.15).with_unit_type(UnitType::Aerospace);
        let mut rng = SequenceRandom::new(vec![0.5]);
        assert!(select_units(&table(), &query, &mut rng).is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_type_filter_respected() {
        let query = UnitQuery::new(1100.0, 0.2)
            .with_unit_type(UnitType::Vehicle)
            .with_unit_bounds(1, 3);
        let mut rng = SeededRandom::new(1);
        let units = select_units(&table(), &query, &mut rng);
        assert!(!units.is_empty());
        assert!(units.iter().all(|u| u.unit_type == UnitType::Vehicle));
    }

    #[test]
    fn test_total_lands_in_band() {
        let query = UnitQuery::new(3500.0, 0.15).with_unit_bounds(1, 6);
        for seed in 0..50 {
            let mut rng = SeededRandom::new(seed);
            let units = select_units(&table(), &query, &mut rng);
            let total = total_bv(&units) as f64;
            let (lower, upper) = query.bv_band();
            assert!(
                total >= lower && total <= upper,
                "seed {seed}: total {total} outside {lower}..{upper}"
            );
        }
    }

    #[test]
    fn test_never_exceeds_max_units() {
        let query = UnitQuery::new(50_000.0, 0.15).with_unit_bounds(1, 3);
        let mut rng = SeededRandom::new(9);
        let units = select_units(&table(), &query, &mut rng);
        assert_eq!(units.len(), 3);
    }

    #[test]
    fn test_cheapest_used_to_reach_min_units() {
        // Budget too small for anything, but one unit is required.
        let query = UnitQuery::new(100.0, 0.1).with_unit_bounds(1, 4);
        let mut rng = SequenceRandom::new(vec![0.5]);
        let units = select_units(&table(), &query, &mut rng);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].chassis, "Scorpion");
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_stops_when_nothing_fits_after_min() {
        // After the Marauder nothing else fits under 1500.
        let entries = vec![
            RatEntry::new("Marauder", "MAD-3R", 1363, 75, UnitType::BattleMech),
            RatEntry::new("Atlas", "AS7-D", 1897, 100, UnitType::BattleMech),
        ];
        let query = UnitQuery::new(2000.0, 0.25).with_unit_bounds(1, 4);
        let mut rng = SequenceRandom::new(vec![0.0]);
        let units = select_units(&entries, &query, &mut rng);
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_weight_steers_selection() {
        let entries = vec![
            RatEntry::new("Wasp", "WSP-1A", 384, 20, UnitType::BattleMech).with_weight(0.0),
            RatEntry::new("Stinger", "STG-3R", 359, 20, UnitType::BattleMech).with_weight(5.0),
        ];
        let query = UnitQuery::new(360.0, 0.2).with_unit_bounds(1, 1);
        let mut rng = SeededRandom::new(3);
        for _ in 0..20 {
            let units = select_units(&entries, &query, &mut rng);
            assert_eq!(units[0].chassis, "Stinger");
        }
    }

    #[test]
    fn test_zero_weights_fall_back_to_uniform() {
        let entries = vec![
            RatEntry::new("Wasp", "WSP-1A", 384, 20, UnitType::BattleMech).with_weight(0.0),
        ];
        let query = UnitQuery::new(400.0, 0.2).with_unit_bounds(1, 1);
        let mut rng = SequenceRandom::new(vec![0.7]);
        let units = select_units(&entries, &query, &mut rng);
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let query = UnitQuery::new(4000.0, 0.15).with_unit_bounds(2, 6);
        let a = select_units(&table(), &query, &mut SeededRandom::new(42));
        let b = select_units(&table(), &query, &mut SeededRandom::new(42));
        assert_eq!(a, b);
    }
}

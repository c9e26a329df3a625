//! Budget balance statistics.
//!
//! Tools for running many OpFor generations and summarizing how closely the
//! generated forces track their BV targets.

use scengen_core::opfor::OpForGeneratorResult;

/// Aggregate deviation statistics over a batch of generated forces.
#[derive(Debug, Clone, Default)]
pub struct BudgetStats {
    /// Forces recorded.
    pub trials: u32,
    /// Forces with no units.
    pub empty: u32,
    /// Forces whose `|bv_deviation|` was within the threshold.
    pub within: u32,
    /// Sum of `total_bv`.
    pub total_bv_sum: u64,
    /// Sum of `|bv_deviation|`.
    pub abs_deviation_sum: f64,
    /// Largest `|bv_deviation|` seen.
    pub worst_deviation: f64,
    threshold: f64,
}

impl BudgetStats {
    /// Empty statistics counting deviations under `threshold` as within.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Record one result.
    pub fn record(&mut self, result: &OpForGeneratorResult) {
        self.trials += 1;
        if result.units.is_empty() {
            self.empty += 1;
        }
        if result.is_within_tolerance(self.threshold) {
            self.within += 1;
        }
        let deviation = result.bv_deviation.abs();
        self.total_bv_sum += result.total_bv;
        self.abs_deviation_sum += deviation;
        self.worst_deviation = self.worst_deviation.max(deviation);
    }

    /// Fraction of forces within the threshold (0.0 to 1.0).
    pub fn within_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(self.within) / f64::from(self.trials)
    }

    /// Mean `total_bv`.
    pub fn mean_total_bv(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.total_bv_sum as f64 / f64::from(self.trials)
    }

    /// Mean `|bv_deviation|`.
    pub fn mean_abs_deviation(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.abs_deviation_sum / f64::from(self.trials)
    }

    /// Print a one-line summary.
    pub fn print_summary(&self, label: &str) {
        println!(
            "{label}: {} trials, {:.1}% within ±{:.0}%, mean BV {:.0}, mean |dev| {:.3}, worst {:.3}, empty {}",
            self.trials,
            self.within_rate() * 100.0,
            self.threshold * 100.0,
            self.mean_total_bv(),
            self.mean_abs_deviation(),
            self.worst_deviation,
            self.empty
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scengen_core::data::Era;
    use scengen_core::opfor::OpForMetadata;
    use scengen_core::skills::SkillLevel;

    fn result(total_bv: u64, target_bv: u64) -> OpForGeneratorResult {
        OpForGeneratorResult {
            units: Vec::new(),
            total_bv,
            target_bv,
            bv_deviation: (total_bv as f64 - target_bv as f64) / target_bv as f64,
            metadata: OpForMetadata {
                faction: "Pirates".to_string(),
                era: Era::ClanInvasion,
                difficulty_multiplier: 1.0,
                lance_count: 0,
                skill_level: SkillLevel::Regular,
            },
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = BudgetStats::new(0.3);
        assert_eq!(stats.within_rate(), 0.0);
        assert_eq!(stats.mean_total_bv(), 0.0);
    }

    #[test]
    fn test_record() {
        let mut stats = BudgetStats::new(0.3);
        stats.record(&result(1000, 1000));
        stats.record(&result(500, 1000));
        stats.record(&result(1400, 1000));
        assert_eq!(stats.trials, 3);
        assert_eq!(stats.within, 1);
        assert_eq!(stats.empty, 3);
        assert!((stats.within_rate() - 1.0 / 3.0).abs() < 1e-9);
        assert!((stats.mean_total_bv() - 2900.0 / 3.0).abs() < 1e-9);
        assert!((stats.worst_deviation - 0.5).abs() < 1e-9);
    }
}

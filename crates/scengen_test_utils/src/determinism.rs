//! Determinism testing utilities.
//!
//! Provides a harness for verifying that seeded generation produces
//! identical scenarios given identical inputs.
//!
//! # Testing Strategy
//!
//! A seeded scenario must be reproducible down to every pilot name. Sources
//! of non-determinism include:
//!
//! - **Ambient randomness**: every draw must come from the call's
//!   [`RandomSource`](scengen_core::random::RandomSource).
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Unit-type mixes are `BTreeMap`s and catalogs are slices.
//! - **Per-call identity**: `id` and `generated_at` differ on every call and
//!   are excluded from [`ScenarioFingerprint`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use scengen_core::data::Biome;
use scengen_core::scenario::GeneratedScenario;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for deterministic generation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that generation was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Generation is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run `generate` several times and compare the hashes of the results.
///
/// # Example
///
/// ```ignore
/// let result = verify_determinism(
///     5,
///     || generator.generate(&config.clone().with_seed(42)).unwrap(),
///     |scenario| ScenarioFingerprint::of(scenario).hash(),
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<T, Generate, HashFn>(
    runs: usize,
    generate: Generate,
    hash: HashFn,
) -> DeterminismResult
where
    Generate: Fn() -> T,
    HashFn: Fn(&T) -> u64,
{
    let hashes: Vec<u64> = (0..runs).map(|_| hash(&generate())).collect();
    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Run `generate` on `threads` scoped threads at once and collect the hashes.
///
/// Catches shared state leaking between concurrent calls on one generator.
pub fn run_parallel_generations<T, Generate, HashFn>(
    threads: usize,
    generate: Generate,
    hash: HashFn,
) -> DeterminismResult
where
    Generate: Fn() -> T + Sync,
    HashFn: Fn(&T) -> u64 + Sync,
{
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| s.spawn(|| hash(&generate())))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("generation thread panicked"))
            .collect()
    });
    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// The reproducible part of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScenarioFingerprint {
    /// Template id.
    pub template_id: String,
    /// Chosen biome.
    pub biome: Biome,
    /// Map preset id.
    pub map_preset_id: String,
    /// Modifier ids in selection order.
    pub modifier_ids: Vec<String>,
    /// Effective turn limit.
    pub turn_limit: u32,
    /// OpFor total BV.
    pub total_bv: u64,
    /// `(designation, pilot name, gunnery, piloting, lance id)` per unit.
    pub units: Vec<(String, String, i32, i32, String)>,
}

impl ScenarioFingerprint {
    /// Extract the fingerprint of a scenario.
    #[must_use]
    pub fn of(scenario: &GeneratedScenario) -> Self {
        Self {
            template_id: scenario.template.id.clone(),
            biome: scenario.biome,
            map_preset_id: scenario.map_preset.id.clone(),
            modifier_ids: scenario.modifiers.iter().map(|m| m.id.clone()).collect(),
            turn_limit: scenario.turn_limit,
            total_bv: scenario.op_for.total_bv,
            units: scenario
                .op_for
                .units
                .iter()
                .map(|u| {
                    (
                        u.designation.clone(),
                        u.pilot.name.clone(),
                        u.pilot.gunnery,
                        u.pilot.piloting,
                        u.lance_id.clone(),
                    )
                })
                .collect(),
        }
    }

    /// Hash of the fingerprint.
    #[must_use]
    pub fn hash(&self) -> u64 {
        compute_hash(self)
    }
}

/// Proptest strategies for generator inputs.
pub mod strategies {
    use proptest::prelude::*;
    use scengen_core::data::{Biome, ObjectiveType};
    use scengen_core::skills::SkillLevel;

    /// Player BV across the range of realistic forces.
    pub fn arb_player_bv() -> impl Strategy<Value = i64> {
        3_000i64..30_000i64
    }

    /// Difficulty multipliers from trivial to brutal.
    pub fn arb_difficulty() -> impl Strategy<Value = f64> {
        0.5f64..2.0f64
    }

    /// Any seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Any biome.
    pub fn arb_biome() -> impl Strategy<Value = Biome> {
        proptest::sample::select(Biome::ALL.to_vec())
    }

    /// Any objective.
    pub fn arb_objective() -> impl Strategy<Value = ObjectiveType> {
        proptest::sample::select(ObjectiveType::ALL.to_vec())
    }

    /// Skill levels with a fixed base pair.
    pub fn arb_fixed_skill_level() -> impl Strategy<Value = SkillLevel> {
        proptest::sample::select(
            SkillLevel::ALL
                .into_iter()
                .filter(|l| *l != SkillLevel::Mixed)
                .collect::<Vec<_>>(),
        )
    }

    /// Modifier count requests, including zero.
    pub fn arb_max_modifiers() -> impl Strategy<Value = i32> {
        0i32..6i32
    }
}

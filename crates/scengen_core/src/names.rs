//! Pilot name generation.

use crate::random::{pick, RandomSource};

/// Generate a random `"First Last"` pilot name. Two draws.
///
/// Names are not unique within a force.
pub fn generate_pilot_name(rng: &mut dyn RandomSource) -> String {
    let first = pick(rng, FIRST_NAMES).copied().unwrap_or("Unknown");
    let last = pick(rng, LAST_NAMES).copied().unwrap_or("Pilot");
    format!("{first} {last}")
}

static FIRST_NAMES: &[&str] = &[
    "Aaron", "Alexei", "Amara", "Brenna", "Cassius", "Dana", "Darius", "Elena", "Erik", "Farah",
    "Gideon", "Hana", "Ian", "Jaime", "Kai", "Kenji", "Lena", "Malcolm", "Mira", "Natasha",
    "Niko", "Olga", "Pavel", "Quinn", "Rhys", "Sasha", "Soren", "Tamsin", "Ulric", "Vlad",
    "Wren", "Yuri", "Zara",
];

static LAST_NAMES: &[&str] = &[
    "Allard", "Baranov", "Cole", "Davion", "Drake", "Hasek", "Ito", "Kell", "Kerensky", "Lee",
    "Marik", "McKinnon", "Nakamura", "Novak", "Okafor", "Petrov", "Quarles", "Redburn",
    "Sandoval", "Steiner", "Tanaka", "Vickers", "Ward", "Wolfe", "Yamato",
];

//! Per-call RNG shared by the runners.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the per-call generator: seeded when `seed` is set, from
/// entropy otherwise.
pub(crate) fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

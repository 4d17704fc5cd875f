//! Seeded random number generation.
//!
//! Every random decision in the engine draws from a single [`BlottoRng`]
//! owned by the engine, so a fixed seed reproduces a run exactly on any
//! platform.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The random number generator used throughout the engine.
pub type BlottoRng = ChaCha8Rng;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> BlottoRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from fresh entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> BlottoRng {
    create_rng(seed.unwrap_or_else(rand::random))
}

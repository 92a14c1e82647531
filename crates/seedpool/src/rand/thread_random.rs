use crate::{RandSource, Result, SeedBytes};
use ::rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded periodically from the operating system. It never fails.
///
/// Each OS thread has its own RNG instance, so concurrent seed generation is
/// contention-free. This type does **not** store the RNG itself; it simply
/// accesses the thread-local generator on each call, which keeps it `Send` and
/// `Sync`.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn try_rand(&self) -> Result<SeedBytes> {
        Ok(rng().random::<u128>().to_be_bytes())
    }
}

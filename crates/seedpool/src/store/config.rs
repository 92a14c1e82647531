/// Default number of rounds [`SeedStore::generate_seeds`] attempts before
/// giving up.
///
/// [`SeedStore::generate_seeds`]: crate::SeedStore::generate_seeds
pub const DEFAULT_MAX_GENERATE_ROUNDS: usize = 64;

/// Tunables for a [`SeedStore`](crate::SeedStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreConfig {
    /// Nanosecond timestamp at which fingerprints are derived.
    ///
    /// Only seeds fingerprinted at the same reference are comparable, so every
    /// store that exchanges seeds with another should use the same value.
    pub reference_timestamp: u64,

    /// Upper bound on add rounds in a single `generate_seeds` call.
    ///
    /// A round draws one candidate per missing seed and inserts the distinct
    /// ones. With a sound random source every call finishes in one round;
    /// the bound only matters when the source repeats itself.
    pub max_generate_rounds: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            reference_timestamp: 0,
            max_generate_rounds: DEFAULT_MAX_GENERATE_ROUNDS,
        }
    }
}

impl StoreConfig {
    /// Returns this config with a different reference timestamp.
    #[must_use]
    pub const fn with_reference_timestamp(mut self, reference_timestamp: u64) -> Self {
        self.reference_timestamp = reference_timestamp;
        self
    }

    /// Returns this config with a different generation round budget.
    #[must_use]
    pub const fn with_max_generate_rounds(mut self, max_generate_rounds: usize) -> Self {
        self.max_generate_rounds = max_generate_rounds;
        self
    }
}

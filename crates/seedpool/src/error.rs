/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `seedpool` can emit.
///
/// Issuing identifiers never fails. Errors only surface while creating seeds,
/// either because the random source gave up or because a store could not
/// find enough distinct seeds within its round budget.
///
/// Returning a seed that the store does not consider borrowed is *not* an
/// error; see [`SeedStore::return_seeds`].
///
/// [`SeedStore::return_seeds`]: crate::SeedStore::return_seeds
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The random source could not produce seed bytes.
    ///
    /// No seed is created when this happens.
    #[error("random source failed: {reason}")]
    RandomSource {
        /// Description reported by the underlying source.
        reason: String,
    },

    /// [`SeedStore::generate_seeds`] used up its round budget before inserting
    /// the requested number of distinct seeds.
    ///
    /// Seeds inserted by earlier rounds stay in the store.
    ///
    /// [`SeedStore::generate_seeds`]: crate::SeedStore::generate_seeds
    #[error("inserted {inserted} of {requested} seeds before exhausting {rounds} generation rounds")]
    GenerationExhausted {
        /// Number of seeds the caller asked for.
        requested: usize,
        /// Number of seeds actually inserted.
        inserted: usize,
        /// Number of rounds attempted.
        rounds: usize,
    },
}

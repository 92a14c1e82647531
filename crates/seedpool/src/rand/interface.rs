use crate::{Result, SeedBytes};
use std::sync::Arc;

/// A trait for random sources that produce fresh 16-byte seeds.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Seeds are only as unique as this source is strong:
/// identifiers from two seeds collide exactly when their random suffixes do.
///
/// # Example
/// ```
/// use seedpool::{RandSource, Result, SeedBytes};
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn try_rand(&self) -> Result<SeedBytes> {
///         Ok([7; 16])
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.try_rand().unwrap(), [7; 16]);
/// ```
pub trait RandSource {
    /// Returns 16 random bytes.
    ///
    /// # Errors
    /// - Returns [`Error::RandomSource`] if the source cannot produce bytes.
    ///
    /// [`Error::RandomSource`]: crate::Error::RandomSource
    fn try_rand(&self) -> Result<SeedBytes>;
}

impl<R: RandSource + ?Sized> RandSource for Arc<R> {
    fn try_rand(&self) -> Result<SeedBytes> {
        (**self).try_rand()
    }
}

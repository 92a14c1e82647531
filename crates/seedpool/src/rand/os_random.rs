use crate::{Error, RandSource, Result, SeedBytes};
use ::rand::{TryRngCore, rngs::OsRng};

/// A `RandSource` that reads every seed straight from the operating system's
/// entropy source.
///
/// Slower than [`ThreadRandom`](crate::ThreadRandom), but surfaces OS failures
/// as [`Error::RandomSource`] instead of relying on a user-space generator.
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl RandSource for OsRandom {
    fn try_rand(&self) -> Result<SeedBytes> {
        let mut bytes: SeedBytes = [0; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| Error::RandomSource {
                reason: err.to_string(),
            })?;
        Ok(bytes)
    }
}

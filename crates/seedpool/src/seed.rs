use crate::{Counter, Fingerprint, RandSource, Result, SeedBytes, SystemClock, TimeSource};
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;


/// A shared reference to a [`Seed`], as handed out by a store.
pub type SeedHandle<T = SystemClock> = Arc<Seed<T>>;

/// An immutable 128-bit random value plus the state needed to issue a stream
/// of strictly increasing identifiers from it.
///
/// The seed bytes never change after construction. The only mutable state is
/// the last issued [`Counter`], guarded by a mutex owned by this seed alone,
/// so distinct seeds issue identifiers in parallel without contending.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Strictly monotonic per seed, even if the clock stalls or steps back
/// - ✅ Never blocks on the clock and never fails
///
/// ## See Also
/// - [`SeedStore`](crate::SeedStore)
pub struct Seed<T = SystemClock>
where
    T: TimeSource,
{
    bytes: SeedBytes,
    #[cfg(feature = "cache-padded")]
    last_counter: crossbeam_utils::CachePadded<Mutex<Counter>>,
    #[cfg(not(feature = "cache-padded"))]
    last_counter: Mutex<Counter>,
    time: T,
}

impl<T> Seed<T>
where
    T: TimeSource,
{
    /// Restores a seed from bytes produced elsewhere, e.g. by another process
    /// or a backup.
    ///
    /// The counter starts at the current time of `time`.
    ///
    /// # Example
    /// ```
    /// use seedpool::{Seed, SystemClock};
    ///
    /// let seed = Seed::from_bytes([42; 16], SystemClock);
    /// let id = seed.next_id();
    /// assert_eq!(&id[9..], &[42; 7]);
    /// ```
    pub fn from_bytes(bytes: SeedBytes, time: T) -> Self {
        let counter = Counter::from_nanos(time.current_nanos());
        Self::from_components(bytes, counter, time)
    }

    /// Creates a seed with an explicit starting counter.
    ///
    /// The first identifier issued uses a counter strictly greater than
    /// `last_counter`. Prefer [`Self::from_bytes`] unless you are resuming a
    /// seed whose counter was persisted.
    pub fn from_components(bytes: SeedBytes, last_counter: Counter, time: T) -> Self {
        Self {
            bytes,
            #[cfg(feature = "cache-padded")]
            last_counter: crossbeam_utils::CachePadded::new(Mutex::new(last_counter)),
            #[cfg(not(feature = "cache-padded"))]
            last_counter: Mutex::new(last_counter),
            time,
        }
    }

    /// Creates a seed from fresh random bytes.
    ///
    /// # Errors
    /// - Returns [`Error::RandomSource`] if `rng` fails. No seed is created.
    ///
    /// [`Error::RandomSource`]: crate::Error::RandomSource
    pub fn try_generate<R>(rng: &R, time: T) -> Result<Self>
    where
        R: RandSource + ?Sized,
    {
        let bytes = rng.try_rand()?;
        Ok(Self::from_bytes(bytes, time))
    }

    /// Returns a copy of the seed bytes.
    pub const fn bytes(&self) -> SeedBytes {
        self.bytes
    }

    /// Returns the counter of the most recently issued identifier, or the
    /// starting counter if none was issued yet.
    pub fn last_counter(&self) -> Counter {
        *self.last_counter.lock()
    }

    /// Derives this seed's store fingerprint at `reference_nanos`.
    pub const fn fingerprint(&self, reference_nanos: u64) -> Fingerprint {
        Fingerprint::derive(&self.bytes, reference_nanos)
    }

    /// Issues the next identifier.
    ///
    /// The counter for the current time is compared against the last issued
    /// one; if it is not strictly greater (clock stall, clock stepping back,
    /// or more than one call per sequence tick) the last counter plus one is
    /// used instead. The result is encoded into a copy of the seed bytes.
    ///
    /// The clock is read before the lock is taken. A caller whose earlier read
    /// loses the race to another thread's later one lands on the last counter
    /// plus one, so ordering still holds without reading under the lock.
    ///
    /// Uniqueness holds up to [`Counter::MAX`] (the year 10889); a seed that
    /// reaches it keeps issuing that counter instead of panicking.
    ///
    /// # Example
    /// ```
    /// use seedpool::{Seed, SystemClock};
    ///
    /// let seed = Seed::from_bytes([1; 16], SystemClock);
    /// let a = seed.next_id();
    /// let b = seed.next_id();
    /// assert!(a < b);
    /// ```
    pub fn next_id(&self) -> SeedBytes {
        let now = Counter::from_nanos(self.time.current_nanos());

        let counter = {
            let mut last = self.last_counter.lock();
            let next = if now > *last {
                now
            } else {
                Self::cold_clock_behind(*last)
            };
            *last = next;
            next
        };

        counter.encode(self.bytes)
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: Counter) -> Counter {
        last.increment()
    }
}

impl<T> fmt::Debug for Seed<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("bytes", &self.bytes)
            .field("last_counter", &self.last_counter())
            .finish_non_exhaustive()
    }
}

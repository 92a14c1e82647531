use crate::{
    Error, Fingerprint, RandSource, Result, Seed, SeedBytes, SeedHandle, SystemClock, ThreadRandom,
    TimeSource,
};
use core::{fmt, mem};
use parking_lot::RwLock;
use std::collections::{HashMap, hash_map::Entry};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod config;

pub use config::*;

/// Whether a stored seed is on the shelf or checked out.
enum Slot<T>
where
    T: TimeSource,
{
    Available(SeedHandle<T>),
    Borrowed,
}

impl<T> Slot<T>
where
    T: TimeSource,
{
    /// Marks the slot borrowed, yielding the seed if it was available.
    fn take(&mut self) -> Option<SeedHandle<T>> {
        match mem::replace(self, Self::Borrowed) {
            Self::Available(seed) => Some(seed),
            Self::Borrowed => None,
        }
    }

    const fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed)
    }
}

struct StoreState<T>
where
    T: TimeSource,
{
    seeds: HashMap<Fingerprint, Slot<T>>,
    borrow_count: usize,
}

/// A point-in-time view of a store's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StoreSnapshot {
    /// Total number of seeds, borrowed or not.
    pub size: usize,
    /// Number of seeds currently borrowed.
    pub borrow_count: usize,
    /// Nanosecond timestamp used to derive fingerprints.
    pub reference_timestamp: u64,
}

/// Generates, holds and lends out [`Seed`]s.
///
/// Seeds are keyed by their [`Fingerprint`], so adding the same bytes twice is
/// a no-op. Every mutating call takes one store-wide write lock for its whole
/// batch, which makes each call atomic with respect to the others. Issuing
/// identifiers does not involve the store at all: once borrowed, a seed is
/// used directly through its handle.
///
/// Entries are never removed; borrowing and returning only flip a seed
/// between available and borrowed.
///
/// ## See Also
/// - [`Seed`]
/// - [`StoreConfig`]
pub struct SeedStore<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource,
{
    state: RwLock<StoreState<T>>,
    config: StoreConfig,
    time: T,
    rng: R,
}

impl SeedStore {
    /// Creates an empty store backed by the system clock and the thread-local
    /// RNG, with the default [`StoreConfig`].
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default(), SystemClock, ThreadRandom)
    }
}

impl Default for SeedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> SeedStore<T, R>
where
    T: TimeSource + Clone,
    R: RandSource,
{
    /// Creates an empty store with explicit collaborators.
    ///
    /// # Parameters
    /// - `config`: fingerprint reference and generation budget
    /// - `time`: clock cloned into every seed the store creates
    /// - `rng`: source of fresh seed bytes for [`Self::generate_seeds`]
    ///
    /// # Example
    /// ```
    /// use seedpool::{OsRandom, SeedStore, StoreConfig, SystemClock};
    ///
    /// let config = StoreConfig::default().with_max_generate_rounds(4);
    /// let store = SeedStore::with_config(config, SystemClock, OsRandom);
    /// store.generate_seeds(3)?;
    /// assert_eq!(store.size(), 3);
    /// # Ok::<(), seedpool::Error>(())
    /// ```
    pub fn with_config(config: StoreConfig, time: T, rng: R) -> Self {
        Self {
            state: RwLock::new(StoreState {
                seeds: HashMap::new(),
                borrow_count: 0,
            }),
            config,
            time,
            rng,
        }
    }

    /// Returns the store's configuration.
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the nanosecond timestamp fingerprints are derived at.
    pub const fn reference_timestamp(&self) -> u64 {
        self.config.reference_timestamp
    }

    /// Total number of seeds in the store, including borrowed ones.
    pub fn size(&self) -> usize {
        self.state.read().seeds.len()
    }

    /// Number of seeds currently borrowed.
    pub fn borrow_count(&self) -> usize {
        self.state.read().borrow_count
    }

    /// Captures size, borrow count and reference timestamp under one read
    /// lock.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            size: state.seeds.len(),
            borrow_count: state.borrow_count,
            reference_timestamp: self.config.reference_timestamp,
        }
    }

    /// Emits the current [`StoreSnapshot`] as a `debug` event.
    pub fn log_snapshot(&self) {
        let snapshot = self.snapshot();
        debug!(
            size = snapshot.size,
            borrow_count = snapshot.borrow_count,
            reference_timestamp = snapshot.reference_timestamp,
            "seed store snapshot"
        );
    }

    /// Inserts seeds built from externally supplied bytes.
    ///
    /// Candidates whose fingerprint is already present, including repeats
    /// within `raw` itself, are skipped. The whole batch is inserted under a
    /// single write lock, so other callers see either none or all of it.
    ///
    /// This is the restore path for seeds persisted by an outer layer; fresh
    /// seeds should come from [`Self::generate_seeds`].
    ///
    /// # Returns
    /// The accepted subset of `raw`, in input order.
    #[instrument(level = "trace", skip_all, fields(candidates = raw.len()))]
    pub fn add_seeds(&self, raw: &[SeedBytes]) -> Vec<SeedBytes> {
        let reference = self.config.reference_timestamp;
        let mut accepted = Vec::with_capacity(raw.len());

        let mut state = self.state.write();
        for bytes in raw {
            if let Entry::Vacant(entry) = state.seeds.entry(Fingerprint::derive(bytes, reference)) {
                let seed = Seed::from_bytes(*bytes, self.time.clone());
                entry.insert(Slot::Available(Arc::new(seed)));
                accepted.push(*bytes);
            }
        }

        accepted
    }

    /// Inserts `count` new random seeds.
    ///
    /// Each round draws one candidate per still-missing seed and adds them as
    /// a batch; colliding candidates are silently replaced in the next round.
    ///
    /// # Errors
    /// - [`Error::RandomSource`] if the random source fails. Seeds inserted
    ///   by earlier rounds of this call stay in the store.
    /// - [`Error::GenerationExhausted`] if `count` seeds could not be inserted
    ///   within [`StoreConfig::max_generate_rounds`] rounds.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_seeds(&self, count: usize) -> Result<()> {
        let mut inserted = 0;
        let mut rounds = 0;

        while inserted < count {
            if rounds == self.config.max_generate_rounds {
                warn!(inserted, rounds, "seed generation exhausted its round budget");
                return Err(Error::GenerationExhausted {
                    requested: count,
                    inserted,
                    rounds,
                });
            }
            rounds += 1;

            let candidates = (inserted..count)
                .map(|_| self.rng.try_rand())
                .collect::<Result<Vec<_>>>()?;
            inserted += self.add_seeds(&candidates).len();
        }

        Ok(())
    }

    /// Checks out up to `count` available seeds.
    ///
    /// Never blocks waiting for supply and never generates seeds; the result
    /// may hold fewer than `count` handles, or none. Which seeds are picked is
    /// unspecified. Concurrent callers never receive the same seed.
    #[instrument(level = "trace", skip(self))]
    pub fn borrow_seeds(&self, count: usize) -> Vec<SeedHandle<T>> {
        let mut state = self.state.write();
        let StoreState {
            seeds,
            borrow_count,
        } = &mut *state;

        let mut borrowed = Vec::with_capacity(count.min(seeds.len() - *borrow_count));
        for slot in seeds.values_mut() {
            if borrowed.len() == count {
                break;
            }
            if let Some(seed) = slot.take() {
                borrowed.push(seed);
            }
        }
        *borrow_count += borrowed.len();

        borrowed
    }

    /// Checks seeds back in.
    ///
    /// A handle is accepted only if its fingerprint is known to this store and
    /// the matching entry is currently borrowed. Everything else, whether a
    /// seed from another store or a second return of the same seed, is handed
    /// back untouched. Callers must stop using accepted handles.
    ///
    /// # Returns
    /// The rejected handles, in input order.
    #[instrument(level = "trace", skip_all, fields(returned = seeds.len()))]
    pub fn return_seeds(&self, seeds: Vec<SeedHandle<T>>) -> Vec<SeedHandle<T>> {
        let reference = self.config.reference_timestamp;
        let mut rejected = Vec::new();

        {
            let mut state = self.state.write();
            let StoreState {
                seeds: slots,
                borrow_count,
            } = &mut *state;

            for seed in seeds {
                match slots.get_mut(&seed.fingerprint(reference)) {
                    Some(slot) if slot.is_borrowed() => {
                        *slot = Slot::Available(seed);
                        *borrow_count -= 1;
                    }
                    _ => rejected.push(seed),
                }
            }
        }

        if !rejected.is_empty() {
            warn!(rejected = rejected.len(), "store rejected returned seeds");
        }
        rejected
    }
}

impl<T, R> fmt::Debug for SeedStore<T, R>
where
    T: TimeSource + Clone,
    R: RandSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedStore")
            .field("snapshot", &self.snapshot())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

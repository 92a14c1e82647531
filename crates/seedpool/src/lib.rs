//! A pool of random seeds that issue time-ordered, collision-free 128-bit
//! identifiers.
//!
//! Each [`Seed`] owns 16 immutable random bytes and a monotonic counter. Every
//! call to [`Seed::next_id`] stamps the current millisecond and a
//! sub-millisecond sequence into a copy of those bytes, using the UUIDv7 field
//! layout, so a single seed never repeats itself and two distinct seeds only
//! collide if their random suffixes do.
//!
//! A [`SeedStore`] hands seeds out to callers for exclusive use and takes them
//! back afterwards:
//!
//! ```
//! use seedpool::SeedStore;
//!
//! let store = SeedStore::new();
//! store.generate_seeds(16)?;
//! assert_eq!(store.size(), 16);
//!
//! let seeds = store.borrow_seeds(2);
//! let id = seeds[0].next_id();
//! assert_eq!(id[6] >> 4, 0x7);
//!
//! let rejected = store.return_seeds(seeds);
//! assert!(rejected.is_empty());
//! assert_eq!(store.borrow_count(), 0);
//! # Ok::<(), seedpool::Error>(())
//! ```

mod encoding;
mod error;
mod rand;
mod seed;
mod store;
mod time;

pub use crate::encoding::*;
pub use crate::error::*;
pub use crate::rand::*;
pub use crate::seed::*;
pub use crate::store::*;
pub use crate::time::*;

//! Identifier layout.
//!
//! Identifiers share the UUIDv7 field layout. The 60-bit [`Counter`] fills the
//! timestamp and sequence fields, while everything after the variant bits is
//! copied verbatim from the seed:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         unix_ts_ms                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |       sequence        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                      seed bytes                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          seed bytes                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw 16-byte seed value, also the shape of every issued identifier.
pub type SeedBytes = [u8; 16];

/// Nanoseconds in one millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Width of the sub-millisecond sequence field.
pub const SEQUENCE_BITS: u32 = 12;

/// Largest value the sequence field can hold.
pub const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;

/// Largest millisecond value the 48-bit timestamp field can hold.
pub const MAX_MILLIS: u64 = (1 << 48) - 1;

const SEQUENCE_MASK: u64 = MAX_SEQUENCE as u64;
const VERSION: u8 = 0x70;
const VARIANT: u8 = 0x80;
const VARIANT_MASK: u8 = 0x3F;

/// A packed `(milliseconds, sequence)` pair: `milliseconds << 12 | sequence`.
///
/// Ordering on the packed value matches ordering on the encoded identifier
/// bytes, so a strictly increasing counter yields strictly increasing
/// identifiers.
///
/// Counters span 60 bits, up to [`Counter::MAX`]. Larger inputs are clamped
/// to it and incrementing saturates there.
///
/// # Example
/// ```
/// use seedpool::Counter;
///
/// // 1.5 ms after the epoch: 1 ms, and 500_000 ns >> 8 = 1953 ticks.
/// let counter = Counter::from_nanos(1_500_000);
/// assert_eq!(counter.millis(), 1);
/// assert_eq!(counter.sequence(), 1953);
/// assert_eq!(counter.increment().sequence(), 1954);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Counter(u64);

impl Counter {
    /// The counter at the Unix epoch.
    pub const ZERO: Self = Self(0);

    /// The largest encodable counter: [`MAX_MILLIS`] with a full sequence.
    pub const MAX: Self = Self((MAX_MILLIS << SEQUENCE_BITS) | SEQUENCE_MASK);

    /// Derives the counter for a nanosecond timestamp.
    ///
    /// The sequence is the sub-millisecond remainder shifted right by 8 bits,
    /// which approximates a 12-bit tick (at most 3906) within the millisecond.
    pub const fn from_nanos(nanos: u64) -> Self {
        let millis = nanos / NANOS_PER_MILLI;
        let sequence = (nanos % NANOS_PER_MILLI) >> 8;
        Self::from_components(millis, sequence as u16)
    }

    /// Packs a millisecond value and a sequence. Sequence bits above
    /// [`MAX_SEQUENCE`] are discarded; milliseconds above [`MAX_MILLIS`]
    /// clamp to [`Self::MAX`].
    pub const fn from_components(millis: u64, sequence: u16) -> Self {
        if millis > MAX_MILLIS {
            return Self::MAX;
        }
        Self((millis << SEQUENCE_BITS) | (sequence as u64 & SEQUENCE_MASK))
    }

    /// Wraps an already packed value, clamped to [`Self::MAX`].
    pub const fn from_raw(raw: u64) -> Self {
        if raw > Self::MAX.0 { Self::MAX } else { Self(raw) }
    }

    /// Returns the packed value.
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    /// Milliseconds since the Unix epoch.
    pub const fn millis(self) -> u64 {
        self.0 >> SEQUENCE_BITS
    }

    /// Sub-millisecond sequence.
    pub const fn sequence(self) -> u16 {
        (self.0 & SEQUENCE_MASK) as u16
    }

    /// The next counter value. A full sequence rolls over into the next
    /// millisecond; [`Self::MAX`] stays put.
    pub const fn increment(self) -> Self {
        if self.0 >= Self::MAX.0 {
            self
        } else {
            Self(self.0 + 1)
        }
    }

    /// Writes this counter into a copy of `seed`.
    ///
    /// Bytes `0..6` receive the big-endian 48-bit millisecond value, bytes
    /// `6..8` the version nibble and the sequence, and byte 8 keeps its low six
    /// bits under the `10` variant. Bytes `9..16` are left untouched.
    pub const fn encode(self, seed: SeedBytes) -> SeedBytes {
        let mut out = seed;
        let millis = self.millis().to_be_bytes();
        let sequence = self.sequence();

        out[0] = millis[2];
        out[1] = millis[3];
        out[2] = millis[4];
        out[3] = millis[5];
        out[4] = millis[6];
        out[5] = millis[7];
        out[6] = VERSION | ((sequence >> 8) as u8 & 0x0F);
        out[7] = (sequence & 0xFF) as u8;
        out[8] = (out[8] & VARIANT_MASK) | VARIANT;
        out
    }
}

/// Store-internal lookup key for a seed.
///
/// A fingerprint is the identifier a seed would issue at a fixed reference
/// timestamp. Two seeds share a fingerprint exactly when their bytes agree on
/// every position the encoding does not overwrite, which is also the
/// condition under which their live identifiers could collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fingerprint(SeedBytes);

impl Fingerprint {
    /// Derives the fingerprint of `seed` at `reference_nanos`.
    pub const fn derive(seed: &SeedBytes, reference_nanos: u64) -> Self {
        Self(Counter::from_nanos(reference_nanos).encode(*seed))
    }

    /// Returns the fingerprint bytes.
    pub const fn as_bytes(&self) -> &SeedBytes {
        &self.0
    }
}

/// Stateless form of [`Fingerprint::derive`].
pub const fn derive_fingerprint(seed: &SeedBytes, reference_nanos: u64) -> Fingerprint {
    Fingerprint::derive(seed, reference_nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILLIS: u64 = 1_700_000_000_123;

    #[test]
    fn counter_splits_nanos_into_millis_and_sequence() {
        let counter = Counter::from_nanos(MILLIS * NANOS_PER_MILLI + 512_000);
        assert_eq!(counter.millis(), MILLIS);
        assert_eq!(counter.sequence(), 2000);
        assert_eq!(counter.to_raw(), (MILLIS << 12) | 2000);
    }

    #[test]
    fn sequence_never_exceeds_field_width() {
        let counter = Counter::from_nanos(MILLIS * NANOS_PER_MILLI + 999_999);
        assert_eq!(counter.sequence(), 3906);
        assert!(counter.sequence() <= MAX_SEQUENCE);
    }

    #[test]
    fn increment_rolls_over_full_sequence() {
        let counter = Counter::from_components(MILLIS, MAX_SEQUENCE).increment();
        assert_eq!(counter.millis(), MILLIS + 1);
        assert_eq!(counter.sequence(), 0);
    }

    #[test]
    fn out_of_range_counters_clamp_and_saturate() {
        assert_eq!(Counter::from_raw(u64::MAX), Counter::MAX);
        assert_eq!(Counter::from_components(MAX_MILLIS + 1, 0), Counter::MAX);
        assert_eq!(Counter::MAX.increment(), Counter::MAX);
        assert_eq!(Counter::MAX.millis(), MAX_MILLIS);
        assert_eq!(Counter::MAX.sequence(), MAX_SEQUENCE);

        let id = Counter::MAX.encode([0; 16]);
        assert_eq!(&id[..6], &[0xFF; 6]);
        assert_eq!(id[6], 0x7F);
        assert_eq!(id[7], 0xFF);
    }

    #[test]
    fn encode_writes_timestamp_version_and_variant() {
        let seed = [0xAB; 16];
        let id = Counter::from_components(MILLIS, 0x7D0).encode(seed);

        assert_eq!(&id[..6], &[0x01, 0x8B, 0xCF, 0xE5, 0x68, 0x7B]);
        assert_eq!(id[6], 0x77);
        assert_eq!(id[7], 0xD0);
        assert_eq!(id[8], (0xAB & 0x3F) | 0x80);
        assert_eq!(&id[9..], &seed[9..]);
    }

    #[test]
    fn encoded_order_follows_counter_order() {
        let seed = [0x5A; 16];
        let mut counter = Counter::from_components(MILLIS, MAX_SEQUENCE - 2);
        let mut previous = counter.encode(seed);
        for _ in 0..8 {
            counter = counter.increment();
            let next = counter.encode(seed);
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn fingerprint_ignores_overwritten_positions() {
        let mut a = [0x11; 16];
        let mut b = a;
        a[0] = 0x00;
        b[0] = 0xFF;
        a[7] = 0x01;
        b[8] = 0xD1;
        assert_eq!(derive_fingerprint(&a, 0), derive_fingerprint(&b, 0));

        b[8] = 0x12;
        assert_ne!(derive_fingerprint(&a, 0), derive_fingerprint(&b, 0));

        let mut c = a;
        c[15] ^= 1;
        assert_ne!(derive_fingerprint(&a, 0), derive_fingerprint(&c, 0));
    }

    #[test]
    fn fingerprint_matches_live_encoding_at_reference() {
        let seed = [0xC3; 16];
        let reference = MILLIS * NANOS_PER_MILLI;
        let fingerprint = Fingerprint::derive(&seed, reference);
        assert_eq!(
            fingerprint.as_bytes(),
            &Counter::from_nanos(reference).encode(seed)
        );
    }
}

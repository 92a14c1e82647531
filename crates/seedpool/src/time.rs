use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// A trait for clocks that report the current time in nanoseconds since the
/// Unix epoch.
///
/// This abstraction allows you to plug in the system wall clock or a mocked
/// time source in tests. Seeds tolerate clocks that stall or step backwards;
/// they simply keep counting from their last issued value.
///
/// # Example
/// ```
/// use seedpool::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_nanos(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_nanos(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in nanoseconds since 1970-01-01 UTC.
    fn current_nanos(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_nanos(&self) -> u64 {
        (**self).current_nanos()
    }
}

/// The system wall clock.
///
/// A clock set before the Unix epoch reads as zero.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_nanos(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
            })
    }
}

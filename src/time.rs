//! Time abstractions for testability.
//!
//! This module provides a [`Clock`] trait for reading wall time and a
//! [`Sleeper`] trait for pausing between polls, allowing tests to inject
//! controlled time instead of relying on the real system clock.

use std::time::{Duration, SystemTime};

/// Abstraction over system time for testability.
///
/// Implementations provide the current time, allowing tests to pin
/// controlled time values instead of sampling actual system time.
///
/// # Example
///
/// ```
/// use singlekey::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as whole seconds since the Unix epoch.
    ///
    /// Pre-epoch clock readings (which do not occur on correctly
    /// configured hosts) saturate to 0.
    fn unix_secs(&self) -> i64 {
        // Epoch seconds exceed i64::MAX only in year 292 billion
        self.now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Production clock using actual system time.
///
/// This is the default clock implementation that delegates to
/// [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Abstraction over async delays for testability.
///
/// The report poller waits between status checks through this trait, so
/// tests can substitute [`InstantSleeper`] and run without real delays.
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately without waiting.
///
/// Only useful in tests where real delays would slow the suite down.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

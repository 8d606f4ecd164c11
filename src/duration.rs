//! Nanosecond-precision benchmark time values.
//!
//! The benchmark harness serializes timings as `{"secs": u, "nanos": v}`
//! pairs. [`BenchTime`] mirrors that representation with the nanosecond
//! component kept normalized in `[0, 1e9)` across arithmetic, carrying or
//! borrowing whole seconds as needed.

use std::ops::{Add, Sub};

use serde::Deserialize;

/// Nanoseconds per second; the upper bound of the normalized `nanos` field.
pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// An exact benchmark timing split into seconds and nanoseconds.
///
/// Subtraction is total: a result that is conceptually negative is
/// represented with a negative `secs` component and `nanos` still in
/// `[0, 1e9)` (e.g. `-0.5s` is `{ secs: -1, nanos: 500_000_000 }`).
/// Callers that require non-negative times must control their inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "RawTime")]
pub struct BenchTime {
    secs: i64,
    nanos: u32,
}

/// The on-disk `{secs, nanos}` shape, before normalization.
#[derive(Deserialize)]
struct RawTime {
    secs: i64,
    nanos: u32,
}

impl From<RawTime> for BenchTime {
    fn from(raw: RawTime) -> Self {
        Self::new(raw.secs, raw.nanos)
    }
}

impl BenchTime {
    /// The zero timing.
    pub const ZERO: Self = Self { secs: 0, nanos: 0 };

    /// Create a timing from seconds and nanoseconds, normalizing `nanos`
    /// into `[0, 1e9)`.
    pub const fn new(secs: i64, nanos: u32) -> Self {
        let mut secs = secs;
        let mut nanos = nanos;
        while nanos >= NANOS_PER_SEC {
            nanos -= NANOS_PER_SEC;
            secs += 1;
        }
        Self { secs, nanos }
    }

    /// Create a timing from whole milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            secs: (millis / 1_000) as i64,
            nanos: (millis % 1_000) as u32 * 1_000_000,
        }
    }

    /// Seconds component.
    pub const fn secs(&self) -> i64 {
        self.secs
    }

    /// Nanoseconds component, always in `[0, 1e9)`.
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Whether this timing is exactly zero.
    pub const fn is_zero(&self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// The timing in milliseconds: `(secs + nanos / 1e9) * 1000`.
    pub fn as_millis(&self) -> f64 {
        (self.secs as f64 + f64::from(self.nanos) / f64::from(NANOS_PER_SEC)) * 1_000.0
    }

    /// The timing in nanoseconds.
    pub fn as_nanos(&self) -> f64 {
        self.secs as f64 * f64::from(NANOS_PER_SEC) + f64::from(self.nanos)
    }
}

impl Add for BenchTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        // nanos < 2e9 here, which fits u32.
        Self::new(self.secs + rhs.secs, self.nanos + rhs.nanos)
    }
}

impl Sub for BenchTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut secs = self.secs - rhs.secs;
        let nanos = if self.nanos >= rhs.nanos {
            self.nanos - rhs.nanos
        } else {
            secs -= 1;
            NANOS_PER_SEC - (rhs.nanos - self.nanos)
        };
        Self { secs, nanos }
    }
}

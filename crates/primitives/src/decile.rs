//! Yield-spread decile labels.

use std::{fmt, str::FromStr};

use derive_more::Into;
use serde::{Deserialize, Serialize};

/// Errors raised when building a [`DecileLabel`] from untyped input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecileError {
    /// Value outside the `11..=20` label space.
    #[error("decile label out of range: {0} (must be in 11..=20)")]
    OutOfRange(i64),

    /// Bucket index outside `0..10`.
    #[error("bucket index out of range: {0} (must be below 10)")]
    BucketOutOfRange(usize),

    /// Text that is not a decile label.
    #[error("invalid decile label: {0:?}")]
    Unparsable(String),
}

/// One of the ten yield-spread deciles, labeled 11 (tightest) to 20 (widest).
///
/// Labels are offset by eleven so they never collide with the 1..=10
/// treasury-decile labels of the benchmark file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Into, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct DecileLabel(u8);

impl DecileLabel {
    /// Number of deciles.
    pub const COUNT: usize = 10;
    /// Lowest label.
    pub const FIRST: Self = Self(11);
    /// Highest label.
    pub const LAST: Self = Self(20);

    /// Create a label from its numeric value.
    ///
    /// # Errors
    /// Returns `DecileError::OutOfRange` unless `value` is in `11..=20`.
    pub fn new(value: i64) -> Result<Self, DecileError> {
        if (i64::from(Self::FIRST.0)..=i64::from(Self::LAST.0)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DecileError::OutOfRange(value))
        }
    }

    /// Map a zero-based quantile bucket (0 = lowest spread) to its label.
    ///
    /// # Errors
    /// Returns `DecileError::BucketOutOfRange` for buckets of 10 or more.
    pub fn from_bucket(bucket: usize) -> Result<Self, DecileError> {
        if bucket < Self::COUNT {
            Ok(Self(Self::FIRST.0 + bucket as u8))
        } else {
            Err(DecileError::BucketOutOfRange(bucket))
        }
    }

    /// Numeric value of the label.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Zero-based bucket index.
    #[must_use]
    pub const fn bucket(self) -> usize {
        (self.0 - Self::FIRST.0) as usize
    }

    /// All ten labels in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::FIRST.0..=Self::LAST.0).map(Self)
    }

    /// Column name of this decile in a benchmark table, e.g. `US_bonds_11`.
    #[must_use]
    pub fn benchmark_column(self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }
}

impl fmt::Display for DecileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DecileLabel {
    type Err = DecileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 =
            trimmed.parse().map_err(|_| DecileError::Unparsable(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u8> for DecileLabel {
    type Error = DecileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl TryFrom<i32> for DecileLabel {
    type Error = DecileError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

//! Batch size value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::BatchSizeError;

/// Smallest batch size (one key per `send-key` call)
pub const MIN_BATCH_SIZE: u8 = 1;

/// Largest batch size accepted by `send-key`
pub const MAX_BATCH_SIZE: u8 = 15;

/// Maximum number of characters sent per external call ("speed").
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchSize(u8);

impl BatchSize {
    /// Create a batch size, rejecting values outside 1..=15
    pub fn new(value: u8) -> Result<Self, BatchSizeError> {
        if (MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(BatchSizeError {
                input: value.to_string(),
            })
        }
    }

    /// One character per call
    pub const fn single() -> Self {
        Self(MIN_BATCH_SIZE)
    }

    /// Get the batch size
    pub const fn get(&self) -> usize {
        self.0 as usize
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self::single()
    }
}

impl FromStr for BatchSize {
    type Err = BatchSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.trim().parse().map_err(|_| BatchSizeError {
            input: s.to_string(),
        })?;

        Self::new(value).map_err(|_| BatchSizeError {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Reduction of sample series into averages and percentiles.
//!
//! Percentiles use the nearest-rank-floor convention: the values are sorted ascending and the
//! element at index `floor(0.9 * count)` is selected. There is no interpolation between ranks, so
//! the result is always one of the measured values. For ten or fewer samples this is the maximum.

use std::cmp::Ordering;
use std::time::Duration;

use crate::error::{Error, Result};

/// A measured value that percentiles can be computed over.
pub trait Metric: Copy {
    /// A total order over all values of this type.
    fn total_cmp(&self, other: &Self) -> Ordering;
}

impl Metric for Duration {
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Metric for f64 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}

/// Returns the mean of `durations`, truncated to whole nanoseconds.
pub fn average(durations: &[Duration]) -> Result<Duration> {
    if durations.is_empty() {
        return Err(Error::EmptySeries);
    }

    let total: u128 = durations.iter().map(Duration::as_nanos).sum();
    let mean = total / durations.len() as u128;
    Ok(Duration::from_nanos(mean as u64))
}

/// Returns the 90th percentile of `values`.
///
/// The input is left untouched; sorting happens on a copy.
pub fn p90<T: Metric>(values: &[T]) -> Result<T> {
    if values.is_empty() {
        return Err(Error::EmptySeries);
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(T::total_cmp);

    // floor(0.9 * len) in integer arithmetic, which is always below `len`.
    let index = sorted.len() * 9 / 10;
    Ok(sorted[index])
}

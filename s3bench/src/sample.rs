//! Measurements taken by individual trials.

use std::time::Duration;

use crate::error::{Error, Result};

/// Divisor converting bytes to megabytes.
const BYTES_PER_MB: f64 = (1024 * 1024) as f64;

/// The outcome of a single upload or download trial.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// How long the transfer took.
    pub elapsed: Duration,
    /// Throughput of the transfer in megabytes (1024 × 1024 bytes) per second.
    pub speed_mbps: f64,
}

impl Sample {
    /// Derives a sample from a transfer of `bytes` that took `elapsed`.
    ///
    /// A zero `elapsed` would yield an infinite speed and is rejected instead. `key` only serves
    /// to identify the trial in that error.
    pub fn from_transfer(key: &str, bytes: u64, elapsed: Duration) -> Result<Self> {
        if elapsed.is_zero() {
            return Err(Error::ZeroElapsed {
                key: key.to_owned(),
            });
        }

        let speed_mbps = bytes as f64 / elapsed.as_secs_f64() / BYTES_PER_MB;
        Ok(Self {
            elapsed,
            speed_mbps,
        })
    }
}

/// All samples of one kind of operation in a run, in trial order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    /// Creates an empty series with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples in the order their trials ran.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The transfer times of all samples, in trial order.
    pub fn durations(&self) -> Vec<Duration> {
        self.samples.iter().map(|s| s.elapsed).collect()
    }

    /// The transfer speeds of all samples, in trial order.
    pub fn speeds(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.speed_mbps).collect()
    }
}

impl FromIterator<Sample> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

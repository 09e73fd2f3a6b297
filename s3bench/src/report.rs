//! The summary of a benchmark run.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::TrialConfig;
use crate::error::Result;
use crate::sample::SampleSeries;
use crate::stats::{average, p90};

/// Average transfer times.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Averages {
    #[serde(with = "humantime_serde")]
    pub upload_time: Duration,
    #[serde(with = "humantime_serde")]
    pub download_time: Duration,
}

/// 90th percentiles of transfer times and speeds.
///
/// Speeds are in megabytes (1024 × 1024 bytes) per second.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Percentiles {
    #[serde(with = "humantime_serde")]
    pub upload_time: Duration,
    pub upload_speed: f64,
    #[serde(with = "humantime_serde")]
    pub download_time: Duration,
    pub download_speed: f64,
}

/// Statistics over all trials of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub trials: usize,
    pub file_size_bytes: u64,
    pub avg: Averages,
    pub p90: Percentiles,
}

impl Report {
    /// Aggregates the upload and download series of a completed run.
    ///
    /// Fails with [`Error::EmptySeries`](crate::Error::EmptySeries) if either series has no
    /// samples.
    pub fn from_series(
        config: &TrialConfig,
        upload: &SampleSeries,
        download: &SampleSeries,
    ) -> Result<Self> {
        let upload_times = upload.durations();
        let download_times = download.durations();

        Ok(Self {
            trials: config.trials(),
            file_size_bytes: config.file_size().as_u64(),
            avg: Averages {
                upload_time: average(&upload_times)?,
                download_time: average(&download_times)?,
            },
            p90: Percentiles {
                upload_time: p90(&upload_times)?,
                upload_speed: p90(&upload.speeds())?,
                download_time: p90(&download_times)?,
                download_speed: p90(&download.speeds())?,
            },
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            " Upload P90  : time={:?} speed={:.2} MB/s",
            self.p90.upload_time, self.p90.upload_speed
        )?;
        writeln!(
            f,
            " Download P90: time={:?} speed={:.2} MB/s",
            self.p90.download_time, self.p90.download_speed
        )?;
        writeln!(
            f,
            " Average     : upload.time={:?} download.time={:?}",
            self.avg.upload_time, self.avg.download_time
        )
    }
}

//! Sequential upload and download trials against a [`Backend`].
//!
//! Trials never overlap: each one measures a single transfer without contention from other
//! in-flight requests. The first failing trial aborts the whole phase.

use rand::RngCore;

use crate::backend::Backend;
use crate::config::TrialConfig;
use crate::error::{Error, Result};
use crate::payload::PayloadGenerator;
use crate::sample::{Sample, SampleSeries};

/// Uploads one freshly generated payload per trial and records how long each upload took.
///
/// `progress` is called with the 1-based trial number after every completed trial.
pub async fn run_upload_trials<B, R>(
    backend: &B,
    config: &TrialConfig,
    payloads: &mut PayloadGenerator<R>,
    mut progress: impl FnMut(usize, &Sample),
) -> Result<SampleSeries>
where
    B: Backend + ?Sized,
    R: RngCore,
{
    let size = config.file_size().as_u64();
    let mut series = SampleSeries::with_capacity(config.trials());
    tracing::info!(trials = config.trials(), size, "starting upload trials");

    for trial in 1..=config.trials() {
        let key = config.key(trial);
        let payload = payloads.generate(size);

        let elapsed = backend
            .put_object(config.bucket(), &key, payload)
            .await
            .map_err(|cause| Error::Upload {
                key: key.clone(),
                bucket: config.bucket().to_owned(),
                cause,
            })?;

        let sample = Sample::from_transfer(&key, size, elapsed)?;
        tracing::debug!(trial, %key, ?elapsed, speed = sample.speed_mbps, "upload finished");
        progress(trial, &sample);
        series.push(sample);
    }

    Ok(series)
}

/// Reads back the object of every trial and records how long each download took.
///
/// Every download must yield exactly `expected_size` bytes, otherwise the run is aborted with
/// [`Error::Integrity`].
pub async fn run_download_trials<B>(
    backend: &B,
    config: &TrialConfig,
    expected_size: u64,
    mut progress: impl FnMut(usize, &Sample),
) -> Result<SampleSeries>
where
    B: Backend + ?Sized,
{
    let mut series = SampleSeries::with_capacity(config.trials());
    tracing::info!(trials = config.trials(), "starting download trials");

    for trial in 1..=config.trials() {
        let key = config.key(trial);

        let download = backend
            .get_object(config.bucket(), &key)
            .await
            .map_err(|cause| Error::Download {
                key: key.clone(),
                bucket: config.bucket().to_owned(),
                cause,
            })?;

        if download.bytes != expected_size {
            return Err(Error::Integrity {
                key,
                expected: expected_size,
                actual: download.bytes,
            });
        }

        let sample = Sample::from_transfer(&key, download.bytes, download.elapsed)?;
        tracing::debug!(
            trial,
            %key,
            elapsed = ?download.elapsed,
            speed = sample.speed_mbps,
            "download finished"
        );
        progress(trial, &sample);
        series.push(sample);
    }

    Ok(series)
}

/// Deletes the objects of all trials, returning how many were removed.
///
/// This is best effort: failures are logged and do not stop the remaining deletes.
pub async fn cleanup<B>(backend: &B, config: &TrialConfig) -> usize
where
    B: Backend + ?Sized,
{
    let mut deleted = 0;
    for trial in 1..=config.trials() {
        let key = config.key(trial);
        match backend.delete_object(config.bucket(), &key).await {
            Ok(()) => deleted += 1,
            Err(error) => {
                tracing::warn!(
                    error = &error as &dyn std::error::Error,
                    %key,
                    "failed to delete trial object"
                );
            }
        }
    }

    tracing::info!(deleted, "cleaned up trial objects");
    deleted
}

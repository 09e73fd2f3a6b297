//! Benchmarks upload and download latency of an S3-compatible object store.
//!
//! See `s3bench --help` for all options.

use anyhow::{Context, Result};
use yansi::Paint;

use s3bench::backend::{Backend, S3CompatibleBackend, S3CompatibleBackendConfig};
use s3bench::cli::Args;
use s3bench::config::{Config, TrialConfig};
use s3bench::observability::initialize_tracing;
use s3bench::payload::PayloadGenerator;
use s3bench::runner::{cleanup, run_download_trials, run_upload_trials};
use s3bench::{Report, Sample};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();
    initialize_tracing();

    let config = Config::from_args(args)
        .context("invalid configuration, run with `--help` to see the usage")?;
    tracing::debug!(?config);

    let backend = S3CompatibleBackend::new(S3CompatibleBackendConfig {
        endpoint: config.endpoint,
        region: config.region,
        path_style: config.path_style,
        access_key: config.access_key,
        secret_key: config.secret_key,
    })
    .context("failed to create S3 client")?;

    let outcome = benchmark(&backend, &config.trial).await;

    // Remove the trial objects even if the benchmark was aborted.
    if config.cleanup {
        cleanup(&backend, &config.trial).await;
    }

    let report = outcome?;
    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}\n{report}", "Report:".bold());
    }

    Ok(())
}

async fn benchmark(backend: &impl Backend, trial: &TrialConfig) -> Result<Report> {
    let size = trial.file_size();
    let mut payloads = PayloadGenerator::from_os_rng();

    println!(
        "{} ({} trials of {}, backend: {})",
        "Upload:".bold(),
        trial.trials().bold(),
        size,
        backend.name()
    );
    let upload = run_upload_trials(backend, trial, &mut payloads, print_trial).await?;

    println!("{}", "Download:".bold());
    let download = run_download_trials(backend, trial, size.as_u64(), print_trial).await?;

    Ok(Report::from_series(trial, &upload, &download)?)
}

fn print_trial(trial: usize, sample: &Sample) {
    println!(
        " - Trial: {trial},\ttime={:.2?}, speed={} MB/s",
        sample.elapsed,
        format!("{:.2}", sample.speed_mbps).green()
    );
}

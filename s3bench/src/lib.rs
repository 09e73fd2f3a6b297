//! Latency and throughput benchmark for S3-compatible object storage.
//!
//! A run consists of a number of sequential *trials*. Each upload trial writes a freshly generated
//! random payload of a fixed size, and each download trial reads one of those objects back in full
//! and verifies its size. Every trial yields a [`Sample`] of its duration and speed, and the
//! samples of a run are reduced into a [`Report`] holding averages and 90th percentiles.
//!
//! The storage service is abstracted behind the [`Backend`](backend::Backend) trait. See
//! [`backend::S3CompatibleBackend`] for the implementation talking to S3.
#![warn(missing_debug_implementations)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod payload;
pub mod report;
pub mod runner;
pub mod sample;
pub mod stats;

pub use crate::error::{Error, Result};
pub use crate::report::Report;
pub use crate::sample::{Sample, SampleSeries};

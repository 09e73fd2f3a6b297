use thiserror::Error;

use crate::backend::BackendError;

/// Errors that abort a benchmark run.
///
/// Every variant is fatal. The first error stops the run and no partial report is produced.
#[derive(Debug, Error)]
pub enum Error {
    /// Uploading a trial object failed.
    #[error("unable to upload `{key}` to `{bucket}`")]
    Upload {
        /// The object key of the failed trial.
        key: String,
        /// The bucket the object was written to.
        bucket: String,
        /// The underlying backend failure.
        #[source]
        cause: BackendError,
    },

    /// Downloading a trial object failed.
    #[error("unable to download `{key}` from `{bucket}`")]
    Download {
        /// The object key of the failed trial.
        key: String,
        /// The bucket the object was read from.
        bucket: String,
        /// The underlying backend failure.
        #[source]
        cause: BackendError,
    },

    /// A downloaded object did not have the size that was uploaded.
    #[error("unmatched sizes for `{key}`: actual={actual}, expected={expected}")]
    Integrity {
        /// The object key of the failed trial.
        key: String,
        /// The number of bytes that were uploaded.
        expected: u64,
        /// The number of bytes that were received.
        actual: u64,
    },

    /// The backend reported a transfer that took no measurable time.
    #[error("backend reported zero elapsed time for `{key}`")]
    ZeroElapsed {
        /// The object key of the failed trial.
        key: String,
    },

    /// Statistics were requested over a series without samples.
    #[error("cannot aggregate an empty sample series")]
    EmptySeries,
}

/// A convenience alias that defaults our [`Error`] type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Storage backends that trials are run against.
//!
//! The benchmark only needs three operations from a backend: writing an object, reading it back in
//! full and deleting it again. Backends time their own transfers, so that connection setup or
//! request signing outside of the transfer does not leak into the measurements.

use std::fmt::Debug;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

#[cfg(test)]
mod in_memory;
mod s3_compatible;

#[cfg(test)]
pub(crate) use in_memory::InMemoryBackend;
pub use s3_compatible::{S3CompatibleBackend, S3CompatibleBackendConfig};

/// The outcome of a completed download.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Download {
    /// The number of bytes received, after draining the entire response body.
    pub bytes: u64,
    /// Time from issuing the request until the body was fully drained.
    pub elapsed: Duration,
}

#[async_trait::async_trait]
pub trait Backend: Debug + Send + Sync + 'static {
    /// The backend name, used for diagnostics.
    fn name(&self) -> &'static str;

    /// Stores `payload` under `key` and returns the time the upload took.
    async fn put_object(&self, bucket: &str, key: &str, payload: Bytes) -> BackendResult<Duration>;

    /// Reads the object at `key` to completion, discarding its contents.
    async fn get_object(&self, bucket: &str, key: &str) -> BackendResult<Download>;

    /// Deletes the object at `key`.
    async fn delete_object(&self, bucket: &str, key: &str) -> BackendResult<()>;
}

#[derive(Debug, Error)]
pub enum BackendError {
    /// All errors stemming from the S3 client. These can be network errors, signing errors or
    /// error responses returned by the storage service itself.
    #[error("s3 error: {context}")]
    S3 {
        context: String,
        #[source]
        cause: s3::error::S3Error,
    },

    /// The requested object does not exist.
    #[error("object `{key}` not found")]
    NotFound { key: String },

    /// Any other error stemming from one of the storage backends.
    #[error("storage backend error: {context}")]
    Generic {
        context: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

use std::fmt;
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures_util::StreamExt;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use secrecy::{ExposeSecret, SecretString};

use super::{Backend, BackendError, BackendResult, Download};

const NOT_FOUND: u16 = 404;

/// Connection settings for [`S3CompatibleBackend`].
#[derive(Debug)]
pub struct S3CompatibleBackendConfig {
    /// Endpoint URL including the scheme, such as `https://s3.example.com`.
    pub endpoint: String,
    pub region: String,
    /// Address buckets as `{endpoint}/{bucket}` instead of `{bucket}.{endpoint}`.
    pub path_style: bool,
    pub access_key: String,
    pub secret_key: SecretString,
}

/// A backend talking to Amazon S3 or any service implementing its API, such as MinIO.
pub struct S3CompatibleBackend {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3CompatibleBackend {
    /// Creates a new S3 compatible backend for the given endpoint.
    ///
    /// No request is sent until the first object is written or read.
    pub fn new(config: S3CompatibleBackendConfig) -> BackendResult<Self> {
        let credentials = Credentials::new(
            Some(config.access_key.as_str()),
            Some(config.secret_key.expose_secret()),
            None,
            None,
            None,
        )
        .map_err(|cause| BackendError::Generic {
            context: "invalid S3 credentials".to_owned(),
            cause: Box::new(cause),
        })?;

        let region = Region::Custom {
            region: config.region,
            endpoint: config.endpoint,
        };

        Ok(Self {
            region,
            credentials,
            path_style: config.path_style,
        })
    }

    fn bucket(&self, name: &str) -> BackendResult<Box<Bucket>> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|cause| s3_error(format!("failed to configure bucket `{name}`"), cause))?;

        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

impl fmt::Debug for S3CompatibleBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Compatible")
            .field("endpoint", &self.region.endpoint())
            .field("path_style", &self.path_style)
            .finish_non_exhaustive()
    }
}

fn s3_error(context: String, cause: S3Error) -> BackendError {
    BackendError::S3 { context, cause }
}

#[async_trait::async_trait]
impl Backend for S3CompatibleBackend {
    fn name(&self) -> &'static str {
        "s3-compatible"
    }

    #[tracing::instrument(level = "trace", skip(self, payload), fields(size = payload.len()))]
    async fn put_object(&self, bucket: &str, key: &str, payload: Bytes) -> BackendResult<Duration> {
        let bucket = self.bucket(bucket)?;
        tracing::debug!("Writing to s3_compatible backend");

        let start = Instant::now();
        bucket
            .put_object(key, &payload)
            .await
            .map_err(|cause| s3_error(format!("failed to put `{key}`"), cause))?;

        Ok(start.elapsed())
    }

    #[tracing::instrument(level = "trace", skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> BackendResult<Download> {
        let bucket = self.bucket(bucket)?;
        tracing::debug!("Reading from s3_compatible backend");

        let start = Instant::now();
        let mut response = match bucket.get_object_stream(key).await {
            Ok(response) => response,
            Err(S3Error::HttpFailWithBody(NOT_FOUND, _)) => {
                tracing::debug!("Object not found");
                return Err(BackendError::NotFound {
                    key: key.to_owned(),
                });
            }
            Err(cause) => return Err(s3_error(format!("failed to get `{key}`"), cause)),
        };

        let mut bytes = 0;
        while let Some(chunk) = response.bytes().next().await {
            let chunk =
                chunk.map_err(|cause| s3_error(format!("failed to receive `{key}`"), cause))?;
            bytes += chunk.len() as u64;
        }

        Ok(Download {
            bytes,
            elapsed: start.elapsed(),
        })
    }

    #[tracing::instrument(level = "trace", skip(self))]
    async fn delete_object(&self, bucket: &str, key: &str) -> BackendResult<()> {
        let bucket = self.bucket(bucket)?;
        tracing::debug!("Deleting from s3_compatible backend");

        bucket
            .delete_object(key)
            .await
            .map_err(|cause| s3_error(format!("failed to delete `{key}`"), cause))?;

        Ok(())
    }
}

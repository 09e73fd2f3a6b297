//! Configuration of a benchmark run.
//!
//! Configuration is assembled from command line [`Args`] with the following fallbacks:
//!
//! - The access key falls back to `$S3_ACCESS_KEY` if the flag is missing or empty.
//! - The secret key falls back to `$S3_SECRET_KEY` if the flag is missing or empty.
//!
//! There is no configuration file.

use bytesize::ByteSize;
use secrecy::SecretString;
use thiserror::Error;

use crate::cli::Args;

/// Environment variable consulted when `--access-key` is not given.
pub const ACCESS_KEY_ENV: &str = "S3_ACCESS_KEY";
/// Environment variable consulted when `--secret-key` is not given.
pub const SECRET_KEY_ENV: &str = "S3_SECRET_KEY";

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Errors in the configuration given by the operator. No trials are run.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Required parameters were neither given as flags nor through the environment.
    #[error("missing required parameters: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("file size must be at least 1 MB")]
    ZeroFileSize,

    #[error("file size of {0} MB is too large")]
    FileSizeOverflow(u64),

    #[error("the number of trials must be at least 1")]
    ZeroTrials,

    #[error("bucket name must not be empty")]
    EmptyBucket,
}

/// Parameters of the trial loop. Immutable for the duration of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialConfig {
    bucket: String,
    file_size: ByteSize,
    trials: usize,
    key_prefix: String,
}

impl TrialConfig {
    /// Default prefix of trial object keys.
    pub const DEFAULT_KEY_PREFIX: &'static str = "file-";

    /// Creates a trial configuration writing `trials` objects of `file_size_bytes` each.
    pub fn new(
        bucket: impl Into<String>,
        file_size_bytes: u64,
        trials: usize,
    ) -> Result<Self, ConfigError> {
        let bucket = bucket.into();
        if bucket.is_empty() {
            return Err(ConfigError::EmptyBucket);
        }
        if file_size_bytes == 0 {
            return Err(ConfigError::ZeroFileSize);
        }
        if trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }

        Ok(Self {
            bucket,
            file_size: ByteSize::b(file_size_bytes),
            trials,
            key_prefix: Self::DEFAULT_KEY_PREFIX.to_owned(),
        })
    }

    /// Replaces the prefix of all object keys.
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn file_size(&self) -> ByteSize {
        self.file_size
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// The object key written by upload trial `trial` and read by the matching download trial.
    ///
    /// Trials are numbered from 1.
    pub fn key(&self, trial: usize) -> String {
        format!("{}{trial}.dat", self.key_prefix)
    }
}

/// Complete configuration of a benchmark run.
#[derive(Debug)]
pub struct Config {
    /// Endpoint URL including the scheme.
    pub endpoint: String,
    pub region: String,
    pub path_style: bool,
    pub access_key: String,
    pub secret_key: SecretString,
    pub trial: TrialConfig,
    /// Delete trial objects after the run.
    pub cleanup: bool,
    /// Print the report as JSON instead of text.
    pub json: bool,
}

impl Config {
    /// Builds the configuration from parsed arguments, reading fallbacks from the process
    /// environment.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        Self::from_args_with_env(args, |name| std::env::var(name).ok())
    }

    /// Builds the configuration from parsed arguments, reading fallbacks through `env`.
    pub fn from_args_with_env(
        args: Args,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let endpoint = non_empty(args.endpoint);
        let access_key = non_empty(args.access_key).or_else(|| non_empty(env(ACCESS_KEY_ENV)));
        let secret_key = non_empty(args.secret_key).or_else(|| non_empty(env(SECRET_KEY_ENV)));
        let bucket = non_empty(args.bucket_name);

        let (Some(endpoint), Some(access_key), Some(secret_key), Some(bucket)) =
            (&endpoint, &access_key, &secret_key, &bucket)
        else {
            let missing = [
                ("endpoint", endpoint.is_none()),
                ("access key", access_key.is_none()),
                ("secret key", secret_key.is_none()),
                ("bucket name", bucket.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect();
            return Err(ConfigError::Missing(missing));
        };

        let file_size_bytes = args
            .file_size
            .checked_mul(BYTES_PER_MB)
            .ok_or(ConfigError::FileSizeOverflow(args.file_size))?;
        let trial = TrialConfig::new(bucket.as_str(), file_size_bytes, args.trials)?
            .with_key_prefix(args.key_prefix);

        Ok(Self {
            endpoint: normalize_endpoint(endpoint),
            region: args.region,
            path_style: !args.virtual_hosted,
            access_key: access_key.clone(),
            secret_key: SecretString::from(secret_key.clone()),
            trial,
            cleanup: args.cleanup,
            json: args.json,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Prefixes `https://` unless the endpoint already names a scheme.
fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.contains("://") {
        endpoint.to_owned()
    } else {
        format!("https://{endpoint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            endpoint: Some("s3.example.com".into()),
            access_key: Some("access".into()),
            secret_key: Some("secret".into()),
            bucket_name: Some("bench".into()),
            file_size: 10,
            trials: 10,
            region: "us-east-1".into(),
            virtual_hosted: false,
            key_prefix: "file-".into(),
            cleanup: false,
            json: false,
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn flags_only() {
        let config = Config::from_args_with_env(args(), no_env).unwrap();

        assert_eq!(config.endpoint, "https://s3.example.com");
        assert_eq!(config.access_key, "access");
        assert!(config.path_style);
        assert_eq!(config.trial.bucket(), "bench");
        assert_eq!(config.trial.file_size(), ByteSize::b(10_485_760));
        assert_eq!(config.trial.trials(), 10);
    }

    #[test]
    fn credentials_fall_back_to_env() {
        let args = Args {
            access_key: None,
            secret_key: Some(String::new()),
            ..args()
        };
        let env = |name: &str| match name {
            ACCESS_KEY_ENV => Some("env-access".to_owned()),
            SECRET_KEY_ENV => Some("env-secret".to_owned()),
            _ => None,
        };

        let config = Config::from_args_with_env(args, env).unwrap();
        assert_eq!(config.access_key, "env-access");
        assert_eq!(
            secrecy::ExposeSecret::expose_secret(&config.secret_key),
            "env-secret"
        );
    }

    #[test]
    fn flags_take_precedence_over_env() {
        let env = |_: &str| Some("from-env".to_owned());
        let config = Config::from_args_with_env(args(), env).unwrap();
        assert_eq!(config.access_key, "access");
    }

    #[test]
    fn missing_parameters_are_all_named() {
        let args = Args {
            endpoint: Some(String::new()),
            secret_key: None,
            bucket_name: None,
            ..args()
        };

        let err = Config::from_args_with_env(args, no_env).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec!["endpoint", "secret key", "bucket name"])
        );
        assert_eq!(
            err.to_string(),
            "missing required parameters: endpoint, secret key, bucket name"
        );
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let zero_size = Args {
            file_size: 0,
            ..args()
        };
        let zero_trials = Args {
            trials: 0,
            ..args()
        };

        assert_eq!(
            Config::from_args_with_env(zero_size, no_env).unwrap_err(),
            ConfigError::ZeroFileSize
        );
        assert_eq!(
            Config::from_args_with_env(zero_trials, no_env).unwrap_err(),
            ConfigError::ZeroTrials
        );
    }

    #[test]
    fn oversized_file_is_rejected() {
        let args = Args {
            file_size: u64::MAX,
            ..args()
        };
        assert_eq!(
            Config::from_args_with_env(args, no_env).unwrap_err(),
            ConfigError::FileSizeOverflow(u64::MAX)
        );
    }

    #[test]
    fn endpoint_scheme_is_kept() {
        let args = Args {
            endpoint: Some("http://localhost:9000/".into()),
            virtual_hosted: true,
            ..args()
        };

        let config = Config::from_args_with_env(args, no_env).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000");
        assert!(!config.path_style);
    }

    #[test]
    fn secret_is_redacted_in_debug() {
        let config = Config::from_args_with_env(args(), no_env).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("\"secret\""));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn keys_are_derived_from_trial_index() {
        let trial = TrialConfig::new("bench", 1, 3)
            .unwrap()
            .with_key_prefix("run-a/");
        assert_eq!(trial.key(1), "run-a/1.dat");
        assert_eq!(trial.key(3), "run-a/3.dat");
    }
}

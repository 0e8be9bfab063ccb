//! # Config Module
//!
//! Immutable worker configuration.
//!
//! The CLI reads environment variables (and `.env`) through clap, then
//! hands a validated [`WorkerConfig`] to the pipeline. Nothing in the
//! library reads the environment directly.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default input file
pub const DEFAULT_INPUT_FILE: &str = "profiles.json";
/// Default output file
pub const DEFAULT_OUTPUT_FILE: &str = "results.json";
/// Default worker pool size
pub const DEFAULT_MAX_WORKERS: usize = 5;
/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    api_endpoint: Url,
    worker_secret: Option<String>,
    input_file: PathBuf,
    output_file: PathBuf,
    max_workers: usize,
    request_timeout: Duration,
}

impl WorkerConfig {
    /// Start building a configuration for the given endpoint
    pub fn builder(api_endpoint: impl Into<String>) -> WorkerConfigBuilder {
        WorkerConfigBuilder::new(api_endpoint)
    }

    /// Endpoint that receives one POST per hashed record
    pub fn api_endpoint(&self) -> &Url {
        &self.api_endpoint
    }

    /// Shared secret sent as `X-WORKER-SECRET`, if any
    pub fn worker_secret(&self) -> Option<&str> {
        self.worker_secret.as_deref()
    }

    pub fn input_file(&self) -> &PathBuf {
        &self.input_file
    }

    pub fn output_file(&self) -> &PathBuf {
        &self.output_file
    }

    /// Number of records processed concurrently
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Timeout applied to every fetch and every submission
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Builder for [`WorkerConfig`]
#[derive(Debug, Clone)]
pub struct WorkerConfigBuilder {
    api_endpoint: String,
    worker_secret: Option<String>,
    input_file: PathBuf,
    output_file: PathBuf,
    max_workers: usize,
    timeout_secs: u64,
}

impl WorkerConfigBuilder {
    /// Create a builder with defaults for everything but the endpoint
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            worker_secret: None,
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            max_workers: DEFAULT_MAX_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the shared secret. An empty string means no secret.
    pub fn worker_secret(mut self, secret: Option<String>) -> Self {
        self.worker_secret = secret.filter(|s| !s.is_empty());
        self
    }

    pub fn input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_file = path.into();
        self
    }

    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<WorkerConfig, ConfigError> {
        let raw = self.api_endpoint.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        let api_endpoint = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(api_endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                value: raw.to_string(),
                reason: format!("unsupported scheme '{}'", api_endpoint.scheme()),
            });
        }

        if self.max_workers == 0 {
            return Err(ConfigError::InvalidWorkerCount {
                value: self.max_workers,
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                value: self.timeout_secs,
            });
        }

        Ok(WorkerConfig {
            api_endpoint,
            worker_secret: self.worker_secret,
            input_file: self.input_file,
            output_file: self.output_file,
            max_workers: self.max_workers,
            request_timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = WorkerConfig::builder("https://api.example.com/checkImage")
            .build()
            .unwrap();

        assert_eq!(config.input_file(), &PathBuf::from("profiles.json"));
        assert_eq!(config.output_file(), &PathBuf::from("results.json"));
        assert_eq!(config.max_workers(), 5);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.worker_secret().is_none());
    }

    #[test]
    fn empty_secret_is_treated_as_unset() {
        let config = WorkerConfig::builder("https://api.example.com")
            .worker_secret(Some(String::new()))
            .build()
            .unwrap();

        assert!(config.worker_secret().is_none());
    }

    #[test]
    fn secret_is_kept_when_present() {
        let config = WorkerConfig::builder("https://api.example.com")
            .worker_secret(Some("s3cret".to_string()))
            .build()
            .unwrap();

        assert_eq!(config.worker_secret(), Some("s3cret"));
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let result = WorkerConfig::builder("  ").build();
        assert!(matches!(result, Err(ConfigError::MissingEndpoint)));
    }

    #[test]
    fn malformed_endpoint_is_rejected() {
        let result = WorkerConfig::builder("not a url").build();
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let result = WorkerConfig::builder("ftp://files.example.com/upload").build();
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let result = WorkerConfig::builder("https://api.example.com")
            .max_workers(0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidWorkerCount { value: 0 })
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = WorkerConfig::builder("https://api.example.com")
            .timeout_secs(0)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { value: 0 })));
    }
}

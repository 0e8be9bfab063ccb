//! # Error Module
//!
//! Error types for the profile hash worker.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, URLs, record ids, what went wrong
//! - **Fatal vs per-record** - only configuration and input errors stop a run

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Errors in the worker configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API_ENDPOINT is required")]
    MissingEndpoint,

    #[error("Invalid API endpoint {value}: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("Invalid worker count: {value} (must be at least 1)")]
    InvalidWorkerCount { value: usize },

    #[error("Invalid request timeout: {value}s (must be at least 1)")]
    InvalidTimeout { value: u64 },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

/// Errors while loading the profile list. Always fatal.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read input file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors while downloading an image
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Errors while decoding and hashing an image
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Image data is empty")]
    EmptyImage,

    #[error("Failed to decode image: {reason}")]
    DecodeError { reason: String },

    #[error("Hash computation failed: {0}")]
    ComputationFailed(String),
}

/// Errors while reporting a hash to the backend
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Submission for {id} failed: {reason}")]
    Request { id: String, reason: String },

    #[error("Submission for {id} timed out")]
    Timeout { id: String },

    #[error("Submission for {id} rejected with HTTP {status}")]
    Rejected { id: String, status: u16 },
}

/// Errors while writing the results file
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write results to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, WorkerError>;

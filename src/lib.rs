//! # Profile pHash Worker
//!
//! Downloads profile images, computes a perceptual hash for each and
//! reports the hashes to a backend API.
//!
//! ## Core Behavior
//! - **Bounded concurrency** - a fixed pool of workers, one record each
//! - **Failure isolation** - a bad image or a rejected submission only
//!   affects its own record
//! - **Complete log** - every input record gets exactly one outcome
//!
//! ## Architecture
//! - `core` - Input, fetch, hash, submit, pipeline, output
//! - `config` - Immutable run configuration
//! - `events` - Progress events for front ends
//! - `error` - Error types

pub mod config;
pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use config::WorkerConfig;
pub use error::{Result, WorkerError};

/// Initialize tracing for the binary.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to this
/// crate. Logs go to stderr.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("profile_phash_worker={}", default_level))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

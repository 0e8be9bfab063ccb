//! # Core Module
//!
//! The UI-agnostic hashing engine.
//!
//! ## Modules
//! - `input` - Loads profile records from JSON
//! - `fetcher` - Downloads profile images
//! - `hasher` - Computes perceptual hashes
//! - `reporter` - Posts hashes to the backend API
//! - `pipeline` - Runs every record through fetch, hash and submit
//! - `output` - Writes the results file

pub mod fetcher;
pub mod hasher;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod reporter;

// Re-export commonly used types
pub use hasher::{ImageHashValue, PerceptualHash};
pub use input::ProfileRecord;
pub use pipeline::{OutcomeStatus, ResultSet, RunSummary, TaskOutcome};

//! # Pipeline Module
//!
//! Orchestrates the per-record workflow.
//!
//! ## Record Stages
//! 1. **Fetch** - Download the profile image
//! 2. **Hash** - Decode it and compute the pHash
//! 3. **Submit** - POST the hash to the API
//!
//! The first failing stage ends the record with a categorized outcome;
//! other records are unaffected.
//!
//! ## Parallelism
//! A dedicated rayon pool with exactly `max_workers` threads. Records are
//! queued as individual FIFO jobs; each worker runs one record through all
//! stages before taking the next queued record, so at most `max_workers`
//! requests are in flight and a slow record never delays the others.

mod executor;
mod outcome;

pub use executor::{Pipeline, PipelineBuilder};
pub use outcome::{OutcomeStatus, ResultSet, RunSummary, TaskFailure, TaskOutcome};

//! Event type definitions for progress reporting.

use crate::core::pipeline::{RunSummary, TaskOutcome};
use serde::{Deserialize, Serialize};

/// All events emitted by the hashing pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Per-record events
    Record(RecordEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events for a single profile record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RecordEvent {
    /// A worker picked up the record
    Started { id: String },
    /// The record moved on to the next step
    StepChanged { id: String, step: RecordStep },
    /// The record reached its terminal outcome
    Completed(RecordProgress),
}

/// Steps every record goes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStep {
    Fetching,
    Hashing,
    Submitting,
}

/// Progress information after a record completes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordProgress {
    /// Number of records finished so far
    pub completed: usize,
    /// Total number of records in the run
    pub total: usize,
    /// The record's outcome
    pub outcome: TaskOutcome,
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started { total_records: usize, workers: usize },
    /// Every record has an outcome
    Completed { summary: RunSummary },
}

impl std::fmt::Display for RecordStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStep::Fetching => write!(f, "Downloading image"),
            RecordStep::Hashing => write!(f, "Computing pHash"),
            RecordStep::Submitting => write!(f, "Sending pHash to API"),
        }
    }
}

//! Per-record outcomes and the aggregated result set.

use crate::error::{FetchError, HashError, SubmitError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal status of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    FetchError,
    DecodeError,
    SubmitError,
}

impl OutcomeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Success)
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::Success => write!(f, "success"),
            OutcomeStatus::FetchError => write!(f, "fetch error"),
            OutcomeStatus::DecodeError => write!(f, "decode error"),
            OutcomeStatus::SubmitError => write!(f, "submit error"),
        }
    }
}

/// Why a record's task stopped early.
///
/// A submit failure still carries the hash so it ends up in the results
/// file.
#[derive(Error, Debug)]
pub enum TaskFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] HashError),

    #[error("{error}")]
    Submit { hash: String, error: SubmitError },
}

impl TaskFailure {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            TaskFailure::Fetch(_) => OutcomeStatus::FetchError,
            TaskFailure::Decode(_) => OutcomeStatus::DecodeError,
            TaskFailure::Submit { .. } => OutcomeStatus::SubmitError,
        }
    }
}

/// The single terminal result produced for one profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub id: String,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
}

impl TaskOutcome {
    pub fn success(id: impl Into<String>, hash: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: id.into(),
            status: OutcomeStatus::Success,
            hash: Some(hash.into()),
            error_detail: None,
            timestamp: Utc::now(),
            duration_ms,
        }
    }

    pub fn failure(id: impl Into<String>, failure: TaskFailure, duration_ms: u64) -> Self {
        let status = failure.status();
        let error_detail = Some(failure.to_string());
        let hash = match failure {
            TaskFailure::Submit { hash, .. } => Some(hash),
            _ => None,
        };

        Self {
            id: id.into(),
            status,
            hash,
            error_detail,
            timestamp: Utc::now(),
            duration_ms,
        }
    }

    /// Build the outcome from a task's tagged result
    pub fn from_result(
        id: impl Into<String>,
        result: Result<String, TaskFailure>,
        duration_ms: u64,
    ) -> Self {
        match result {
            Ok(hash) => Self::success(id, hash, duration_ms),
            Err(failure) => Self::failure(id, failure, duration_ms),
        }
    }
}

/// Summary counts for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub fetch_errors: usize,
    pub decode_errors: usize,
    pub submit_errors: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    /// Count outcomes by status
    pub fn from_outcomes(outcomes: &[TaskOutcome], duration_ms: u64) -> Self {
        let mut summary = RunSummary {
            total: outcomes.len(),
            duration_ms,
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome.status {
                OutcomeStatus::Success => summary.succeeded += 1,
                OutcomeStatus::FetchError => summary.fetch_errors += 1,
                OutcomeStatus::DecodeError => summary.decode_errors += 1,
                OutcomeStatus::SubmitError => summary.submit_errors += 1,
            }
        }

        summary.failed = summary.total - summary.succeeded;
        summary
    }
}

/// All outcomes of a run, in input order, plus the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub results: Vec<TaskOutcome>,
    pub summary: RunSummary,
}

impl ResultSet {
    pub fn new(results: Vec<TaskOutcome>, duration_ms: u64) -> Self {
        let summary = RunSummary::from_outcomes(&results, duration_ms);
        Self { results, summary }
    }

    /// Result set for a run with no input records
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

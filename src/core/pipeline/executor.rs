//! Pipeline execution implementation.

use super::outcome::{ResultSet, TaskFailure, TaskOutcome};
use crate::config::{WorkerConfig, DEFAULT_MAX_WORKERS};
use crate::core::fetcher::{build_client, HttpFetcher, ImageFetcher};
use crate::core::hasher::{HashAlgorithm, PerceptualHash, PerceptualHasher};
use crate::core::input::ProfileRecord;
use crate::core::reporter::{HashSubmission, HttpReporter, ResultReporter};
use crate::error::ConfigError;
use crate::events::{
    null_sender, Event, EventSender, PipelineEvent, RecordEvent, RecordProgress, RecordStep,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Builder for a pipeline
pub struct PipelineBuilder {
    fetcher: Box<dyn ImageFetcher>,
    reporter: Box<dyn ResultReporter>,
    hasher: Option<Box<dyn HashAlgorithm>>,
    workers: usize,
}

impl PipelineBuilder {
    /// Create a builder around the two network seams
    pub fn new(fetcher: Box<dyn ImageFetcher>, reporter: Box<dyn ResultReporter>) -> Self {
        Self {
            fetcher,
            reporter,
            hasher: None,
            workers: DEFAULT_MAX_WORKERS,
        }
    }

    /// Set the worker pool size
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Replace the default 64-bit pHash
    pub fn hasher(mut self, hasher: Box<dyn HashAlgorithm>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Build the pipeline and its worker pool
    pub fn build(self) -> Result<Pipeline, ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkerCount { value: 0 });
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("phash-worker-{}", i))
            .build()
            .map_err(|e| ConfigError::WorkerPool(e.to_string()))?;

        Ok(Pipeline {
            fetcher: self.fetcher,
            reporter: self.reporter,
            hasher: self
                .hasher
                .unwrap_or_else(|| Box::new(PerceptualHasher::default())),
            workers: self.workers,
            pool,
        })
    }
}

/// The fetch → hash → submit pipeline
pub struct Pipeline {
    fetcher: Box<dyn ImageFetcher>,
    reporter: Box<dyn ResultReporter>,
    hasher: Box<dyn HashAlgorithm>,
    workers: usize,
    pool: rayon::ThreadPool,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder(
        fetcher: Box<dyn ImageFetcher>,
        reporter: Box<dyn ResultReporter>,
    ) -> PipelineBuilder {
        PipelineBuilder::new(fetcher, reporter)
    }

    /// Wire up HTTP fetching and reporting from the worker configuration
    pub fn from_config(config: &WorkerConfig) -> Result<Self, ConfigError> {
        let client = build_client(config.request_timeout())?;
        let fetcher = HttpFetcher::with_client(client.clone());
        let reporter = HttpReporter::with_client(client, config.api_endpoint().clone())
            .with_secret(config.worker_secret().map(str::to_string));

        Self::builder(Box::new(fetcher), Box::new(reporter))
            .workers(config.max_workers())
            .build()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the pipeline without events
    pub fn run(&self, records: &[ProfileRecord]) -> ResultSet {
        self.run_with_events(records, &null_sender())
    }

    /// Process every record and collect one outcome per record.
    ///
    /// Every record is its own job on the pool, so a stalled record holds
    /// one worker and the rest keep draining the queue. Results come back
    /// in input order regardless of completion order.
    /// Never fails: per-record errors become outcomes.
    pub fn run_with_events(&self, records: &[ProfileRecord], events: &EventSender) -> ResultSet {
        let start_time = Instant::now();
        let total = records.len();

        tracing::info!(total, workers = self.workers, "Starting pipeline");
        events.send(Event::Pipeline(PipelineEvent::Started {
            total_records: total,
            workers: self.workers,
        }));

        let completed = AtomicUsize::new(0);
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<(usize, TaskOutcome)>();

        // One job per record, queued in input order; any idle worker takes the next one
        self.pool.scope_fifo(|scope| {
            for (index, record) in records.iter().enumerate() {
                let done_tx = done_tx.clone();
                let completed = &completed;
                scope.spawn_fifo(move |_| {
                    let outcome = self.process_record(record, events);
                    let current_completed = completed.fetch_add(1, Ordering::SeqCst) + 1;

                    events.send(Event::Record(RecordEvent::Completed(RecordProgress {
                        completed: current_completed,
                        total,
                        outcome: outcome.clone(),
                    })));

                    let _ = done_tx.send((index, outcome));
                });
            }
        });
        drop(done_tx);

        let mut slots: Vec<Option<TaskOutcome>> = (0..total).map(|_| None).collect();
        for (index, outcome) in done_rx.try_iter() {
            slots[index] = Some(outcome);
        }
        let outcomes: Vec<TaskOutcome> = slots.into_iter().flatten().collect();

        let result = ResultSet::new(outcomes, start_time.elapsed().as_millis() as u64);

        tracing::info!(
            total = result.summary.total,
            succeeded = result.summary.succeeded,
            failed = result.summary.failed,
            duration_ms = result.summary.duration_ms,
            "Pipeline finished"
        );
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: result.summary.clone(),
        }));

        result
    }

    /// Run one record to its terminal outcome
    pub fn process_record(&self, record: &ProfileRecord, events: &EventSender) -> TaskOutcome {
        let started = Instant::now();
        events.send(Event::Record(RecordEvent::Started {
            id: record.id.clone(),
        }));

        let result = self.execute(record, events);
        let outcome =
            TaskOutcome::from_result(&record.id, result, started.elapsed().as_millis() as u64);

        match &outcome.error_detail {
            Some(detail) => tracing::warn!(
                id = %record.id,
                status = %outcome.status,
                error = %detail,
                "Profile failed"
            ),
            None => tracing::debug!(
                id = %record.id,
                hash = outcome.hash.as_deref().unwrap_or_default(),
                "Profile processed"
            ),
        }

        outcome
    }

    /// Fetch, hash and submit. Stops at the first failing step.
    fn execute(&self, record: &ProfileRecord, events: &EventSender) -> Result<String, TaskFailure> {
        let enter = |step: RecordStep| {
            events.send(Event::Record(RecordEvent::StepChanged {
                id: record.id.clone(),
                step,
            }));
        };

        enter(RecordStep::Fetching);
        let bytes = self.fetcher.fetch(&record.image_url)?;

        enter(RecordStep::Hashing);
        let hash = self.hasher.hash_bytes(&bytes)?.to_hex();

        enter(RecordStep::Submitting);
        let submission = HashSubmission::new(&record.id, &hash);
        match self.reporter.submit(&submission) {
            Ok(()) => Ok(hash),
            Err(error) => Err(TaskFailure::Submit { hash, error }),
        }
    }
}

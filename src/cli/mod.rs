//! # CLI Module
//!
//! Command-line interface for the profile hash worker.
//!
//! Every option can come from the environment (or a `.env` file); flags
//! win over environment variables.
//!
//! ## Usage
//! ```bash
//! # Everything from the environment
//! API_ENDPOINT=https://api.example.com/api/checkImage phash-worker
//!
//! # Override input and concurrency
//! phash-worker --input staff.json --max-workers 10
//! ```

use clap::Parser;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use profile_phash_worker::config::{
    WorkerConfig, DEFAULT_INPUT_FILE, DEFAULT_MAX_WORKERS, DEFAULT_OUTPUT_FILE,
    DEFAULT_TIMEOUT_SECS,
};
use profile_phash_worker::core::input::load_profiles;
use profile_phash_worker::core::output::write_results;
use profile_phash_worker::core::pipeline::{Pipeline, ResultSet, RunSummary, TaskOutcome};
use profile_phash_worker::error::Result;
use profile_phash_worker::events::{Event, EventChannel, PipelineEvent, RecordEvent};
use std::path::PathBuf;
use std::thread;

/// Profile pHash Worker - hash profile images and report them to the API
#[derive(Parser, Debug)]
#[command(name = "phash-worker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Endpoint that receives one POST per hashed profile
    #[arg(long, env = "API_ENDPOINT", default_value = "")]
    api_endpoint: String,

    /// Shared secret sent as X-WORKER-SECRET
    #[arg(long, env = "WORKER_SECRET", hide_env_values = true)]
    worker_secret: Option<String>,

    /// JSON file with the profiles to process
    #[arg(short, long, env = "INPUT_FILE", default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Where to write the results log
    #[arg(short, long, env = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Number of profiles processed concurrently
    #[arg(short = 'w', long, env = "MAX_WORKERS", default_value_t = DEFAULT_MAX_WORKERS)]
    max_workers: usize,

    /// Timeout in seconds for each download and each submission
    #[arg(short, long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Print every step of every profile
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<WorkerConfig> {
        let config = WorkerConfig::builder(self.api_endpoint)
            .worker_secret(self.worker_secret)
            .input_file(self.input)
            .output_file(self.output)
            .max_workers(self.max_workers)
            .timeout_secs(self.timeout)
            .build()?;
        Ok(config)
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    profile_phash_worker::init_tracing(if verbose { "debug" } else { "warn" });

    let term = Term::stderr();
    print_header(&term);

    let config = cli.into_config()?;
    print_config(&term, &config);

    let records = load_profiles(config.input_file())?;
    term.write_line(&format!(
        "{} Loaded {} profiles from {}",
        style("✓").green().bold(),
        records.len(),
        config.input_file().display()
    ))
    .ok();

    let result = if records.is_empty() {
        term.write_line(&format!("{} No profiles to process", style("!").yellow().bold()))
            .ok();
        ResultSet::empty()
    } else {
        let pipeline = Pipeline::from_config(&config)?;
        run_pipeline(&term, &pipeline, &records, verbose)
    };

    print_summary(&term, &result.summary);

    // Output failures are reported but do not fail the run
    match write_results(&result, config.output_file()) {
        Ok(()) => {
            term.write_line(&format!(
                "{} Results saved to {}",
                style("✓").green().bold(),
                config.output_file().display()
            ))
            .ok();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save results");
            term.write_line(&format!(
                "{} Error saving results: {}",
                style("✗").red().bold(),
                e
            ))
            .ok();
        }
    }

    Ok(())
}

fn run_pipeline(
    term: &Term,
    pipeline: &Pipeline,
    records: &[profile_phash_worker::core::ProfileRecord],
    verbose: bool,
) -> ResultSet {
    term.write_line(&format!(
        "\nProcessing {} profiles with {} concurrent workers...",
        style(records.len()).cyan(),
        style(pipeline.workers()).cyan()
    ))
    .ok();

    let (sender, receiver) = EventChannel::new();

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    let progress = pb.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Record(RecordEvent::StepChanged { id, step }) if verbose => {
                    progress.println(format!("  → {} for profile {}...", step, id));
                }
                Event::Record(RecordEvent::Completed(p)) => {
                    progress.set_position(p.completed as u64);
                    progress.println(format_outcome(&p.outcome));
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    progress.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(records, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    result
}

fn format_outcome(outcome: &TaskOutcome) -> String {
    if outcome.status.is_success() {
        format!(
            "  {} Processed profile {} (pHash: {})",
            style("✓").green(),
            outcome.id,
            outcome.hash.as_deref().unwrap_or_default()
        )
    } else {
        format!(
            "  {} {} for profile {}: {}",
            style("✗").red(),
            style(outcome.status).red(),
            outcome.id,
            outcome.error_detail.as_deref().unwrap_or_default()
        )
    }
}

fn print_header(term: &Term) {
    term.write_line(&format!(
        "{} {}",
        style("Profile pHash Worker").bold().cyan(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    ))
    .ok();
    term.write_line("").ok();
}

fn print_config(term: &Term, config: &WorkerConfig) {
    let secret = if config.worker_secret().is_some() {
        "[SET]"
    } else {
        "[NOT SET]"
    };

    term.write_line(&format!("{}", style("Configuration:").bold())).ok();
    term.write_line(&format!("  Input File:    {}", config.input_file().display()))
        .ok();
    term.write_line(&format!("  Output File:   {}", config.output_file().display()))
        .ok();
    term.write_line(&format!("  API Endpoint:  {}", config.api_endpoint())).ok();
    term.write_line(&format!("  Max Workers:   {}", config.max_workers())).ok();
    term.write_line(&format!(
        "  Timeout:       {}s",
        config.request_timeout().as_secs()
    ))
    .ok();
    term.write_line(&format!("  Worker Secret: {}", secret)).ok();
    term.write_line("").ok();
}

fn print_summary(term: &Term, summary: &RunSummary) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} Processing Complete",
        style("✓").green().bold()
    ))
    .ok();
    term.write_line(&format!(
        "  {} succeeded of {} in {:.1}s",
        style(summary.succeeded).green(),
        summary.total,
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} failed of {}",
        style(summary.failed).red(),
        summary.total
    ))
    .ok();

    if summary.failed > 0 {
        term.write_line(&format!(
            "    {} download, {} decode, {} submit",
            summary.fetch_errors, summary.decode_errors, summary.submit_errors
        ))
        .ok();
    }
}

//! # phash-worker CLI
//!
//! Hashes profile images and reports the hashes to the backend API.
//!
//! ## Usage
//! ```bash
//! API_ENDPOINT=https://api.example.com/api/checkImage phash-worker
//! phash-worker --input profiles.json --output results.json --max-workers 8
//! ```
//!
//! Exits non-zero only when the configuration or the input file is
//! unusable. Per-profile failures are recorded in the results file.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("✗ Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

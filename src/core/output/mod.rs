//! # Output Module
//!
//! Writes the result set as pretty-printed JSON.
//!
//! The destination is overwritten. A write failure is reported to the
//! caller but never undoes processing that already happened.

use crate::core::pipeline::ResultSet;
use crate::error::OutputError;
use std::io::Write;
use std::path::Path;

/// Serialize results to any writer
pub fn write_json<W: Write>(results: &ResultSet, writer: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(writer, results)?;
    Ok(())
}

/// Write results to a file, replacing any existing content
pub fn write_results(results: &ResultSet, path: &Path) -> Result<(), OutputError> {
    let to_output_error = |source: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(to_output_error)?;
    let mut writer = std::io::BufWriter::new(file);

    write_json(results, &mut writer)?;
    writeln!(writer).map_err(to_output_error)?;
    writer.flush().map_err(to_output_error)?;

    tracing::info!(path = %path.display(), records = results.summary.total, "Results saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::{TaskFailure, TaskOutcome};
    use crate::error::FetchError;
    use tempfile::TempDir;

    fn create_test_results() -> ResultSet {
        ResultSet::new(
            vec![
                TaskOutcome::success("a", "c3d2e1f000ff7a19", 120),
                TaskOutcome::failure(
                    "b",
                    TaskFailure::Fetch(FetchError::Timeout {
                        url: "https://cdn/b.jpg".to_string(),
                    }),
                    10_000,
                ),
            ],
            10_050,
        )
    }

    #[test]
    fn json_has_results_and_summary() {
        let mut output = Vec::new();
        write_json(&create_test_results(), &mut output).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
        assert_eq!(json["results"][0]["id"], "a");
        assert_eq!(json["results"][1]["status"], "fetch_error");
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["succeeded"], 1);
        assert_eq!(json["summary"]["failed"], 1);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "stale content that is much longer than nothing at all").unwrap();

        write_results(&ResultSet::empty(), &path).unwrap();

        let written: ResultSet =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn unwritable_destination_is_an_output_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("results.json");

        let error = write_results(&create_test_results(), &path).unwrap_err();

        assert!(matches!(error, OutputError::Write { .. }));
        assert!(error.to_string().contains("no-such-dir"));
    }
}

//! Integration tests for the file plumbing around the pipeline:
//! input file in, results file out.

use assert_fs::prelude::*;
use predicates::prelude::*;
use profile_phash_worker::core::input::load_profiles;
use profile_phash_worker::core::output::write_results;
use profile_phash_worker::core::pipeline::{OutcomeStatus, ResultSet, TaskOutcome};
use profile_phash_worker::error::InputError;

#[test]
fn input_file_round_trips_into_results_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("profiles.json");
    input
        .write_str(
            r#"[
                {"id": "a", "profile_image_url": "https://cdn.example.com/a.jpg"},
                {"id": "a", "profile_image_url": "https://cdn.example.com/a2.jpg"}
            ]"#,
        )
        .unwrap();

    let records = load_profiles(input.path()).unwrap();
    assert_eq!(records.len(), 2);

    let outcomes = records
        .iter()
        .map(|r| TaskOutcome::success(r.id.clone(), "c3d2e1f000ff7a19", 1))
        .collect();
    let output = temp.child("results.json");
    write_results(&ResultSet::new(outcomes, 5), output.path()).unwrap();

    output.assert(predicate::path::exists());
    output.assert(predicate::str::contains(r#""status": "success""#));
    output.assert(predicate::str::contains(r#""total": 2"#));

    // Duplicate ids are kept as separate outcomes
    let written: ResultSet =
        serde_json::from_str(&std::fs::read_to_string(output.path()).unwrap()).unwrap();
    assert_eq!(written.results.len(), 2);
    assert!(written
        .results
        .iter()
        .all(|o| o.id == "a" && o.status == OutcomeStatus::Success));
}

#[test]
fn record_without_url_aborts_loading() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("profiles.json");
    input
        .write_str(r#"[{"id": "a", "profile_image_url": "https://x/a.jpg"}, {"id": "b"}]"#)
        .unwrap();

    let result = load_profiles(input.path());
    assert!(matches!(result, Err(InputError::InvalidJson { .. })));
}

#[test]
fn missing_input_file_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    let missing = temp.child("nope.json");

    let error = load_profiles(missing.path()).unwrap_err();
    assert!(matches!(error, InputError::NotFound { .. }));
}

#[test]
fn empty_run_writes_zero_summary() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("results.json");

    write_results(&ResultSet::empty(), output.path()).unwrap();

    output.assert(predicate::str::contains(r#""results": []"#));
    output.assert(predicate::str::contains(r#""failed": 0"#));
}

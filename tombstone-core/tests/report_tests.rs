// Tests for run summary reports

use chrono::Local;
use std::path::PathBuf;
use tombstone_core::extract::ExtractSummary;
use tombstone_core::harvest::{HarvestSummary, StopReason};
use tombstone_core::report::{generate_extract_report, generate_harvest_report};

fn harvest_summary(stop_reason: StopReason) -> HarvestSummary {
    HarvestSummary {
        pages_fetched: 12,
        urls_written: 132,
        manifest_path: PathBuf::from("pitchfork-urls.txt"),
        stop_reason,
        started_at: Local::now(),
    }
}

#[test]
fn test_harvest_report_counts() {
    let report = generate_harvest_report(&harvest_summary(StopReason::Exhausted));

    assert!(report.contains("Pages fetched: 12"));
    assert!(report.contains("URLs written: 132"));
    assert!(report.contains("Manifest: pitchfork-urls.txt"));
    assert!(report.contains("listing exhausted (404)"));
}

#[test]
fn test_harvest_report_transport_stop() {
    let report = generate_harvest_report(&harvest_summary(StopReason::TransportError(
        "connection reset".to_string(),
    )));

    assert!(report.contains("transport error treated as end: connection reset"));
    assert!(!report.contains("listing exhausted"));
}

#[test]
fn test_extract_report_counts() {
    let summary = ExtractSummary {
        urls_in_manifest: 10,
        reviews_written: 9,
        data_path: PathBuf::from("out/pitchfork-data.csv"),
        started_at: Local::now(),
    };

    let report = generate_extract_report(&summary);

    assert!(report.contains("URLs in manifest: 10"));
    assert!(report.contains("Reviews written: 9"));
    assert!(report.contains("Data file: out/pitchfork-data.csv"));
}

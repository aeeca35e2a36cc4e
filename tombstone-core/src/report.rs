use crate::extract::ExtractSummary;
use crate::harvest::{HarvestSummary, StopReason};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

fn format_timestamp(summary_time: &chrono::DateTime<chrono::Local>) -> String {
    summary_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Generate a harvest report from a run summary
pub fn generate_harvest_report(summary: &HarvestSummary) -> String {
    let mut report = String::new();
    report.push_str(RULE);
    report.push('\n');
    report.push_str("# Harvest summary:\n");
    report.push_str(&format!(
        "  Started: {}\n",
        format_timestamp(&summary.started_at)
    ));
    report.push_str(&format!("  Pages fetched: {}\n", summary.pages_fetched));
    report.push_str(&format!("  URLs written: {}\n", summary.urls_written));
    report.push_str(&format!(
        "  Manifest: {}\n",
        summary.manifest_path.display()
    ));

    let stop = match &summary.stop_reason {
        StopReason::Exhausted => "listing exhausted (404)".to_string(),
        StopReason::TransportError(e) => format!("transport error treated as end: {}", e),
    };
    report.push_str(&format!("  Stopped: {}\n", stop));
    report.push('\n');
    report.push_str(RULE);

    report
}

/// Generate an extract report from a run summary
pub fn generate_extract_report(summary: &ExtractSummary) -> String {
    let mut report = String::new();
    report.push_str(RULE);
    report.push('\n');
    report.push_str("# Extract summary:\n");
    report.push_str(&format!(
        "  Started: {}\n",
        format_timestamp(&summary.started_at)
    ));
    report.push_str(&format!(
        "  URLs in manifest: {}\n",
        summary.urls_in_manifest
    ));
    report.push_str(&format!("  Reviews written: {}\n", summary.reviews_written));
    report.push_str(&format!("  Data file: {}\n", summary.data_path.display()));
    report.push('\n');
    report.push_str(RULE);

    report
}

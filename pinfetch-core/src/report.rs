// Run summary rendering for the CLI

use crate::model::DownloadSummary;
use std::path::Path;

/// Generate the end-of-run report shown after a download batch.
pub fn generate_run_report(summary: &DownloadSummary, output_dir: &Path) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  URLs discovered: {}\n", summary.attempted));
    report.push_str(&format!("  Images downloaded: {}\n", summary.downloaded));
    report.push_str(&format!("  Duplicates skipped: {}\n", summary.duplicates));
    report.push_str(&format!("  Failures: {}\n", summary.failed));
    report.push_str(&format!("  Elapsed: {:.1}s\n", summary.elapsed.as_secs_f64()));
    report.push_str(&format!("  Location: {}\n", output_dir.display()));

    if !summary.records.is_empty() {
        report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
        report.push_str("# Files:\n");
        for record in &summary.records {
            let name = record
                .local_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| record.local_path.display().to_string());
            report.push_str(&format!("  {:04} {} {}\n", record.sequence, record.fingerprint, name));
        }
    }

    report
}

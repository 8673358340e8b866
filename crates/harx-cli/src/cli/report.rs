//! Human-readable run summary.

use harx_core::extractor::ExtractReport;
use std::path::Path;

pub fn print_report(report: &ExtractReport, output_root: &Path, quiet: bool) {
    if !quiet {
        if report.created_root {
            println!("Created output directory: {}", output_root.display());
        }
        for file in &report.written {
            println!("Saved: {}", output_root.join(&file.relative_path).display());
        }
    }

    for failure in &report.failures {
        match failure.url.as_deref() {
            Some(url) => eprintln!(
                "Warning: entry {} ({url}) skipped: {}",
                failure.index, failure.reason
            ),
            None => eprintln!("Warning: entry {} skipped: {}", failure.index, failure.reason),
        }
    }

    println!("{}", summary_line(report));
}

pub fn summary_line(report: &ExtractReport) -> String {
    format!(
        "{} written, {} skipped",
        report.written_count(),
        report.skipped_count()
    )
}

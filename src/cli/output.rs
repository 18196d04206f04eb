//! Output formatting for CLI

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ingest::{FileFailure, FileReport, FileSummary};

/// Format one file report the way operators read it on the console
///
/// Failed lines follow the summary line in increasing line order.
pub fn format_report(report: &FileReport) -> String {
    match &report.outcome {
        Ok(summary) => format!(
            "File: {} processed successfully. {} row(s) stored.\n",
            report.file_name, summary.rows_inserted
        ),
        Err(failure) => {
            let mut output = format!(
                "ERROR for file: {}. {}\n",
                report.file_name,
                failure.user_message()
            );
            if let Some(lines) = failure.line_errors() {
                for (line_number, explanation) in lines {
                    output.push_str(&format!(
                        "  Data not saved for Line #{}: {}\n",
                        line_number, explanation
                    ));
                }
            }
            output
        }
    }
}

/// Format all reports of a run, followed by a totals line
pub fn format_reports(reports: &[FileReport]) -> String {
    let mut output: String = reports.iter().map(format_report).collect();
    let failed = reports.iter().filter(|report| !report.is_success()).count();
    output.push_str(&format!(
        "\n{} file(s) processed, {} with errors.\n",
        reports.len(),
        failed
    ));
    output
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportView<'a> {
    file: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a FileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_errors: Option<&'a BTreeMap<usize, String>>,
}

impl<'a> From<&'a FileReport> for ReportView<'a> {
    fn from(report: &'a FileReport) -> Self {
        match &report.outcome {
            Ok(summary) => ReportView {
                file: &report.file_name,
                status: "success",
                message: None,
                summary: Some(summary),
                line_errors: None,
            },
            Err(failure @ FileFailure::Structural(_)) => ReportView {
                file: &report.file_name,
                status: "aborted",
                message: Some(failure.to_string()),
                summary: None,
                line_errors: None,
            },
            Err(FileFailure::InvalidLines {
                message,
                lines,
                summary,
            }) => ReportView {
                file: &report.file_name,
                status: "invalid_lines",
                message: Some(message.clone()),
                summary: Some(summary),
                line_errors: Some(lines),
            },
        }
    }
}

/// Format reports as a JSON array
pub fn format_reports_json(reports: &[FileReport]) -> Result<String, serde_json::Error> {
    let views: Vec<ReportView<'_>> = reports.iter().map(ReportView::from).collect();
    serde_json::to_string_pretty(&views)
}

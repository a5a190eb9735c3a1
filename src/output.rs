//! @ai:module:intent Format timing reports for different formats (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_report, write_report
//! @ai:module:depends_on report
//! @ai:module:stateless true

use crate::error::Result;
use crate::report::{Report, TaskSummary};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a report as a string
/// @ai:effects pure
pub fn format_report(report: &Report, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Text => format_report_text(report),
    }
}

/// @ai:intent Write a formatted report to a file
/// @ai:effects fs:write
pub fn write_report(report: &Report, format: OutputFormat, path: &Path) -> Result<()> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report)?,
        // no ANSI escapes in files
        OutputFormat::Text => {
            colored::control::set_override(false);
            let text = format_report_text(report);
            colored::control::unset_override();
            text
        }
    };
    std::fs::write(path, content)?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}

/// @ai:intent Format a report as human-readable text
/// @ai:effects pure
fn format_report_text(report: &Report) -> String {
    let mut output = String::new();

    if report.tasks.is_empty() {
        output.push_str(&format!("{}\n", "No samples recorded".yellow()));
        return output;
    }

    for summary in &report.tasks {
        output.push_str(&format_summary_text(summary));
        output.push('\n');
    }

    output.push_str(&format!(
        "{} {} tasks, {} samples\n",
        "Summary:".bold(),
        report.tasks.len(),
        report.tasks.iter().map(|t| t.count).sum::<usize>()
    ));

    output
}

fn format_summary_text(summary: &TaskSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({} samples)\n",
        summary.task.cyan().bold(),
        summary.count
    ));
    output.push_str(&format!("  total:  {}\n", seconds(summary.total)));
    output.push_str(&format!("  mean:   {}\n", seconds(summary.mean)));
    output.push_str(&format!("  median: {}\n", seconds(summary.median)));
    output.push_str(&format!(
        "  range:  {} .. {}\n",
        seconds(summary.min),
        seconds(summary.max)
    ));

    match summary.stdev {
        Some(stdev) => output.push_str(&format!("  stdev:  {}\n", seconds(stdev))),
        None => output.push_str(&format!(
            "  stdev:  {}\n",
            "n/a (needs 2 samples)".dimmed()
        )),
    }

    if let Some(ci) = &summary.confidence_interval {
        output.push_str(&format!(
            "  95% CI: [{}, {}] {}\n",
            seconds(ci.lower_bound),
            seconds(ci.upper_bound),
            format!("±{}", seconds(ci.margin_of_error)).dimmed()
        ));
    }

    output
}

/// Render seconds with a unit that keeps a few significant digits.
fn seconds(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1.0 {
        format!("{:.3}s", value)
    } else if magnitude >= 1e-3 {
        format!("{:.3}ms", value * 1e3)
    } else {
        format!("{:.3}µs", value * 1e6)
    }
}

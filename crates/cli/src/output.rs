//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use sortcheck_harness::RunReport;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

/// Print the verification run report.
pub fn print_run_report(report: &RunReport, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(vec!["Fixture", "Checks", "Failed", "Duration", "Result"]);
            for fixture in &report.fixtures {
                let result = if fixture.success() {
                    "PASS".green().to_string()
                } else {
                    "FAIL".red().to_string()
                };
                table.add_row(vec![
                    fixture.fixture.clone(),
                    fixture.checks.len().to_string(),
                    fixture.failed.to_string(),
                    format!("{} ms", fixture.duration_ms),
                    result,
                ]);
            }

            println!("{table}");
            print_summary(report);
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(report).unwrap_or_default()
            );
        }
        OutputFormat::Plain => {
            for fixture in &report.fixtures {
                let marker = if fixture.success() { "PASS" } else { "FAIL" };
                println!(
                    "{}: {} ({} checks, {} failed, {} ms)",
                    marker,
                    fixture.fixture,
                    fixture.checks.len(),
                    fixture.failed,
                    fixture.duration_ms
                );
                for failure in fixture.failures() {
                    println!("  {}", failure);
                }
            }
            print_summary(report);
        }
    }
}

fn print_summary(report: &RunReport) {
    let summary = format!(
        "{} fixture(s): {} passed, {} failed ({} ms)",
        report.total, report.passed, report.failed, report.duration_ms
    );
    if report.success() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

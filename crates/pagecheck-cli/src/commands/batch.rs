use super::{CheckOptions, format_json, runtime};
use crate::OutputFormat;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use pagecheck_core::analysis::{PerformanceChecker, PerformanceReport, ensure_batch_size};
use std::time::Duration;

pub fn execute(urls: &[String], options: &CheckOptions, format: OutputFormat) -> Result<()> {
    ensure_batch_size(urls)?;
    tracing::info!("Checking {} URLs", urls.len());

    let checker = PerformanceChecker::new(&options.performance_config())?;

    let spinner = match format {
        OutputFormat::Pretty => Some(spinner(urls.len())),
        OutputFormat::Json => None,
    };

    let reports = runtime()?.block_on(checker.check_many(urls));

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let output = match format {
        OutputFormat::Json => format_json(&reports)?,
        OutputFormat::Pretty => format_pretty(&reports),
    };
    println!("{}", output);

    Ok(())
}

fn spinner(count: usize) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Checking {} sites...", count));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// One line per site, in input order
pub fn format_pretty(reports: &[PerformanceReport]) -> String {
    use console::style;

    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n\n",
        style(format!("Website Performance Results ({} sites)", reports.len()))
            .bold()
            .cyan()
    ));

    for report in reports {
        let (Some(perf), Some(response)) = (&report.performance, &report.response) else {
            let errors = if report.errors.is_empty() {
                "Unknown error".to_string()
            } else {
                report.errors.join("; ")
            };
            output.push_str(&format!(
                "{} {} - ERROR: {}\n",
                style("[FAIL]").red().bold(),
                report.display_host(),
                errors
            ));
            continue;
        };

        let marker = match response.status_code {
            200 => style("[OK]  ").green(),
            201..=399 => style("[WARN]").yellow(),
            _ => style("[FAIL]").red().bold(),
        };

        output.push_str(&format!(
            "{} {} | TTFB: {} ms | Grade: {} | {}\n",
            marker,
            report.display_host(),
            perf.ttfb_ms,
            perf.grade,
            response.status_code
        ));
    }

    output
}

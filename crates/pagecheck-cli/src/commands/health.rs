use super::{CheckOptions, check_performance, format_json};
use crate::OutputFormat;
use anyhow::Result;
use pagecheck_core::analysis::{HealthStatus, PerformanceReport};

pub fn execute(url: &str, options: &CheckOptions, format: OutputFormat) -> Result<()> {
    tracing::info!("Checking health of {}", url);

    let report = check_performance(url, options)?;

    let output = match format {
        OutputFormat::Json => format_json(&report)?,
        OutputFormat::Pretty => format_pretty(&report),
    };
    println!("{}", output);

    Ok(())
}

pub fn format_pretty(report: &PerformanceReport) -> String {
    use console::style;

    let (Some(perf), Some(response)) = (&report.performance, &report.response) else {
        return format!(
            "{} {} - Health check failed: {}",
            style("[FAIL]").red().bold(),
            report.url,
            report.errors.join("; ")
        );
    };

    let health = HealthStatus::from_status_code(response.status_code);
    let marker = match health {
        HealthStatus::Healthy => style(health.as_str()).green().bold(),
        HealthStatus::Redirect => style(health.as_str()).yellow().bold(),
        HealthStatus::ClientError | HealthStatus::ServerError => style(health.as_str()).red().bold(),
    };

    format!(
        "{} - {}\nStatus: {} {}\nTTFB: {} ms | Total: {} ms | Grade: {}",
        report.display_host(),
        marker,
        response.status_code,
        response.status_text,
        perf.ttfb_ms,
        perf.total_time_ms,
        perf.grade
    )
}

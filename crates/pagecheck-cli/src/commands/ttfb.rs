use super::{CheckOptions, check_performance, format_failure, format_json};
use crate::OutputFormat;
use anyhow::Result;
use pagecheck_core::analysis::PerformanceReport;

pub fn execute(url: &str, options: &CheckOptions, format: OutputFormat) -> Result<()> {
    tracing::info!("Checking TTFB for {}", url);

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
        return format_failure(
            &format!("TTFB check failed for {}", report.url),
            &report.errors,
        );
    };

    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n",
        style(format!("Performance Analysis for {}", report.display_host()))
            .bold()
            .cyan()
    ));

    output.push_str(&format!("\n{}\n", style("Timing Metrics:").bold()));
    output.push_str(&format!("  Time To First Byte: {} ms\n", perf.ttfb_ms));
    output.push_str(&format!("  Total Load Time:    {} ms\n", perf.total_time_ms));
    output.push_str(&format!("  Download Time:      {} ms\n", perf.download_time_ms));
    output.push_str(&format!(
        "  Performance Grade:  {} ({})\n",
        style(perf.grade).bold(),
        perf.grade.label()
    ));

    output.push_str(&format!("\n{}\n", style("Response:").bold()));
    output.push_str(&format!(
        "  Status:       {} {}\n",
        response.status_code, response.status_text
    ));
    output.push_str(&format!("  Content Size: {} KB\n", perf.content_size_kb));
    output.push_str(&format!("  Content Type: {}\n", response.content_type));
    output.push_str(&format!("  Server:       {}\n", response.server));
    output.push_str(&format!("  Redirects:    {}\n", response.redirects));

    output.push_str(&format!("\n{}\n", style("Recommendations:").bold()));
    for rec in &perf.recommendations {
        output.push_str(&format!("  - {}\n", rec));
    }

    output
}

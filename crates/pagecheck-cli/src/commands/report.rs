use super::{CheckOptions, check_performance, format_failure, format_json};
use crate::OutputFormat;
use anyhow::Result;
use pagecheck_core::analysis::PerformanceReport;

/// Caching and delivery headers worth surfacing in the full report
const NOTABLE_HEADERS: &[(&str, &str)] = &[
    ("cache-control", "Cache-Control"),
    ("expires", "Expires"),
    ("last-modified", "Last-Modified"),
    ("etag", "ETag"),
    ("content-encoding", "Content-Encoding"),
    ("x-cache", "X-Cache"),
];

pub fn execute(url: &str, options: &CheckOptions, format: OutputFormat) -> Result<()> {
    tracing::info!("Building performance report for {}", url);

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
            &format!("Performance report failed for {}", report.url),
            &report.errors,
        );
    };

    let check = |ok: bool| {
        if ok {
            style("yes").green()
        } else {
            style("no").red()
        }
    };

    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n",
        style(format!("Performance Report for {}", report.display_host()))
            .bold()
            .cyan()
    ));
    output.push_str(&format!("Generated: {}\n", report.timestamp));

    output.push_str(&format!(
        "\n{} {} ({})\n",
        style("Overall Grade:").bold(),
        style(perf.grade).bold(),
        perf.grade.label()
    ));

    output.push_str(&format!("\n{}\n", style("Timing Breakdown:").bold()));
    output.push_str(&format!("  Time To First Byte: {} ms\n", perf.ttfb_ms));
    output.push_str(&format!("  Content Download:   {} ms\n", perf.download_time_ms));
    output.push_str(&format!("  Total Load Time:    {} ms\n", perf.total_time_ms));

    let compressed = response
        .header("content-encoding")
        .is_some_and(|encoding| encoding.contains("gzip") || encoding.contains("br"));

    output.push_str(&format!("\n{}\n", style("Content:").bold()));
    output.push_str(&format!(
        "  Response Size: {} KB ({} bytes)\n",
        perf.content_size_kb, perf.content_size_bytes
    ));
    output.push_str(&format!("  Content Type:  {}\n", response.content_type));
    output.push_str(&format!(
        "  Compression:   {}\n",
        if compressed { "Yes" } else { "Unknown" }
    ));

    output.push_str(&format!("\n{}\n", style("Server Response:").bold()));
    output.push_str(&format!(
        "  Status Code: {} {}\n",
        response.status_code, response.status_text
    ));
    output.push_str(&format!("  Server:      {}\n", response.server));
    output.push_str(&format!("  Final URL:   {}\n", response.final_url));
    output.push_str(&format!("  Redirects:   {}\n", response.redirects));

    output.push_str(&format!("\n{}\n", style("Response Headers:").bold()));
    for (name, label) in NOTABLE_HEADERS {
        output.push_str(&format!(
            "  {}: {}\n",
            label,
            response.header(name).unwrap_or("Not set")
        ));
    }

    output.push_str(&format!("\n{}\n", style("Recommendations:").bold()));
    for rec in &perf.recommendations {
        output.push_str(&format!("  - {}\n", rec));
    }

    output.push_str(&format!("\n{}\n", style("Benchmarks:").bold()));
    output.push_str(&format!("  TTFB < 200ms (excellent): {}\n", check(perf.ttfb_ms < 200.0)));
    output.push_str(&format!("  TTFB < 500ms (good):      {}\n", check(perf.ttfb_ms < 500.0)));
    output.push_str(&format!("  Total < 2s (fast):        {}\n", check(perf.total_time_ms < 2000.0)));
    output.push_str(&format!("  Total < 3s (acceptable):  {}\n", check(perf.total_time_ms < 3000.0)));

    output
}

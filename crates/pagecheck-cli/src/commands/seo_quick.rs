use super::{CheckOptions, analyze_seo, format_json};
use crate::OutputFormat;
use anyhow::Result;
use pagecheck_core::analysis::SeoReport;

pub fn execute(url: &str, options: &CheckOptions, format: OutputFormat) -> Result<()> {
    tracing::info!("Running quick SEO check for {}", url);

    let report = analyze_seo(url, options)?;

    let output = match format {
        OutputFormat::Json => format_json(&report)?,
        OutputFormat::Pretty => format_pretty(&report),
    };
    println!("{}", output);

    Ok(())
}

pub fn format_pretty(report: &SeoReport) -> String {
    use console::style;

    let Some(findings) = &report.findings else {
        return format!(
            "{} Cannot analyze {}: {}",
            style("[FAIL]").red().bold(),
            report.url,
            report.errors.join("; ")
        );
    };

    let health = match report.seo_score {
        80.. => style("GOOD").green().bold(),
        60..=79 => style("NEEDS WORK").yellow().bold(),
        _ => style("POOR").red().bold(),
    };

    let mark = |ok: bool, label: &str| {
        if ok {
            format!("{} {}", style("[x]").green(), label)
        } else {
            format!("{} {}", style("[ ]").red(), label)
        }
    };

    let checks = [
        mark(findings.title_analysis.score >= 80, "Title tag"),
        mark(findings.meta_analysis.description.score >= 80, "Meta description"),
        mark(findings.header_analysis.count(1) == 1, "H1 structure"),
        mark(findings.content_analysis.word_count >= 300, "Content length"),
        mark(findings.image_analysis.images_without_alt == 0, "Image alt tags"),
        mark(findings.technical_seo.https, "HTTPS"),
    ];

    format!(
        "{} - SEO Health: {} ({}/100)\n\nQuick Checks:\n  {}\n  {}\n\n{} critical issues, {} recommendations",
        report.display_domain(),
        health,
        report.seo_score,
        checks[..3].join(" | "),
        checks[3..].join(" | "),
        report.critical_issues.len(),
        report.recommendations.len()
    )
}

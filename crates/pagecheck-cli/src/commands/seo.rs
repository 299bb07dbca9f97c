use super::{CheckOptions, analyze_seo, format_failure, format_json, truncate};
use crate::OutputFormat;
use anyhow::Result;
use pagecheck_core::analysis::SeoReport;
use pagecheck_core::analysis::seo::ScoreRating;

/// Recommendations listed before the remainder is summarised
const TOP_RECOMMENDATIONS: usize = 5;

pub fn execute(url: &str, options: &CheckOptions, format: OutputFormat) -> Result<()> {
    tracing::info!("Running SEO analysis for {}", url);

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
        return format_failure(
            &format!("SEO analysis failed for {}", report.url),
            &report.errors,
        );
    };

    let status = |ok: bool, bad: &'static str| {
        if ok {
            style("Good").green()
        } else {
            style(bad).yellow()
        }
    };

    let rating = report.rating();
    let rating_style = match rating {
        ScoreRating::Excellent | ScoreRating::Good => style(rating.as_str()).green().bold(),
        ScoreRating::Fair | ScoreRating::NeedsWork => style(rating.as_str()).yellow().bold(),
        ScoreRating::Poor => style(rating.as_str()).red().bold(),
    };

    let title = &findings.title_analysis;
    let description = &findings.meta_analysis.description;
    let headers = &findings.header_analysis;
    let content = &findings.content_analysis;
    let images = &findings.image_analysis;
    let technical = &findings.technical_seo;

    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n",
        style(format!("SEO Analysis for {}", report.display_domain()))
            .bold()
            .cyan()
    ));
    output.push_str(&format!(
        "\n{} {}/100 ({})\n",
        style("Overall SEO Score:").bold(),
        report.seo_score,
        rating_style
    ));

    output.push_str(&format!("\n{}\n", style("Title Tag:").bold()));
    if title.exists {
        output.push_str(&format!("  Content: \"{}\"\n", truncate(&title.content, 80)));
    } else {
        output.push_str("  Content: MISSING\n");
    }
    output.push_str(&format!("  Length:  {} characters\n", title.length));
    output.push_str(&format!(
        "  Status:  {}\n",
        status(title.score >= 80, "Needs improvement")
    ));

    output.push_str(&format!("\n{}\n", style("Meta Description:").bold()));
    if description.exists {
        output.push_str(&format!(
            "  Content: \"{}\"\n",
            truncate(&description.content, 100)
        ));
    } else {
        output.push_str("  Content: MISSING\n");
    }
    output.push_str(&format!("  Length:  {} characters\n", description.length));
    output.push_str(&format!(
        "  Status:  {}\n",
        status(description.score >= 80, "Needs improvement")
    ));

    output.push_str(&format!("\n{}\n", style("Header Structure:").bold()));
    output.push_str(&format!(
        "  H1 Tags: {} {}\n",
        headers.count(1),
        if headers.count(1) == 1 {
            style("[OK]").green()
        } else {
            style("[WARN]").yellow()
        }
    ));
    output.push_str(&format!("  H2 Tags: {}\n", headers.count(2)));
    output.push_str(&format!("  H3 Tags: {}\n", headers.count(3)));

    output.push_str(&format!("\n{}\n", style("Content:").bold()));
    output.push_str(&format!("  Word Count:         {} words\n", content.word_count));
    output.push_str(&format!(
        "  Text-to-HTML Ratio: {}%\n",
        content.text_to_html_ratio
    ));
    output.push_str(&format!(
        "  Status:             {}\n",
        status(content.word_count >= 300, "Thin content")
    ));

    output.push_str(&format!("\n{}\n", style("Images:").bold()));
    output.push_str(&format!("  Total Images:     {}\n", images.total_images));
    output.push_str(&format!(
        "  With Alt Text:    {} ({}%)\n",
        images.images_with_alt,
        images.alt_percentage.unwrap_or(0.0)
    ));
    output.push_str(&format!("  Missing Alt Text: {}\n", images.images_without_alt));

    output.push_str(&format!("\n{}\n", style("Technical SEO:").bold()));
    output.push_str(&format!(
        "  HTTPS:         {}\n",
        if technical.https { style("Yes").green() } else { style("No").red() }
    ));
    output.push_str(&format!("  Load Time:     {} ms\n", technical.load_time_ms));
    output.push_str(&format!("  Page Size:     {} KB\n", technical.page_size_kb));
    output.push_str(&format!(
        "  Schema Markup: {}\n",
        if technical.has_schema_markup { "Yes" } else { "No" }
    ));

    if !report.critical_issues.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            style(format!("Critical Issues ({}):", report.critical_issues.len()))
                .red()
                .bold()
        ));
        for issue in &report.critical_issues {
            output.push_str(&format!("  - {}\n", issue));
        }
    }

    if !report.warnings.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            style(format!("Warnings ({}):", report.warnings.len()))
                .yellow()
                .bold()
        ));
        for warning in &report.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    if !report.recommendations.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            style(format!("Recommendations ({}):", report.recommendations.len())).bold()
        ));
        for rec in report.recommendations.iter().take(TOP_RECOMMENDATIONS) {
            output.push_str(&format!("  - {}\n", rec));
        }
        if report.recommendations.len() > TOP_RECOMMENDATIONS {
            output.push_str(&format!(
                "  ... and {} more recommendations\n",
                report.recommendations.len() - TOP_RECOMMENDATIONS
            ));
        }
    }

    output
}

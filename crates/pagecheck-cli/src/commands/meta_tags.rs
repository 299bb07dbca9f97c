use super::{CheckOptions, analyze_seo, format_failure, format_json, truncate};
use crate::OutputFormat;
use anyhow::Result;
use pagecheck_core::analysis::SeoReport;
use pagecheck_core::analysis::seo::TagGroup;

const OPEN_GRAPH_TAGS: &[&str] = &["title", "description", "image", "url"];
const TWITTER_TAGS: &[&str] = &["card", "title", "description"];

pub fn execute(url: &str, options: &CheckOptions, format: OutputFormat) -> Result<()> {
    tracing::info!("Checking meta tags for {}", url);

    let report = analyze_seo(url, options)?;

    let output = match format {
        OutputFormat::Json => format_json(&report)?,
        OutputFormat::Pretty => format_pretty(&report),
    };
    println!("{}", output);

    Ok(())
}

fn issues_or_none(issues: &[String]) -> String {
    if issues.is_empty() {
        "None".to_string()
    } else {
        issues.join(", ")
    }
}

fn format_tag_group(output: &mut String, heading: &str, prefix: &str, group: &TagGroup, keys: &[&str]) {
    use console::style;

    output.push_str(&format!(
        "\n{}\n",
        style(format!("{} ({} found):", heading, group.tags.len())).bold()
    ));
    for key in keys {
        let value = group.tags.get(*key).filter(|v| !v.is_empty());
        let marker = if value.is_some() {
            style("[x]").green()
        } else {
            style("[ ]").red()
        };
        output.push_str(&format!(
            "  {} {}{}: {}\n",
            marker,
            prefix,
            key,
            value.map(|v| truncate(v, 60)).unwrap_or_else(|| "Missing".to_string())
        ));
    }
}

pub fn format_pretty(report: &SeoReport) -> String {
    use console::style;

    let Some(findings) = &report.findings else {
        return format_failure(
            &format!("Meta tags analysis failed for {}", report.url),
            &report.errors,
        );
    };

    let title = &findings.title_analysis;
    let meta = &findings.meta_analysis;
    let social = &findings.social_media;

    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n",
        style(format!(
            "Meta Tags & Social Media Analysis for {}",
            report.display_domain()
        ))
        .bold()
        .cyan()
    ));

    output.push_str(&format!("\n{}\n", style("Title Tag:").bold()));
    output.push_str(&format!(
        "  Content: \"{}\"\n",
        if title.exists { title.content.as_str() } else { "MISSING" }
    ));
    output.push_str(&format!("  Length:  {} characters (optimal: 30-60)\n", title.length));
    output.push_str(&format!("  Issues:  {}\n", issues_or_none(&title.issues)));

    output.push_str(&format!("\n{}\n", style("Meta Description:").bold()));
    output.push_str(&format!(
        "  Content: \"{}\"\n",
        if meta.description.exists { meta.description.content.as_str() } else { "MISSING" }
    ));
    output.push_str(&format!(
        "  Length:  {} characters (optimal: 120-160)\n",
        meta.description.length
    ));
    output.push_str(&format!("  Issues:  {}\n", issues_or_none(&meta.description.issues)));

    output.push_str(&format!("\n{}\n", style("Meta Robots:").bold()));
    if meta.robots.exists {
        output.push_str("  Status:     Present\n");
        output.push_str(&format!("  Directives: {}\n", meta.robots.directives.join(", ")));
        if !meta.robots.issues.is_empty() {
            output.push_str(&format!("  Issues:     {}\n", meta.robots.issues.join(", ")));
        }
    } else {
        output.push_str("  Status: Not set (default: index,follow)\n");
    }

    output.push_str(&format!("\n{}\n", style("Viewport:").bold()));
    match &meta.viewport.content {
        Some(content) => output.push_str(&format!("  Content: {}\n", content)),
        None => output.push_str("  Status:  Missing\n"),
    }
    if !meta.viewport.issues.is_empty() {
        output.push_str(&format!("  Issues:  {}\n", meta.viewport.issues.join(", ")));
    }

    output.push_str(&format!("\n{}\n", style("Canonical URL:").bold()));
    if meta.canonical.exists {
        output.push_str("  Status: Present\n");
        output.push_str(&format!(
            "  URL:    {}\n",
            meta.canonical.url.as_deref().filter(|u| !u.is_empty()).unwrap_or("Empty")
        ));
        if !meta.canonical.issues.is_empty() {
            output.push_str(&format!("  Issues: {}\n", meta.canonical.issues.join(", ")));
        }
    } else {
        output.push_str("  Status: Missing\n");
    }

    output.push_str(&format!("\n{}\n", style("Meta Keywords:").bold()));
    output.push_str(&format!("  {}\n", meta.keywords.note));

    output.push_str(&format!("\n{}\n", style("Social Media:").bold()));
    output.push_str(&format!("  Open Graph Score:    {}/100\n", social.open_graph.score));
    output.push_str(&format!("  Twitter Cards Score: {}/100\n", social.twitter_cards.score));

    format_tag_group(&mut output, "Open Graph Tags", "og:", &social.open_graph, OPEN_GRAPH_TAGS);
    format_tag_group(&mut output, "Twitter Card Tags", "twitter:", &social.twitter_cards, TWITTER_TAGS);

    output
}

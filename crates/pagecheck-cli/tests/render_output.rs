use pagecheck_cli::commands::{batch, health, meta_tags, report, seo, seo_quick, ttfb};
use pagecheck_core::Error;
use pagecheck_core::FetchError;
use pagecheck_core::analysis::{PerformanceReport, SeoReport};
use pagecheck_core::fetch::{FetchResult, Timings};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap()
}

fn served(url: &str, status: u16, html: &str, ttfb_ms: u64, total_ms: u64) -> FetchResult {
    console::set_colors_enabled(false);

    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), "text/html; charset=utf-8".to_string());
    headers.insert("server".to_string(), "nginx".to_string());
    headers.insert("cache-control".to_string(), "max-age=600".to_string());

    FetchResult {
        url: url.to_string(),
        hostname: Some("example.com".to_string()),
        final_url: url.to_string(),
        redirects: 0,
        status,
        status_text: "OK".to_string(),
        headers,
        body: html.as_bytes().to_vec(),
        text: html.to_string(),
        timings: Timings::from_millis(ttfb_ms, total_ms),
    }
}

#[test]
fn test_ttfb_output_shows_grade_and_recommendation() {
    let fetch = served("https://example.com/", 200, "<html></html>", 120, 480);
    let output = ttfb::format_pretty(&PerformanceReport::from_fetch(&fetch));

    assert!(output.contains("Performance Analysis for example.com"));
    assert!(output.contains("Time To First Byte: 120 ms"));
    assert!(output.contains("A+ (Excellent)"));
    assert!(output.contains("Server:       nginx"));
    assert!(output.contains("Performance looks good!"));
}

#[test]
fn test_health_output_classifies_status() {
    let fetch = served("https://example.com/", 503, "", 900, 1500);
    let output = health::format_pretty(&PerformanceReport::from_fetch(&fetch));

    assert!(output.starts_with("example.com - SERVER ERROR"));
    assert!(output.contains("Status: 503"));
    assert!(output.contains("Grade: C"));
}

#[test]
fn test_health_output_for_failed_check() {
    let failed = PerformanceReport::failed(
        "https://down.example.com",
        &Error::from(FetchError::Timeout(Duration::from_secs(30))),
    );
    let output = health::format_pretty(&failed);
    assert!(output.contains("Health check failed: Request timed out after 30 seconds"));
}

#[test]
fn test_batch_output_keeps_order_and_errors() {
    let ok = PerformanceReport::from_fetch(&served("https://example.com/", 200, "", 100, 300));
    let failed = PerformanceReport::failed(
        "https://refused.example.org",
        &Error::from(FetchError::Network("connection refused".to_string())),
    );

    let output = batch::format_pretty(&[ok, failed]);
    let lines: Vec<&str> = output.lines().filter(|l| l.contains(" | ") || l.contains("ERROR")).collect();

    assert!(output.contains("Website Performance Results (2 sites)"));
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("example.com | TTFB: 100 ms | Grade: A+ | 200"));
    assert!(lines[1].contains("refused.example.org - ERROR: Network error: connection refused"));
}

#[test]
fn test_report_output_lists_headers_and_benchmarks() {
    let fetch = served("https://example.com/", 200, "<html></html>", 350, 2500);
    let output = report::format_pretty(&PerformanceReport::from_fetch(&fetch));

    assert!(output.contains("Overall Grade: B (Good)"));
    assert!(output.contains("Cache-Control: max-age=600"));
    assert!(output.contains("ETag: Not set"));
    assert!(output.contains("TTFB < 500ms (good):      yes"));
    assert!(output.contains("Total < 2s (fast):        no"));
}

#[test]
fn test_seo_output_for_well_formed_page() {
    let fetch = served("https://example.com/guide", 200, &fixture("well_formed.html"), 150, 350);
    let report = SeoReport::from_fetch(&fetch);
    assert!(report.critical_issues.is_empty(), "{:?}", report.critical_issues);

    let output = seo::format_pretty(&report);
    assert!(output.contains("SEO Analysis for example.com"));
    assert!(output.contains("(EXCELLENT)"));
    assert!(output.contains("H1 Tags: 1 [OK]"));
    assert!(output.contains("H2 Tags: 2"));
    assert!(output.contains("Schema Markup: Yes"));
    assert!(!output.contains("Critical Issues"));
}

#[test]
fn test_seo_output_truncates_recommendations() {
    let fetch = served("https://example.com/", 200, &fixture("thin.html"), 400, 4000);
    let report = SeoReport::from_fetch(&fetch);
    assert_eq!(report.recommendations.len(), 6, "{:?}", report.recommendations);

    let output = seo::format_pretty(&report);
    assert!(output.contains("Recommendations (6):"));
    assert!(output.contains("... and 1 more recommendations"));
    assert!(!output.contains("Add Open Graph tags"));
}

#[test]
fn test_seo_output_for_bare_page() {
    let fetch = served("https://example.com/", 200, &fixture("bare.html"), 100, 300);
    let report = SeoReport::from_fetch(&fetch);
    let output = seo::format_pretty(&report);

    assert!(output.contains("Critical Issues (2):"));
    assert!(output.contains("Add a title tag to the page"));
    assert!(output.contains("Warnings (1):"));
    assert!(output.contains("Use only one H1 tag per page"));
    assert!(output.contains("Add alt text to 2 images"));
}

#[test]
fn test_seo_quick_output() {
    let fetch = served("https://example.com/guide", 200, &fixture("well_formed.html"), 150, 350);
    let output = seo_quick::format_pretty(&SeoReport::from_fetch(&fetch));

    assert!(output.starts_with("example.com - SEO Health: GOOD"));
    assert!(output.contains("[x] Title tag | [x] Meta description | [x] H1 structure"));
    assert!(output.contains("[x] Content length | [x] Image alt tags | [x] HTTPS"));
    assert!(output.contains("0 critical issues"));
}

#[test]
fn test_meta_tags_output_for_bare_page() {
    let fetch = served("https://example.com/", 200, &fixture("bare.html"), 100, 300);
    let output = meta_tags::format_pretty(&SeoReport::from_fetch(&fetch));

    assert!(output.contains("Directives: noindex, nofollow"));
    assert!(output.contains("Page is set to NOINDEX"));
    assert!(output.contains("Canonical URL should be absolute"));
    assert!(output.contains("Open Graph Tags (0 found):"));
    assert!(output.contains("[ ] og:title: Missing"));
}

#[test]
fn test_meta_tags_output_lists_social_tags() {
    let fetch = served("https://example.com/guide", 200, &fixture("well_formed.html"), 150, 350);
    let output = meta_tags::format_pretty(&SeoReport::from_fetch(&fetch));

    assert!(output.contains("Open Graph Score:    100/100"));
    assert!(output.contains("Twitter Cards Score: 33/100"));
    assert!(output.contains("[x] og:image: https://example.com/cover.png"));
    assert!(output.contains("[ ] twitter:title: Missing"));
}

#[test]
fn test_failed_seo_report_shows_errors() {
    let failed = SeoReport::failed(
        "https://example.com/missing",
        &Error::NonSuccessStatus {
            code: 404,
            reason: "Not Found".to_string(),
        },
    );
    let output = seo::format_pretty(&failed);
    assert!(output.contains("SEO analysis failed for https://example.com/missing"));
    assert!(output.contains("Cannot access page: 404 Not Found"));
}

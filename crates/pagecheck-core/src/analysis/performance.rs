use super::{CheckStatus, hostname_of, round_to, timestamp};
use crate::config::CheckerConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::fetch::{FetchResult, HttpFetcher, PageFetcher, normalize_url};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Performance grade, best (`A+`) to worst (`F`).
///
/// Variants are declared best-first, so `Ord` sorts better grades lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// First tier whose TTFB and total bounds both hold.
    pub fn from_timings(ttfb_ms: f64, total_ms: f64) -> Self {
        const TIERS: [(Grade, f64, f64); 5] = [
            (Grade::APlus, 200.0, 1000.0),
            (Grade::A, 500.0, 2000.0),
            (Grade::B, 800.0, 3000.0),
            (Grade::C, 1200.0, 5000.0),
            (Grade::D, 2000.0, 8000.0),
        ];

        TIERS
            .iter()
            .find(|(_, max_ttfb, max_total)| ttfb_ms <= *max_ttfb && total_ms <= *max_total)
            .map(|(grade, _, _)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "Excellent",
            Grade::A => "Very Good",
            Grade::B => "Good",
            Grade::C => "Average",
            Grade::D => "Below Average",
            Grade::F => "Poor",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const GOOD_PERFORMANCE: &str = "Performance looks good! Consider monitoring regularly";

/// Improvement advice for the measured timings; never empty.
pub fn recommendations(ttfb_ms: f64, total_ms: f64) -> Vec<String> {
    let mut recs = Vec::new();

    if ttfb_ms > 1000.0 {
        recs.push("High TTFB detected - consider server optimization or CDN".to_string());
    } else if ttfb_ms > 500.0 {
        recs.push("TTFB could be improved with server-side caching".to_string());
    }

    if total_ms > 5000.0 {
        recs.push("Page load time is slow - optimize images and resources".to_string());
    } else if total_ms > 3000.0 {
        recs.push("Consider minifying CSS/JS and enabling compression".to_string());
    }

    if recs.is_empty() {
        recs.push(GOOD_PERFORMANCE.to_string());
    }

    recs
}

/// Coarse health classification of an HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Redirect,
    ClientError,
    ServerError,
}

impl HealthStatus {
    pub fn from_status_code(code: u16) -> Self {
        match code {
            200..=299 => HealthStatus::Healthy,
            300..=399 => HealthStatus::Redirect,
            400..=499 => HealthStatus::ClientError,
            _ => HealthStatus::ServerError,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Redirect => "REDIRECT",
            HealthStatus::ClientError => "CLIENT ERROR",
            HealthStatus::ServerError => "SERVER ERROR",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub ttfb_ms: f64,
    pub total_time_ms: f64,
    pub download_time_ms: f64,
    pub content_size_bytes: usize,
    pub content_size_kb: f64,
    pub grade: Grade,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub status_code: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub content_type: String,
    pub server: String,
    pub final_url: String,
    pub redirects: usize,
}

impl ResponseInfo {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub url: String,
    pub hostname: Option<String>,
    pub timestamp: String,
    pub status: CheckStatus,
    pub performance: Option<PerformanceMetrics>,
    pub response: Option<ResponseInfo>,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl PerformanceReport {
    /// Grade a completed fetch
    pub fn from_fetch(fetch: &FetchResult) -> Self {
        let ttfb = fetch.timings.ttfb_ms();
        let total = fetch.timings.total_ms();
        let size = fetch.content_size();

        let performance = PerformanceMetrics {
            ttfb_ms: round_to(ttfb, 2),
            total_time_ms: round_to(total, 2),
            download_time_ms: round_to(fetch.timings.download_ms(), 2),
            content_size_bytes: size,
            content_size_kb: round_to(size as f64 / 1024.0, 2),
            grade: Grade::from_timings(ttfb, total),
            recommendations: recommendations(ttfb, total),
        };

        let response = ResponseInfo {
            status_code: fetch.status,
            status_text: fetch.status_text.clone(),
            headers: fetch.headers.clone(),
            content_type: fetch.header("content-type").unwrap_or("Unknown").to_string(),
            server: fetch.header("server").unwrap_or("Unknown").to_string(),
            final_url: fetch.final_url.clone(),
            redirects: fetch.redirects,
        };

        Self {
            url: fetch.url.clone(),
            hostname: fetch.hostname.clone(),
            timestamp: timestamp(),
            status: CheckStatus::Success,
            performance: Some(performance),
            response: Some(response),
            errors: vec![],
            error_kind: None,
        }
    }

    /// Error-shaped report for a URL that could not be checked
    pub fn failed(url: &str, error: &Error) -> Self {
        Self {
            url: url.to_string(),
            hostname: hostname_of(url),
            timestamp: timestamp(),
            status: CheckStatus::Error,
            performance: None,
            response: None,
            errors: vec![error.to_string()],
            error_kind: Some(error.kind()),
        }
    }

    pub fn grade(&self) -> Option<Grade> {
        self.performance.as_ref().map(|p| p.grade)
    }

    /// Hostname if known, otherwise the URL as given
    pub fn display_host(&self) -> &str {
        self.hostname.as_deref().unwrap_or(&self.url)
    }
}

/// Fetches pages and grades their load timings
pub struct PerformanceChecker<F = HttpFetcher> {
    fetcher: F,
}

impl PerformanceChecker<HttpFetcher> {
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new(config)?))
    }
}

impl<F: PageFetcher> PerformanceChecker<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Check one URL. Failures are embedded in the report.
    pub async fn check(&self, url: &str) -> PerformanceReport {
        let url = normalize_url(url);
        tracing::debug!("Checking performance of {}", url);

        match self.fetcher.fetch(&url).await {
            Ok(fetch) => {
                let report = PerformanceReport::from_fetch(&fetch);
                if let Some(perf) = &report.performance {
                    tracing::info!(
                        "Performance check complete for {}: grade={} ttfb={:.2}ms total={:.2}ms",
                        url,
                        perf.grade,
                        perf.ttfb_ms,
                        perf.total_time_ms
                    );
                }
                report
            }
            Err(e) => {
                let error = Error::from(e);
                tracing::error!("Performance check failed for {} - {}", url, error);
                PerformanceReport::failed(&url, &error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::Timings;
    use crate::test_utils::fetch_result;
    use async_trait::async_trait;

    #[test]
    fn test_grade_tiers() {
        assert_eq!(Grade::from_timings(150.0, 350.0), Grade::APlus);
        assert_eq!(Grade::from_timings(200.0, 1000.0), Grade::APlus);
        assert_eq!(Grade::from_timings(201.0, 1000.0), Grade::A);
        assert_eq!(Grade::from_timings(800.0, 3000.0), Grade::B);
        assert_eq!(Grade::from_timings(1200.0, 5000.0), Grade::C);
        assert_eq!(Grade::from_timings(2000.0, 8000.0), Grade::D);
        assert_eq!(Grade::from_timings(2000.1, 100.0), Grade::F);
    }

    #[test]
    fn test_grade_requires_both_bounds() {
        // Fast first byte, slow total
        assert_eq!(Grade::from_timings(50.0, 4500.0), Grade::C);
        // Slow first byte with an equally short total
        assert_eq!(Grade::from_timings(900.0, 900.0), Grade::C);
    }

    #[test]
    fn test_grade_is_monotonic() {
        let samples = [
            0.0, 100.0, 200.0, 350.0, 500.0, 650.0, 800.0, 1000.0, 1200.0, 1600.0, 2000.0,
            3000.0, 5000.0, 8000.0, 10000.0,
        ];
        for &fixed in &samples {
            let mut prev_ttfb = Grade::APlus;
            let mut prev_total = Grade::APlus;
            for &varying in &samples {
                let by_ttfb = Grade::from_timings(varying, fixed);
                let by_total = Grade::from_timings(fixed, varying);
                assert!(by_ttfb >= prev_ttfb, "ttfb {} total {}", varying, fixed);
                assert!(by_total >= prev_total, "ttfb {} total {}", fixed, varying);
                prev_ttfb = by_ttfb;
                prev_total = by_total;
            }
        }
    }

    #[test]
    fn test_grade_serializes_symbol() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(Grade::F.to_string(), "F");
    }

    #[test]
    fn test_recommendations_positive_when_fast() {
        assert_eq!(recommendations(100.0, 500.0), vec![GOOD_PERFORMANCE.to_string()]);
    }

    #[test]
    fn test_recommendations_else_if_chains() {
        let recs = recommendations(1500.0, 6000.0);
        assert_eq!(
            recs,
            vec![
                "High TTFB detected - consider server optimization or CDN".to_string(),
                "Page load time is slow - optimize images and resources".to_string(),
            ]
        );

        let recs = recommendations(600.0, 3500.0);
        assert_eq!(
            recs,
            vec![
                "TTFB could be improved with server-side caching".to_string(),
                "Consider minifying CSS/JS and enabling compression".to_string(),
            ]
        );
    }

    #[test]
    fn test_health_status_buckets() {
        assert_eq!(HealthStatus::from_status_code(200), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_status_code(204), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_status_code(301), HealthStatus::Redirect);
        assert_eq!(HealthStatus::from_status_code(404), HealthStatus::ClientError);
        assert_eq!(HealthStatus::from_status_code(503), HealthStatus::ServerError);
        assert_eq!(HealthStatus::ClientError.as_str(), "CLIENT ERROR");
    }

    #[test]
    fn test_report_from_fetch() {
        let body = "x".repeat(2048);
        let fetch = fetch_result("https://example.com", 200, &body, Timings::from_millis(150, 350));
        let report = PerformanceReport::from_fetch(&fetch);

        assert!(report.status.is_success());
        let perf = report.performance.unwrap();
        assert_eq!(perf.grade, Grade::APlus);
        assert_eq!(perf.ttfb_ms, 150.0);
        assert_eq!(perf.download_time_ms, 200.0);
        assert_eq!(perf.content_size_bytes, 2048);
        assert_eq!(perf.content_size_kb, 2.0);

        let response = report.response.unwrap();
        assert_eq!(response.content_type, "text/html");
        assert_eq!(response.server, "Unknown");
        assert_eq!(report.hostname.as_deref(), Some("example.com"));
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> std::result::Result<FetchResult, FetchError> {
            Err(FetchError::Timeout(std::time::Duration::from_secs(30)))
        }
    }

    #[tokio::test]
    async fn test_check_embeds_failure() {
        let checker = PerformanceChecker::with_fetcher(FailingFetcher);
        let report = checker.check("slow.example.com").await;

        assert_eq!(report.status, CheckStatus::Error);
        assert_eq!(report.url, "https://slow.example.com");
        assert_eq!(report.errors, vec!["Request timed out after 30 seconds".to_string()]);
        assert_eq!(report.error_kind, Some(ErrorKind::Timeout));
        assert!(report.performance.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["performance"].is_null());
    }
}

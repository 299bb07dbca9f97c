//! `perf://check/{url}` and `seo://analyze/{url}` lookups.
//!
//! The target URL is embedded in the path with `/` and `:` optionally
//! escaped as `%2F` and `%3A`. Results are returned as JSON values so they
//! can be handed to any consumer without further conversion.

use crate::analysis::{PerformanceChecker, SeoAnalyzer};
use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use std::fmt;

const PERFORMANCE_PREFIX: &str = "perf://check/";
const SEO_PREFIX: &str = "seo://analyze/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRequest {
    Performance(String),
    Seo(String),
}

impl ResourceRequest {
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        let (target, make): (&str, fn(String) -> Self) =
            if let Some(rest) = uri.strip_prefix(PERFORMANCE_PREFIX) {
                (rest, ResourceRequest::Performance)
            } else if let Some(rest) = uri.strip_prefix(SEO_PREFIX) {
                (rest, ResourceRequest::Seo)
            } else {
                return Err(Error::InvalidResource(format!(
                    "{} (expected {}{{url}} or {}{{url}})",
                    uri, PERFORMANCE_PREFIX, SEO_PREFIX
                )));
            };

        let target = unescape(target);
        if target.is_empty() {
            return Err(Error::InvalidResource(format!("{} (missing url)", uri)));
        }

        Ok(make(target))
    }

    /// The embedded target URL, unescaped
    pub fn url(&self) -> &str {
        match self {
            ResourceRequest::Performance(url) | ResourceRequest::Seo(url) => url,
        }
    }

    /// Run the requested check and return its report as JSON
    pub async fn resolve<P, S>(
        &self,
        performance: &PerformanceChecker<P>,
        seo: &SeoAnalyzer<S>,
    ) -> Result<serde_json::Value>
    where
        P: PageFetcher,
        S: PageFetcher,
    {
        tracing::debug!("Resolving resource {}", self);
        let value = match self {
            ResourceRequest::Performance(url) => serde_json::to_value(performance.check(url).await)?,
            ResourceRequest::Seo(url) => serde_json::to_value(seo.analyze(url).await)?,
        };
        Ok(value)
    }
}

impl fmt::Display for ResourceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRequest::Performance(url) => write!(f, "{}{}", PERFORMANCE_PREFIX, url),
            ResourceRequest::Seo(url) => write!(f, "{}{}", SEO_PREFIX, url),
        }
    }
}

/// Only `%2F` and `%3A` are decoded; any other escape is left as is
fn unescape(raw: &str) -> String {
    raw.replace("%2F", "/").replace("%3A", ":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedFetcher;

    #[test]
    fn test_parse_performance_uri() {
        let request = ResourceRequest::parse("perf://check/https%3A%2F%2Fexample.com%2Fdocs").unwrap();
        assert_eq!(
            request,
            ResourceRequest::Performance("https://example.com/docs".to_string())
        );
    }

    #[test]
    fn test_parse_seo_uri_with_plain_host() {
        let request = ResourceRequest::parse("seo://analyze/example.com").unwrap();
        assert_eq!(request, ResourceRequest::Seo("example.com".to_string()));
        assert_eq!(request.url(), "example.com");
    }

    #[test]
    fn test_other_escapes_are_kept() {
        let request = ResourceRequest::parse("perf://check/example.com%2Fsearch%3Fq%3Drust").unwrap();
        assert_eq!(request.url(), "example.com/search%3Fq:rust");
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        let err = ResourceRequest::parse("ftp://check/example.com").unwrap_err();
        assert!(matches!(err, Error::InvalidResource(_)));
        assert!(ResourceRequest::parse("perf://check/").is_err());
    }

    #[tokio::test]
    async fn test_resolve_serializes_report() {
        let performance = PerformanceChecker::with_fetcher(ScriptedFetcher::new("<html></html>"));
        let seo = SeoAnalyzer::with_fetcher(ScriptedFetcher::new(
            "<html><head><title>Hi</title></head><body></body></html>",
        ));

        let perf = ResourceRequest::parse("perf://check/example.com")
            .unwrap()
            .resolve(&performance, &seo)
            .await
            .unwrap();
        assert_eq!(perf["status"], "success");
        assert!(perf["performance"]["grade"].is_string());

        let report = ResourceRequest::parse("seo://analyze/example.com")
            .unwrap()
            .resolve(&performance, &seo)
            .await
            .unwrap();
        assert_eq!(report["title_analysis"]["content"], "Hi");
        assert!(report["page_info"]["language"].is_null());
    }
}

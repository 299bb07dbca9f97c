use super::performance::{PerformanceChecker, PerformanceReport};
use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use futures::FutureExt;
use futures::future::join_all;
use std::panic::AssertUnwindSafe;

/// Largest URL list accepted for one batch
pub const MAX_BATCH_URLS: usize = 10;

/// Reject batches that are empty or larger than [`MAX_BATCH_URLS`]
pub fn ensure_batch_size(urls: &[String]) -> Result<()> {
    if urls.is_empty() {
        return Err(Error::NoUrls);
    }
    if urls.len() > MAX_BATCH_URLS {
        return Err(Error::TooManyUrls {
            max: MAX_BATCH_URLS,
            got: urls.len(),
        });
    }
    Ok(())
}

impl<F: PageFetcher> PerformanceChecker<F> {
    /// Check every URL concurrently.
    ///
    /// The output has one report per input, in input order. A URL that fails
    /// (or whose check panics) yields an error report in its own slot and
    /// leaves the others untouched.
    pub async fn check_many(&self, urls: &[String]) -> Vec<PerformanceReport> {
        if urls.is_empty() {
            return vec![];
        }

        tracing::debug!("Checking {} URLs concurrently", urls.len());

        let checks = urls.iter().map(|url| {
            AssertUnwindSafe(self.check(url))
                .catch_unwind()
                .map(move |outcome| match outcome {
                    Ok(report) => report,
                    Err(_) => {
                        tracing::error!("Performance check panicked for {}", url);
                        PerformanceReport::failed(url, &Error::Aborted("check panicked".to_string()))
                    }
                })
        });

        let reports = join_all(checks).await;

        let failures = reports.iter().filter(|r| !r.status.is_success()).count();
        tracing::info!(
            "Batch check complete: {} URLs, {} failed",
            reports.len(),
            failures
        );

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CheckStatus;
    use crate::test_utils::ScriptedFetcher;
    use std::time::Duration;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_batch_is_empty() {
        let checker = PerformanceChecker::with_fetcher(ScriptedFetcher::new("<html></html>"));
        assert!(checker.check_many(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_batch_isolates_failure_and_keeps_order() {
        // The first URL finishes last, so completion order differs from input order
        let fetcher = ScriptedFetcher::new("<html></html>")
            .with_delay("good.example.com", Duration::from_millis(50))
            .with_delay("timeout.invalid", Duration::from_millis(10));
        let checker = PerformanceChecker::with_fetcher(fetcher);

        let reports = checker
            .check_many(&urls(&[
                "good.example.com",
                "http://timeout.invalid",
                "another.example.com",
            ]))
            .await;

        assert_eq!(reports.len(), 3);

        assert_eq!(reports[0].status, CheckStatus::Success);
        assert_eq!(reports[0].url, "https://good.example.com");
        assert!(reports[0].performance.is_some());

        assert_eq!(reports[1].status, CheckStatus::Error);
        assert_eq!(reports[1].url, "http://timeout.invalid");
        assert_eq!(
            reports[1].errors,
            vec!["Request timed out after 30 seconds".to_string()]
        );

        assert_eq!(reports[2].status, CheckStatus::Success);
        assert_eq!(reports[2].url, "https://another.example.com");
    }

    #[test]
    fn test_batch_size_limits() {
        assert!(matches!(ensure_batch_size(&[]), Err(Error::NoUrls)));

        let ten: Vec<String> = (0..10).map(|i| format!("site{}.example.com", i)).collect();
        assert!(ensure_batch_size(&ten).is_ok());

        let eleven: Vec<String> = (0..11).map(|i| format!("site{}.example.com", i)).collect();
        let err = ensure_batch_size(&eleven).unwrap_err();
        assert!(matches!(err, Error::TooManyUrls { max: 10, got: 11 }));
        assert_eq!(err.to_string(), "Maximum 10 URLs allowed, got 11");
    }
}

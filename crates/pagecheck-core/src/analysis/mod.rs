mod batch;
mod performance;
pub mod seo;

pub use batch::{MAX_BATCH_URLS, ensure_batch_size};
pub use performance::{
    Grade, HealthStatus, PerformanceChecker, PerformanceMetrics, PerformanceReport, ResponseInfo,
    recommendations,
};
pub use seo::{ScoreRating, SeoAnalyzer, SeoFindings, SeoReport};

use serde::{Deserialize, Serialize};
use url::Url;

/// Outcome marker carried by every report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Error,
}

impl CheckStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckStatus::Success)
    }
}

/// Round to a fixed number of decimals for reporting
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub(crate) fn hostname_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

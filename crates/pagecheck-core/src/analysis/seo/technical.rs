use super::{ParsedPage, SignalExtractor, clamp_score};
use crate::analysis::round_to;
use lazy_static::lazy_static;
use scraper::Selector;
use serde::{Deserialize, Serialize};

pub const SLOW_LOAD_MS: f64 = 3000.0;
pub const SLUGGISH_LOAD_MS: f64 = 2000.0;

lazy_static! {
    static ref JSON_LD: Selector =
        Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub https: bool,
    pub load_time_ms: f64,
    pub page_size_kb: f64,
    pub has_schema_markup: bool,
    pub schema_count: usize,
    pub issues: Vec<String>,
}

impl TechnicalAnalysis {
    /// Score used when weighting the overall result
    pub fn weighted_score(&self) -> u32 {
        clamp_score(100 - 20 * self.issues.len() as i32)
    }

    pub fn is_slow(&self) -> bool {
        self.load_time_ms > SLOW_LOAD_MS
    }
}

pub struct TechnicalExtractor;

impl SignalExtractor for TechnicalExtractor {
    type Output = TechnicalAnalysis;

    fn extract(&self, page: &ParsedPage<'_>) -> TechnicalAnalysis {
        let fetch = page.fetch;
        let load_time_ms = round_to(fetch.timings.total_ms(), 2);
        let https = fetch.final_url.starts_with("https://");
        let schema_count = page.document.select(&JSON_LD).count();

        let mut issues = Vec::new();
        if load_time_ms > SLOW_LOAD_MS {
            issues.push("Slow page load time (> 3 seconds)".to_string());
        } else if load_time_ms > SLUGGISH_LOAD_MS {
            issues.push("Page load time could be improved (> 2 seconds)".to_string());
        }
        if !https {
            issues.push("Page is not served over HTTPS".to_string());
        }

        TechnicalAnalysis {
            https,
            load_time_ms,
            page_size_kb: round_to(fetch.content_size() as f64 / 1024.0, 2),
            has_schema_markup: schema_count > 0,
            schema_count,
            issues,
        }
    }
}

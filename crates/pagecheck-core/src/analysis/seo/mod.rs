//! On-page SEO analysis.
//!
//! A page is fetched once, parsed with `scraper`, and handed to a set of
//! independent [`SignalExtractor`]s, one per concern. Their outputs are then
//! weighted into a single score and sorted into critical issues, warnings and
//! recommendations by [`scoring`].

mod content;
mod headers;
mod images;
mod meta;
mod page_info;
mod scoring;
mod social;
mod technical;
mod title;

pub use content::{ContentAnalysis, ContentExtractor};
pub use headers::{HeaderAnalysis, HeaderExtractor, HeaderLevel};
pub use images::{ImageAnalysis, ImageExtractor};
pub use meta::{
    CanonicalAnalysis, DescriptionAnalysis, KeywordsAnalysis, MetaAnalysis, MetaExtractor,
    RobotsAnalysis, ViewportAnalysis,
};
pub use page_info::{PageInfo, PageInfoExtractor};
pub use scoring::{IssueBuckets, ScoreRating, overall_score};
pub use social::{SocialAnalysis, SocialExtractor, TagGroup};
pub use technical::{TechnicalAnalysis, TechnicalExtractor};
pub use title::{TitleAnalysis, TitleExtractor};

use super::{CheckStatus, timestamp};
use crate::config::CheckerConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::fetch::{FetchResult, HttpFetcher, PageFetcher, normalize_url};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use url::Url;

/// A fetched page together with its parsed document
pub struct ParsedPage<'a> {
    pub document: Html,
    pub fetch: &'a FetchResult,
}

impl<'a> ParsedPage<'a> {
    pub fn parse(fetch: &'a FetchResult) -> Self {
        Self {
            document: Html::parse_document(&fetch.text),
            fetch,
        }
    }
}

/// One independent SEO concern. Absence of the inspected tag is a finding,
/// never a failure.
pub trait SignalExtractor {
    type Output;

    fn extract(&self, page: &ParsedPage<'_>) -> Self::Output;
}

/// Concatenated text of an element
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub(crate) fn clamp_score(score: i32) -> u32 {
    score.clamp(0, 100) as u32
}

/// All per-concern results for one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoFindings {
    pub page_info: PageInfo,
    pub title_analysis: TitleAnalysis,
    pub meta_analysis: MetaAnalysis,
    pub header_analysis: HeaderAnalysis,
    pub content_analysis: ContentAnalysis,
    pub image_analysis: ImageAnalysis,
    pub technical_seo: TechnicalAnalysis,
    pub social_media: SocialAnalysis,
}

impl SeoFindings {
    pub fn extract(page: &ParsedPage<'_>) -> Self {
        Self {
            page_info: PageInfoExtractor.extract(page),
            title_analysis: TitleExtractor.extract(page),
            meta_analysis: MetaExtractor.extract(page),
            header_analysis: HeaderExtractor.extract(page),
            content_analysis: ContentExtractor.extract(page),
            image_analysis: ImageExtractor.extract(page),
            technical_seo: TechnicalExtractor.extract(page),
            social_media: SocialExtractor.extract(page),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoReport {
    pub url: String,
    pub domain: Option<String>,
    pub timestamp: String,
    pub status: CheckStatus,
    pub seo_score: u32,
    #[serde(flatten)]
    pub findings: Option<SeoFindings>,
    pub recommendations: Vec<String>,
    pub critical_issues: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl SeoReport {
    /// Score and bucket a completed fetch. The status code is not checked here.
    pub fn from_fetch(fetch: &FetchResult) -> Self {
        let findings = {
            let page = ParsedPage::parse(fetch);
            SeoFindings::extract(&page)
        };
        let buckets = IssueBuckets::from_findings(&findings);

        Self {
            url: fetch.url.clone(),
            domain: domain_of(&fetch.url),
            timestamp: timestamp(),
            status: CheckStatus::Success,
            seo_score: overall_score(&findings),
            findings: Some(findings),
            recommendations: buckets.recommendations,
            critical_issues: buckets.critical_issues,
            warnings: buckets.warnings,
            errors: vec![],
            error_kind: None,
        }
    }

    pub fn failed(url: &str, error: &Error) -> Self {
        Self {
            url: url.to_string(),
            domain: domain_of(url),
            timestamp: timestamp(),
            status: CheckStatus::Error,
            seo_score: 0,
            findings: None,
            recommendations: vec![],
            critical_issues: vec![],
            warnings: vec![],
            errors: vec![error.to_string()],
            error_kind: Some(error.kind()),
        }
    }

    pub fn rating(&self) -> ScoreRating {
        ScoreRating::from_score(self.seo_score)
    }

    pub fn display_domain(&self) -> &str {
        self.domain.as_deref().unwrap_or(&self.url)
    }
}

/// Host plus explicit port, as it appears in the URL
fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Fetches a page and runs every SEO extractor over it
pub struct SeoAnalyzer<F = HttpFetcher> {
    fetcher: F,
}

impl SeoAnalyzer<HttpFetcher> {
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new(config)?))
    }
}

impl<F: PageFetcher> SeoAnalyzer<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Analyze one URL. Failures, including any final status other than
    /// 200, are embedded in the report.
    pub async fn analyze(&self, url: &str) -> SeoReport {
        let url = normalize_url(url);
        tracing::debug!("Analyzing SEO for {}", url);

        match self.fetch_ok(&url).await {
            Ok(fetch) => {
                let report = SeoReport::from_fetch(&fetch);
                tracing::info!(
                    "SEO analysis complete for {}: score={} critical={} warnings={} recommendations={}",
                    url,
                    report.seo_score,
                    report.critical_issues.len(),
                    report.warnings.len(),
                    report.recommendations.len()
                );
                report
            }
            Err(e) => {
                tracing::error!("SEO analysis failed for {} - {}", url, e);
                SeoReport::failed(&url, &e)
            }
        }
    }

    async fn fetch_ok(&self, url: &str) -> Result<FetchResult> {
        let fetch = self.fetcher.fetch(url).await?;
        if fetch.status != 200 {
            return Err(Error::NonSuccessStatus {
                code: fetch.status,
                reason: fetch.status_text.clone(),
            });
        }
        Ok(fetch)
    }
}

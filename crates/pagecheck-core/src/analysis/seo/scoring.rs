use super::SeoFindings;
use super::content::THIN_CONTENT_WORDS;
use super::meta::DESCRIPTION_MIN_LENGTH;
use super::title::{TITLE_MAX_LENGTH, TITLE_MIN_LENGTH};
use serde::{Deserialize, Serialize};
use std::fmt;

const TITLE_WEIGHT: f64 = 0.20;
const DESCRIPTION_WEIGHT: f64 = 0.15;
const HEADERS_WEIGHT: f64 = 0.15;
const CONTENT_WEIGHT: f64 = 0.20;
const IMAGES_WEIGHT: f64 = 0.10;
const TECHNICAL_WEIGHT: f64 = 0.20;

/// Weighted overall score in 0..=100, rounded half to even
pub fn overall_score(findings: &SeoFindings) -> u32 {
    let total = findings.title_analysis.score as f64 * TITLE_WEIGHT
        + findings.meta_analysis.description.score as f64 * DESCRIPTION_WEIGHT
        + findings.header_analysis.score as f64 * HEADERS_WEIGHT
        + findings.content_analysis.score as f64 * CONTENT_WEIGHT
        + findings.image_analysis.score as f64 * IMAGES_WEIGHT
        + findings.technical_seo.weighted_score() as f64 * TECHNICAL_WEIGHT;

    total.clamp(0.0, 100.0).round_ties_even() as u32
}

/// Findings sorted by severity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueBuckets {
    pub critical_issues: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl IssueBuckets {
    pub fn from_findings(findings: &SeoFindings) -> Self {
        let mut buckets = Self::default();

        let title = &findings.title_analysis;
        if !title.exists {
            buckets.critical("Add a title tag to the page");
        } else if title.length < TITLE_MIN_LENGTH {
            buckets.recommend("Expand title tag (aim for 30-60 characters)");
        } else if title.length > TITLE_MAX_LENGTH {
            buckets.warn("Consider shortening title tag to avoid truncation");
        }

        let description = &findings.meta_analysis.description;
        if !description.exists {
            buckets.critical("Add a meta description tag");
        } else if description.length < DESCRIPTION_MIN_LENGTH {
            buckets.recommend("Expand meta description (aim for 120-160 characters)");
        }

        match findings.header_analysis.count(1) {
            0 => buckets.critical("Add an H1 tag to the page"),
            1 => {}
            _ => buckets.warn("Use only one H1 tag per page"),
        }

        if findings.content_analysis.word_count < THIN_CONTENT_WORDS {
            buckets.recommend("Increase content length (aim for 300+ words)");
        }

        let missing_alt = findings.image_analysis.images_without_alt;
        if missing_alt > 0 {
            buckets.recommend(&format!("Add alt text to {} images", missing_alt));
        }

        let technical = &findings.technical_seo;
        if technical.is_slow() {
            buckets.recommend("Improve page load speed");
        }
        if !technical.https {
            buckets.critical("Implement SSL certificate (HTTPS)");
        }

        if !findings.social_media.open_graph.has_essential {
            buckets.recommend("Add Open Graph tags for better social media sharing");
        }

        buckets
    }

    fn critical(&mut self, message: &str) {
        self.critical_issues.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn recommend(&mut self, message: &str) {
        self.recommendations.push(message.to_string());
    }
}

/// Display bucket for an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreRating {
    Excellent,
    Good,
    Fair,
    NeedsWork,
    Poor,
}

impl ScoreRating {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => ScoreRating::Excellent,
            80..=89 => ScoreRating::Good,
            70..=79 => ScoreRating::Fair,
            60..=69 => ScoreRating::NeedsWork,
            _ => ScoreRating::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreRating::Excellent => "EXCELLENT",
            ScoreRating::Good => "GOOD",
            ScoreRating::Fair => "FAIR",
            ScoreRating::NeedsWork => "NEEDS WORK",
            ScoreRating::Poor => "POOR",
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

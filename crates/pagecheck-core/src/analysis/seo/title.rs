use super::{ParsedPage, SignalExtractor, clamp_score, element_text};
use lazy_static::lazy_static;
use scraper::Selector;
use serde::{Deserialize, Serialize};

pub const TITLE_MIN_LENGTH: usize = 30;
pub const TITLE_MAX_LENGTH: usize = 60;

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleAnalysis {
    pub exists: bool,
    pub content: String,
    /// Length in characters
    pub length: usize,
    pub issues: Vec<String>,
    pub score: u32,
}

pub struct TitleExtractor;

impl SignalExtractor for TitleExtractor {
    type Output = TitleAnalysis;

    fn extract(&self, page: &ParsedPage<'_>) -> TitleAnalysis {
        let Some(element) = page.document.select(&TITLE).next() else {
            return TitleAnalysis {
                exists: false,
                content: String::new(),
                length: 0,
                issues: vec!["Missing title tag".to_string()],
                score: 0,
            };
        };

        let text = element_text(element).trim().to_string();
        let length = text.chars().count();
        let mut issues = Vec::new();
        let mut score = 100;

        if length == 0 {
            issues.push("Title tag is empty".to_string());
            score -= 50;
        } else if length < TITLE_MIN_LENGTH {
            issues.push("Title is too short (< 30 characters)".to_string());
            score -= 20;
        } else if length > TITLE_MAX_LENGTH {
            issues.push("Title may be truncated in search results (> 60 characters)".to_string());
            score -= 10;
        }

        if text.matches('|').count() > 2 {
            issues.push("Too many separators in title".to_string());
            score -= 5;
        }

        if length > 10 && text.to_uppercase() == text {
            issues.push("Title is in ALL CAPS".to_string());
            score -= 10;
        }

        TitleAnalysis {
            exists: true,
            content: text,
            length,
            issues,
            score: clamp_score(score),
        }
    }
}

use super::{ParsedPage, SignalExtractor, clamp_score, element_text};
use lazy_static::lazy_static;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Samples kept per header level
const MAX_SAMPLES: usize = 5;
/// Characters kept per sample
const SAMPLE_LENGTH: usize = 100;

lazy_static! {
    static ref LEVELS: Vec<Selector> = (1..=6)
        .map(|level| Selector::parse(&format!("h{}", level)).unwrap())
        .collect();
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderLevel {
    pub count: usize,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderAnalysis {
    /// Keyed `h1` through `h6`
    #[serde(rename = "structure")]
    pub headers: BTreeMap<String, HeaderLevel>,
    pub issues: Vec<String>,
    pub score: u32,
}

impl HeaderAnalysis {
    pub fn count(&self, level: u8) -> usize {
        self.headers
            .get(&format!("h{}", level))
            .map(|h| h.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.headers.values().map(|h| h.count).sum()
    }
}

pub struct HeaderExtractor;

impl SignalExtractor for HeaderExtractor {
    type Output = HeaderAnalysis;

    fn extract(&self, page: &ParsedPage<'_>) -> HeaderAnalysis {
        let headers: BTreeMap<String, HeaderLevel> = LEVELS
            .iter()
            .enumerate()
            .map(|(i, selector)| {
                let texts: Vec<String> = page
                    .document
                    .select(selector)
                    .map(|element| element_text(element).trim().to_string())
                    .collect();
                let level = HeaderLevel {
                    count: texts.len(),
                    content: texts
                        .into_iter()
                        .take(MAX_SAMPLES)
                        .map(|t| t.chars().take(SAMPLE_LENGTH).collect())
                        .collect(),
                };
                (format!("h{}", i + 1), level)
            })
            .collect();

        let mut analysis = HeaderAnalysis {
            headers,
            issues: vec![],
            score: 0,
        };

        let h1 = analysis.count(1);
        if h1 == 0 {
            analysis.issues.push("Missing H1 tag".to_string());
        } else if h1 > 1 {
            analysis
                .issues
                .push(format!("Multiple H1 tags found ({}) - should have only one", h1));
        }

        if analysis.total() == 0 {
            analysis.issues.push("No header tags found".to_string());
        }

        analysis.score = clamp_score(100 - 15 * analysis.issues.len() as i32);
        analysis
    }
}

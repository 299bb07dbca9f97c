use super::{ParsedPage, SignalExtractor, clamp_score};
use crate::analysis::round_to;
use scraper::Html;
use serde::{Deserialize, Serialize};

pub const THIN_CONTENT_WORDS: usize = 300;
pub const VERY_THIN_CONTENT_WORDS: usize = 150;
pub const MIN_TEXT_RATIO: f64 = 15.0;

/// Elements whose text never renders
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub character_count: usize,
    /// Visible text as a percentage of the raw HTML
    pub text_to_html_ratio: f64,
    pub issues: Vec<String>,
    pub score: u32,
}

pub struct ContentExtractor;

impl SignalExtractor for ContentExtractor {
    type Output = ContentAnalysis;

    fn extract(&self, page: &ParsedPage<'_>) -> ContentAnalysis {
        let text = visible_text(&page.document);
        let word_count = text.split_whitespace().count();
        let character_count = text.chars().count();
        let html_chars = page.fetch.text.chars().count();

        let mut issues = Vec::new();
        let mut score = 100;

        if word_count < VERY_THIN_CONTENT_WORDS {
            issues.push("Very thin content (< 150 words)".to_string());
            score -= 40;
        } else if word_count < THIN_CONTENT_WORDS {
            issues.push("Content is thin (< 300 words)".to_string());
            score -= 25;
        }

        let ratio = if html_chars == 0 {
            0.0
        } else {
            character_count as f64 / html_chars as f64 * 100.0
        };
        if ratio < MIN_TEXT_RATIO {
            issues.push("Low text-to-HTML ratio (< 15%)".to_string());
            score -= 15;
        }

        ContentAnalysis {
            word_count,
            character_count,
            text_to_html_ratio: round_to(ratio, 1),
            issues,
            score: clamp_score(score),
        }
    }
}

/// All text nodes that are not inside a non-rendering element
pub fn visible_text(document: &Html) -> String {
    let mut text = String::new();
    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| INVISIBLE.contains(&element.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::seo::tests::{page_for, words};

    fn analyze(html: &str) -> ContentAnalysis {
        let fetch = page_for(html);
        ContentExtractor.extract(&ParsedPage::parse(&fetch))
    }

    fn body(text: &str) -> String {
        format!("<html><body><p>{}</p></body></html>", text)
    }

    #[test]
    fn test_scripts_and_styles_are_not_content() {
        let html = "<html><head><style>p { color: red }</style></head>\
                    <body><p>one two</p><script>var x = 1;</script>\
                    <noscript>enable js</noscript><p>three</p></body></html>";
        let fetch = page_for(html);
        let page = ParsedPage::parse(&fetch);
        let text = visible_text(&page.document);

        assert!(!text.contains("color"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("enable"));
        assert_eq!(text.split_whitespace().count(), 3);
    }

    #[test]
    fn test_very_thin_content_takes_precedence() {
        let analysis = analyze(&body(&words(100)));
        assert_eq!(analysis.word_count, 100);
        assert!(analysis.issues.contains(&"Very thin content (< 150 words)".to_string()));
        assert!(!analysis.issues.iter().any(|i| i.starts_with("Content is thin")));
    }

    #[test]
    fn test_thin_content() {
        let analysis = analyze(&body(&words(200)));
        assert_eq!(analysis.issues, vec!["Content is thin (< 300 words)".to_string()]);
        assert_eq!(analysis.score, 75);
    }

    #[test]
    fn test_word_boundaries() {
        let at_150 = analyze(&body(&words(150)));
        assert!(at_150.issues.iter().any(|i| i.starts_with("Content is thin")));

        let at_300 = analyze(&body(&words(300)));
        assert!(at_300.issues.is_empty());
        assert_eq!(at_300.score, 100);
    }

    #[test]
    fn test_low_text_ratio() {
        let padding = format!("<div class=\"{}\"></div>", "x".repeat(20000));
        let html = format!("<html><body>{}<p>{}</p></body></html>", padding, words(300));
        let analysis = analyze(&html);

        assert!(analysis.text_to_html_ratio < 15.0);
        assert_eq!(analysis.issues, vec!["Low text-to-HTML ratio (< 15%)".to_string()]);
        assert_eq!(analysis.score, 85);
    }

    #[test]
    fn test_empty_document_is_floored() {
        let analysis = analyze("");
        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.text_to_html_ratio, 0.0);
        assert_eq!(analysis.score, 45);
    }
}

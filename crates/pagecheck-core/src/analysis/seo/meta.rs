use super::{ParsedPage, SignalExtractor, clamp_score};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

pub const DESCRIPTION_MIN_LENGTH: usize = 120;
pub const DESCRIPTION_MAX_LENGTH: usize = 160;

lazy_static! {
    static ref DESCRIPTION_BY_NAME: Selector =
        Selector::parse(r#"meta[name="description"]"#).unwrap();
    static ref DESCRIPTION_BY_PROPERTY: Selector =
        Selector::parse(r#"meta[property="description"]"#).unwrap();
    static ref KEYWORDS: Selector = Selector::parse(r#"meta[name="keywords"]"#).unwrap();
    static ref ROBOTS: Selector = Selector::parse(r#"meta[name="robots"]"#).unwrap();
    static ref VIEWPORT: Selector = Selector::parse(r#"meta[name="viewport"]"#).unwrap();
    static ref CANONICAL: Selector = Selector::parse(r#"link[rel~="canonical"]"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaAnalysis {
    pub description: DescriptionAnalysis,
    pub keywords: KeywordsAnalysis,
    pub robots: RobotsAnalysis,
    pub viewport: ViewportAnalysis,
    pub canonical: CanonicalAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionAnalysis {
    pub exists: bool,
    pub content: String,
    pub length: usize,
    pub issues: Vec<String>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordsAnalysis {
    pub exists: bool,
    pub content: Option<String>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotsAnalysis {
    pub exists: bool,
    pub directives: Vec<String>,
    pub issues: Vec<String>,
}

impl RobotsAnalysis {
    pub fn has(&self, directive: &str) -> bool {
        self.directives.iter().any(|d| d == directive)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportAnalysis {
    pub exists: bool,
    pub content: Option<String>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAnalysis {
    pub exists: bool,
    pub url: Option<String>,
    pub issues: Vec<String>,
}

/// Description, keywords, robots, viewport and canonical tags
pub struct MetaExtractor;

impl SignalExtractor for MetaExtractor {
    type Output = MetaAnalysis;

    fn extract(&self, page: &ParsedPage<'_>) -> MetaAnalysis {
        let document = &page.document;
        MetaAnalysis {
            description: analyze_description(document),
            keywords: analyze_keywords(document),
            robots: analyze_robots(document),
            viewport: analyze_viewport(document),
            canonical: analyze_canonical(document),
        }
    }
}

fn first_attr<'a>(document: &'a Html, selector: &Selector, attr: &str) -> Option<Option<&'a str>> {
    document
        .select(selector)
        .next()
        .map(|element| element.value().attr(attr))
}

fn analyze_description(document: &Html) -> DescriptionAnalysis {
    // The property form is only consulted when no name form exists at all
    let tag = first_attr(document, &DESCRIPTION_BY_NAME, "content")
        .or_else(|| first_attr(document, &DESCRIPTION_BY_PROPERTY, "content"));

    let content = match tag {
        Some(Some(content)) if !content.is_empty() => content,
        _ => {
            return DescriptionAnalysis {
                exists: false,
                content: String::new(),
                length: 0,
                issues: vec!["Missing meta description".to_string()],
                score: 0,
            };
        }
    };

    let text = content.trim().to_string();
    let length = text.chars().count();
    let mut issues = Vec::new();
    let mut score = 100;

    if length == 0 {
        issues.push("Meta description is empty".to_string());
        score -= 50;
    } else if length < DESCRIPTION_MIN_LENGTH {
        issues.push("Meta description is too short (< 120 characters)".to_string());
        score -= 15;
    } else if length > DESCRIPTION_MAX_LENGTH {
        issues.push("Meta description may be truncated (> 160 characters)".to_string());
        score -= 10;
    }

    DescriptionAnalysis {
        exists: true,
        content: text,
        length,
        issues,
        score: clamp_score(score),
    }
}

fn analyze_keywords(document: &Html) -> KeywordsAnalysis {
    match first_attr(document, &KEYWORDS, "content") {
        None => KeywordsAnalysis {
            exists: false,
            content: None,
            note: "Meta keywords not used (good - they're obsolete)".to_string(),
        },
        Some(content) => KeywordsAnalysis {
            exists: true,
            content: Some(content.unwrap_or("").trim().to_string()),
            note: "Meta keywords are obsolete and ignored by search engines".to_string(),
        },
    }
}

/// Lower-cased, comma-separated directive tokens
pub fn parse_robots_directives(content: &str) -> Vec<String> {
    content
        .to_lowercase()
        .split(',')
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect()
}

fn analyze_robots(document: &Html) -> RobotsAnalysis {
    let Some(content) = first_attr(document, &ROBOTS, "content") else {
        return RobotsAnalysis {
            exists: false,
            directives: vec![],
            issues: vec![],
        };
    };

    let directives = parse_robots_directives(content.unwrap_or(""));
    let mut issues = Vec::new();

    if directives.iter().any(|d| d == "noindex") {
        issues.push("Page is set to NOINDEX - won't appear in search results".to_string());
    }
    if directives.iter().any(|d| d == "nofollow") {
        issues.push("Page is set to NOFOLLOW - links won't be followed".to_string());
    }

    RobotsAnalysis {
        exists: true,
        directives,
        issues,
    }
}

fn analyze_viewport(document: &Html) -> ViewportAnalysis {
    let Some(content) = first_attr(document, &VIEWPORT, "content") else {
        return ViewportAnalysis {
            exists: false,
            content: None,
            issues: vec!["Missing viewport meta tag - may not be mobile-friendly".to_string()],
        };
    };

    let content = content.unwrap_or("").to_string();
    let mut issues = Vec::new();
    if !content.contains("width=") {
        issues.push("Viewport should specify width".to_string());
    }
    if !content.contains("initial-scale=") {
        issues.push("Viewport should specify initial-scale".to_string());
    }

    ViewportAnalysis {
        exists: true,
        content: Some(content),
        issues,
    }
}

fn analyze_canonical(document: &Html) -> CanonicalAnalysis {
    let Some(href) = first_attr(document, &CANONICAL, "href") else {
        return CanonicalAnalysis {
            exists: false,
            url: None,
            issues: vec!["Missing canonical URL - may cause duplicate content issues".to_string()],
        };
    };

    let href = href.unwrap_or("").to_string();
    let mut issues = Vec::new();
    if href.is_empty() {
        issues.push("Canonical tag exists but has no href".to_string());
    } else if !(href.starts_with("http://") || href.starts_with("https://")) {
        issues.push("Canonical URL should be absolute".to_string());
    }

    CanonicalAnalysis {
        exists: true,
        url: Some(href),
        issues,
    }
}

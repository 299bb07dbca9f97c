use super::{ParsedPage, SignalExtractor};
use lazy_static::lazy_static;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const OPEN_GRAPH_ESSENTIALS: &[&str] = &["title", "description", "image", "url"];
const TWITTER_ESSENTIALS: &[&str] = &["card", "title", "description"];

lazy_static! {
    static ref OPEN_GRAPH: Selector = Selector::parse(r#"meta[property^="og:"]"#).unwrap();
    static ref TWITTER: Selector = Selector::parse(r#"meta[name^="twitter:"]"#).unwrap();
}

/// One family of social tags with the prefix stripped from each key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
    pub tags: BTreeMap<String, String>,
    pub score: u32,
    pub has_essential: bool,
}

impl TagGroup {
    fn present(&self, essentials: &[&str]) -> u32 {
        essentials
            .iter()
            .filter(|key| self.tags.get(**key).is_some_and(|v| !v.is_empty()))
            .count() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAnalysis {
    pub open_graph: TagGroup,
    pub twitter_cards: TagGroup,
}

pub struct SocialExtractor;

impl SignalExtractor for SocialExtractor {
    type Output = SocialAnalysis;

    fn extract(&self, page: &ParsedPage<'_>) -> SocialAnalysis {
        let mut open_graph = TagGroup {
            tags: collect(page, &OPEN_GRAPH, "property", "og:"),
            ..Default::default()
        };
        open_graph.score = 25 * open_graph.present(OPEN_GRAPH_ESSENTIALS);
        open_graph.has_essential = open_graph.score == 100;

        let mut twitter_cards = TagGroup {
            tags: collect(page, &TWITTER, "name", "twitter:"),
            ..Default::default()
        };
        let raw = 33 * twitter_cards.present(TWITTER_ESSENTIALS);
        twitter_cards.score = raw.min(100);
        twitter_cards.has_essential = raw >= 100;

        SocialAnalysis {
            open_graph,
            twitter_cards,
        }
    }
}

/// Later tags with the same key replace earlier ones
fn collect(
    page: &ParsedPage<'_>,
    selector: &Selector,
    attr: &str,
    prefix: &str,
) -> BTreeMap<String, String> {
    page.document
        .select(selector)
        .filter_map(|meta| {
            let key = meta.value().attr(attr)?.strip_prefix(prefix)?;
            let content = meta.value().attr("content").unwrap_or("");
            Some((key.to_string(), content.to_string()))
        })
        .collect()
}

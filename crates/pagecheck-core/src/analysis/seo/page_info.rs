use super::{ParsedPage, SignalExtractor};
use crate::analysis::round_to;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref HTML_LANG: Selector = Selector::parse("html[lang]").unwrap();
    static ref META_CHARSET: Selector = Selector::parse("meta[charset]").unwrap();
    static ref META_HTTP_EQUIV: Selector = Selector::parse("meta[http-equiv]").unwrap();
    static ref CHARSET_PARAM: Regex = Regex::new(r"charset=([^;]+)").unwrap();
}

/// Basic facts about the fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub status_code: u16,
    pub final_url: String,
    pub load_time_ms: f64,
    pub page_size_kb: f64,
    pub has_doctype: bool,
    pub language: Option<String>,
    pub charset: Option<String>,
}

pub struct PageInfoExtractor;

impl SignalExtractor for PageInfoExtractor {
    type Output = PageInfo;

    fn extract(&self, page: &ParsedPage<'_>) -> PageInfo {
        let fetch = page.fetch;
        PageInfo {
            status_code: fetch.status,
            final_url: fetch.final_url.clone(),
            load_time_ms: round_to(fetch.timings.total_ms(), 2),
            page_size_kb: round_to(fetch.content_size() as f64 / 1024.0, 2),
            has_doctype: has_doctype(&fetch.text),
            language: page
                .document
                .select(&HTML_LANG)
                .next()
                .and_then(|html| html.value().attr("lang"))
                .map(str::to_string),
            charset: charset(&page.document),
        }
    }
}

fn has_doctype(raw: &str) -> bool {
    raw.trim_start()
        .get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!doctype"))
}

fn charset(document: &Html) -> Option<String> {
    if let Some(meta) = document.select(&META_CHARSET).next() {
        return meta.value().attr("charset").map(str::to_string);
    }

    let content = document
        .select(&META_HTTP_EQUIV)
        .find(|meta| {
            meta.value()
                .attr("http-equiv")
                .is_some_and(|v| v.eq_ignore_ascii_case("content-type"))
        })?
        .value()
        .attr("content")?;

    CHARSET_PARAM
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
}

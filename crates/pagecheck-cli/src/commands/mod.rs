pub mod batch;
pub mod completion;
pub mod health;
pub mod meta_tags;
pub mod report;
pub mod resource;
pub mod seo;
pub mod seo_quick;
pub mod ttfb;

use anyhow::Result;
use pagecheck_core::CheckerConfig;
use pagecheck_core::analysis::{PerformanceChecker, PerformanceReport, SeoAnalyzer, SeoReport};
use serde::Serialize;
use std::time::Duration;

/// Checker settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub perf_timeout: u64,
    pub seo_timeout: u64,
    pub user_agent: Option<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            perf_timeout: pagecheck_core::config::PERFORMANCE_TIMEOUT_SECS,
            seo_timeout: pagecheck_core::config::SEO_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl CheckOptions {
    pub fn performance_config(&self) -> CheckerConfig {
        self.apply(CheckerConfig::performance(), self.perf_timeout)
    }

    pub fn seo_config(&self) -> CheckerConfig {
        self.apply(CheckerConfig::seo(), self.seo_timeout)
    }

    fn apply(&self, config: CheckerConfig, timeout_secs: u64) -> CheckerConfig {
        let config = config.with_timeout(Duration::from_secs(timeout_secs));
        match &self.user_agent {
            Some(agent) => config.with_user_agent(agent.clone()),
            None => config,
        }
    }
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Run a single performance check on a fresh runtime
pub(crate) fn check_performance(url: &str, options: &CheckOptions) -> Result<PerformanceReport> {
    let checker = PerformanceChecker::new(&options.performance_config())?;
    Ok(runtime()?.block_on(checker.check(url)))
}

/// Run a single SEO analysis on a fresh runtime
pub(crate) fn analyze_seo(url: &str, options: &CheckOptions) -> Result<SeoReport> {
    let analyzer = SeoAnalyzer::new(&options.seo_config())?;
    Ok(runtime()?.block_on(analyzer.analyze(url)))
}

pub(crate) fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Truncate to `max` characters, marking the cut with `...`
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Pretty rendering of a failed check, shared by every command
pub(crate) fn format_failure(heading: &str, errors: &[String]) -> String {
    use console::style;

    let mut output = String::new();
    output.push_str(&format!("\n{}\n", style(heading).bold().red()));
    output.push_str(&format!("\n{}\n", style("Errors:").bold()));
    for error in errors {
        output.push_str(&format!("  {}\n", error));
    }
    output
}

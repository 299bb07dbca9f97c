use std::time::Duration;

pub const PERFORMANCE_TIMEOUT_SECS: u64 = 30;
pub const SEO_TIMEOUT_SECS: u64 = 20;

pub const PERFORMANCE_USER_AGENT: &str = "Mozilla/5.0 (Performance Checker)";
pub const SEO_USER_AGENT: &str = "Mozilla/5.0 (SEO Checker; +https://example.com/seo-bot)";

/// Settings for one checker instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl CheckerConfig {
    /// Defaults used by the performance checker
    pub fn performance() -> Self {
        Self {
            timeout: Duration::from_secs(PERFORMANCE_TIMEOUT_SECS),
            user_agent: PERFORMANCE_USER_AGENT.to_string(),
        }
    }

    /// Defaults used by the SEO analyzer
    pub fn seo() -> Self {
        Self {
            timeout: Duration::from_secs(SEO_TIMEOUT_SECS),
            user_agent: SEO_USER_AGENT.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::performance()
    }
}

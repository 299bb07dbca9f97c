use crate::config::CheckerConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, LOCATION};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use url::Url;

/// Redirect hops followed before the exchange is abandoned
pub const MAX_REDIRECTS: usize = 10;

/// Prefix `https://` when the URL carries no http(s) scheme
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Wall-clock marks of one exchange, relative to the moment the request was sent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    ttfb: Duration,
    total: Duration,
}

impl Timings {
    /// `total` is raised to `ttfb` if it is smaller, so download time is never negative.
    pub fn new(ttfb: Duration, total: Duration) -> Self {
        Self {
            ttfb,
            total: total.max(ttfb),
        }
    }

    pub fn from_millis(ttfb_ms: u64, total_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(ttfb_ms),
            Duration::from_millis(total_ms),
        )
    }

    pub fn ttfb_ms(&self) -> f64 {
        self.ttfb.as_secs_f64() * 1000.0
    }

    pub fn total_ms(&self) -> f64 {
        self.total.as_secs_f64() * 1000.0
    }

    pub fn download_ms(&self) -> f64 {
        self.total_ms() - self.ttfb_ms()
    }
}

/// Snapshot of one completed HTTP exchange
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Requested URL after scheme normalization
    pub url: String,
    pub hostname: Option<String>,
    pub final_url: String,
    pub redirects: usize,
    pub status: u16,
    pub status_text: String,
    /// Lower-cased header names; repeated headers keep the last value
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub text: String,
    pub timings: Timings,
}

impl FetchResult {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn content_size(&self) -> usize {
        self.body.len()
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError>;
}

/// `reqwest`-backed fetcher that times a single GET
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &CheckerConfig) -> Result<Self, FetchError> {
        // Redirects are followed by hand so that they can be counted and
        // fall under the same overall deadline.
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::Unknown(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    async fn exchange(&self, url: &str) -> Result<FetchResult, FetchError> {
        let requested = Url::parse(url)
            .map_err(|e| FetchError::Unknown(format!("Invalid URL {}: {}", url, e)))?;

        let mut current = requested.clone();
        let mut redirects = 0;

        let started = Instant::now();
        let response = loop {
            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(classify)?;

            if response.status().is_redirection()
                && let Some(next) = redirect_target(&current, response.headers())
            {
                if redirects >= MAX_REDIRECTS {
                    return Err(FetchError::Network(format!(
                        "Exceeded {} redirects",
                        MAX_REDIRECTS
                    )));
                }
                tracing::debug!("Following redirect {} -> {}", current, next);
                current = next;
                redirects += 1;
                continue;
            }

            break response;
        };
        let ttfb = started.elapsed();

        let status = response.status();
        let final_url = response.url().to_string();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await.map_err(classify)?.to_vec();
        let total = started.elapsed();

        let text = String::from_utf8_lossy(&body).into_owned();

        Ok(FetchResult {
            url: url.to_string(),
            hostname: requested.host_str().map(str::to_string),
            final_url,
            redirects,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
            text,
            timings: Timings::new(ttfb, total),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let url = normalize_url(url);
        tracing::debug!("Fetching {} (timeout {:?})", url, self.timeout);

        match tokio::time::timeout(self.timeout, self.exchange(&url)).await {
            Ok(Ok(result)) => {
                tracing::debug!(
                    "Fetched {}: status={} ttfb={:.2}ms total={:.2}ms",
                    url,
                    result.status,
                    result.timings.ttfb_ms(),
                    result.timings.total_ms()
                );
                Ok(result)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }
}

fn redirect_target(current: &Url, headers: &HeaderMap) -> Option<Url> {
    let location = headers.get(LOCATION)?.to_str().ok()?;
    current.join(location).ok()
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for (name, value) in headers {
        collected.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    collected
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        return FetchError::Unknown(describe(&err));
    }
    FetchError::Network(describe(&err))
}

/// Flatten an error and its sources into one line
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

use crate::analysis::hostname_of;
use crate::error::FetchError;
use crate::fetch::{FetchResult, PageFetcher, Timings};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// Build a fetch result without touching the network
pub fn fetch_result(url: &str, status: u16, body: &str, timings: Timings) -> FetchResult {
    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), "text/html".to_string());
    FetchResult {
        url: url.to_string(),
        hostname: hostname_of(url),
        final_url: url.to_string(),
        redirects: 0,
        status,
        status_text: "OK".to_string(),
        headers,
        body: body.as_bytes().to_vec(),
        text: body.to_string(),
        timings,
    }
}

/// Fake fetcher: URLs containing `timeout` fail after a delay, all others
/// succeed with the configured page after their own delay.
pub struct ScriptedFetcher {
    pub body: String,
    pub status: u16,
    pub timings: Timings,
    pub delays: Vec<(String, Duration)>,
}

impl ScriptedFetcher {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            status: 200,
            timings: Timings::from_millis(150, 350),
            delays: vec![],
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_delay(mut self, url_fragment: &str, delay: Duration) -> Self {
        self.delays.push((url_fragment.to_string(), delay));
        self
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        if let Some((_, delay)) = self.delays.iter().find(|(frag, _)| url.contains(frag.as_str())) {
            tokio::time::sleep(*delay).await;
        }

        if url.contains("timeout") {
            return Err(FetchError::Timeout(Duration::from_secs(30)));
        }

        Ok(fetch_result(url, self.status, &self.body, self.timings))
    }
}

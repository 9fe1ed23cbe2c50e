//! HTTP source: static JSON files under a base URL.
//!
//! ```text
//! {base_url}/restaurants.json   → [Restaurant]
//! {base_url}/stats.json         → Stats
//! {base_url}/reviews.json       → [Review] (all restaurants)
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::info;
use tokio_util::sync::CancellationToken;

use crate::data::fetch::{DEFAULT_LOAD_TIMEOUT, DEFAULT_REVIEW_TIMEOUT, fetch_json};
use crate::data::{LoadError, Restaurant, RestaurantSource, Review, Stats};

pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
    load_timeout: Duration,
    review_timeout: Duration,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("HTTP source at {}", base_url);
        Self {
            base_url,
            client: reqwest::Client::new(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            review_timeout: DEFAULT_REVIEW_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, load_timeout: Duration, review_timeout: Duration) -> Self {
        self.load_timeout = load_timeout;
        self.review_timeout = review_timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, file: &str) -> String {
        format!("{}/{}", self.base_url, file)
    }
}

#[async_trait]
impl RestaurantSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn restaurants(&self, cancel: &CancellationToken) -> Result<Vec<Restaurant>, LoadError> {
        fetch_json(&self.client, &self.url("restaurants.json"), self.load_timeout, cancel).await
    }

    async fn stats(&self, cancel: &CancellationToken) -> Result<Stats, LoadError> {
        fetch_json(&self.client, &self.url("stats.json"), self.load_timeout, cancel).await
    }

    async fn reviews(&self, cancel: &CancellationToken) -> Result<Vec<Review>, LoadError> {
        fetch_json(&self.client, &self.url("reviews.json"), self.review_timeout, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let source = HttpSource::new("http://localhost:8080/data/");
        assert_eq!(source.base_url(), "http://localhost:8080/data");
        assert_eq!(
            source.url("stats.json"),
            "http://localhost:8080/data/stats.json"
        );
    }

    #[test]
    fn test_default_timeouts() {
        let source = HttpSource::new("http://localhost");
        assert_eq!(source.load_timeout, Duration::from_millis(5000));
        assert_eq!(source.review_timeout, Duration::from_millis(3000));
    }
}

//! HTTP client for the ranking service.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    CategoryList, HealthReport, SearchRequest, SearchResponse, SearchResult, SubcategoryList,
};
use super::RankingService;
use crate::config::Config;
use crate::error::{IrError, Result};

/// `reqwest`-backed [`RankingService`]. Sends no credentials and keeps no
/// cookies: every request is anonymous.
#[derive(Debug, Clone)]
pub struct HttpRankingClient {
    client: reqwest::Client,
    base_url: String,
    api_prefix: String,
    health_path: String,
    probe_timeout: Duration,
}

impl HttpRankingClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.api.request_timeout())
            .user_agent(concat!("irank/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| IrError::Config(format!("ranking http client: {err}")))?;
        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            api_prefix: normalize_path(&config.api.api_prefix),
            health_path: normalize_path(&config.api.health_path),
            probe_timeout: config.health.probe_timeout(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, self.health_path)
    }

    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, normalize_path(path))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, timeout: Option<Duration>) -> Result<T> {
        debug!(url, "GET");
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        decode(response).await
    }
}

impl RankingService for HttpRankingClient {
    async fn health(&self) -> Result<HealthReport> {
        let url = self.health_url();
        self.get_json(&url, Some(self.probe_timeout)).await
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let url = self.api_url("/categories");
        let list: CategoryList = self.get_json(&url, None).await?;
        Ok(list.categories)
    }

    async fn subcategories(&self, category: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}?category={}",
            self.api_url("/subcategories"),
            urlencoding::encode(category)
        );
        let list: SubcategoryList = self.get_json(&url, None).await?;
        Ok(list.subcategories)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let url = self.api_url("/search");
        debug!(url, query = %request.query, top_n = request.top_n, "POST");
        let response = self.client.post(&url).json(request).send().await?;
        let body: SearchResponse = decode(response).await?;
        Ok(body.results)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(IrError::Http {
            status: status.as_u16(),
            message: truncate(&message, 200),
        });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| IrError::MalformedResponse(err.to_string()))
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str, prefix: &str) -> HttpRankingClient {
        let mut config = Config::default();
        config.api.base_url = base_url.to_string();
        config.api.api_prefix = prefix.to_string();
        HttpRankingClient::from_config(&config).unwrap()
    }

    #[test]
    fn test_urls_join_without_double_slashes() {
        let client = client_for("http://127.0.0.1:8000/", "api/");
        assert_eq!(client.health_url(), "http://127.0.0.1:8000/health");
        assert_eq!(
            client.api_url("search"),
            "http://127.0.0.1:8000/api/search"
        );
    }

    #[test]
    fn test_empty_prefix() {
        let client = client_for("http://localhost:9000", "");
        assert_eq!(client.api_url("/categories"), "http://localhost:9000/categories");
    }

    #[test]
    fn test_truncate_long_bodies() {
        let long = "x".repeat(300);
        let out = truncate(&long, 200);
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("..."));
    }
}

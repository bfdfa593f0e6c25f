// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

// Web search, the last identifier fallback

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, WordscoreError};

pub const DEFAULT_INSTANCE: &str = "https://searxng.site/";
pub const DEFAULT_ENGINES: &str = "google scholar,crossref,arxiv,semantic scholar,pubmed";

/// Returns result URLs for a query, best ranked first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

// Represents one search result from SearX
#[derive(Debug, Deserialize)]
struct SearchResult {
    url: String,
}

pub struct SearxngSearch {
    client: Client,
    instance: String,
    engines: String,
    max_results: usize,
}

impl SearxngSearch {
    pub fn new(client: Client, instance: &str, engines: &str, max_results: usize) -> Self {
        Self {
            client,
            instance: instance.trim_end_matches('/').to_string(),
            engines: engines.to_string(),
            max_results: max_results.max(1),
        }
    }
}

#[async_trait]
impl SearchProvider for SearxngSearch {
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let url = format!("{}/search", self.instance);
        let params = [
            ("q", query),
            ("format", "json"),
            ("categories", "science"),
            ("engines", self.engines.as_str()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WordscoreError::Search(format!(
                "SearXNG error: {} - {}",
                status,
                body.trim()
            )));
        }

        let data: SearxngResponse = response.json().await?;
        debug!(results = data.results.len(), "SearXNG answered");

        Ok(data
            .results
            .into_iter()
            .map(|r| r.url)
            .take(self.max_results)
            .collect())
    }
}

/// The first `max_chars` characters of `text` with whitespace collapsed,
/// cut on a char boundary.
pub fn query_prefix(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_prefix_collapses_whitespace() {
        assert_eq!(query_prefix("  Social\n\nmedia   and\ttrust ", 100), "Social media and trust");
    }

    #[test]
    fn test_query_prefix_respects_char_boundaries() {
        assert_eq!(query_prefix("Zürich Ökonomie", 3), "Zür");
        assert_eq!(query_prefix("ab cd", 3), "ab");
    }

    #[test]
    fn test_searxng_response_parses_urls() {
        let raw = r#"{"query":"x","results":[{"url":"https://doi.org/10.1/abc","title":"t"},{"url":"https://example.org"}]}"#;
        let parsed: SearxngResponse = serde_json::from_str(raw).unwrap();
        let urls: Vec<_> = parsed.results.into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["https://doi.org/10.1/abc", "https://example.org"]);
    }

    #[test]
    fn test_instance_trailing_slash_is_trimmed() {
        let search = SearxngSearch::new(Client::new(), "https://searx.example/", DEFAULT_ENGINES, 0);
        assert_eq!(search.instance, "https://searx.example");
        assert_eq!(search.max_results, 1);
    }
}

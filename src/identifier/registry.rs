// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Registry lookups that confirm a resolved identifier.

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::grammar::{IdKind, StandardId};
use crate::error::{Result, WordscoreError};

pub const DOI_RESOLVER: &str = "https://doi.org";
pub const ARXIV_API: &str = "http://export.arxiv.org/api/query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRecord {
    pub title: String,
    /// Number of works citing this one, when the registry reports it.
    pub cited_by: Option<u64>,
}

/// `Ok(None)` means the registry answered and does not know the identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Registry: Send + Sync {
    async fn lookup(&self, id: &StandardId) -> Result<Option<RegistryRecord>>;
}

pub struct HttpRegistry {
    client: Client,
    doi_base: String,
    arxiv_base: String,
}

impl HttpRegistry {
    pub fn new(client: Client) -> Self {
        Self::with_endpoints(client, DOI_RESOLVER, ARXIV_API)
    }

    pub fn with_endpoints(client: Client, doi_base: &str, arxiv_base: &str) -> Self {
        Self {
            client,
            doi_base: doi_base.trim_end_matches('/').to_string(),
            arxiv_base: arxiv_base.to_string(),
        }
    }

    async fn lookup_doi(&self, doi: &str) -> Result<Option<RegistryRecord>> {
        let response = self
            .client
            .get(format!("{}/{}", self.doi_base, doi))
            .header("Accept", "application/citeproc+json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(WordscoreError::Validation(format!(
                "doi.org returned {} for {}",
                response.status(),
                doi
            )));
        }

        let data: Value = response.json().await?;
        Ok(parse_citeproc(&data))
    }

    async fn lookup_arxiv(&self, arxiv_id: &str) -> Result<Option<RegistryRecord>> {
        let response = self
            .client
            .get(&self.arxiv_base)
            .query(&[("id_list", arxiv_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WordscoreError::Validation(format!(
                "arXiv API returned {} for {}",
                response.status(),
                arxiv_id
            )));
        }

        let bytes = response.bytes().await?;
        parse_arxiv_feed(&bytes)
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn lookup(&self, id: &StandardId) -> Result<Option<RegistryRecord>> {
        debug!(id = %id, kind = %id.kind, "Validating identifier");
        match id.kind {
            IdKind::Doi => self.lookup_doi(&id.value).await,
            IdKind::Arxiv => self.lookup_arxiv(&id.value).await,
        }
    }
}

fn parse_citeproc(data: &Value) -> Option<RegistryRecord> {
    data.get("DOI")?;

    let title = data["title"]
        .as_str()
        .or_else(|| data["title"].as_array().and_then(|arr| arr.first()).and_then(Value::as_str))
        .unwrap_or("")
        .trim()
        .to_string();
    let cited_by = data["is-referenced-by-count"].as_u64();

    Some(RegistryRecord { title, cited_by })
}

fn parse_arxiv_feed(bytes: &[u8]) -> Result<Option<RegistryRecord>> {
    let feed = parser::parse(bytes)
        .map_err(|e| WordscoreError::Validation(format!("Failed to parse arXiv feed: {}", e)))?;

    let Some(entry) = feed.entries.first() else {
        return Ok(None);
    };
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    // unknown ids come back as a single entry titled "Error"
    if title.eq_ignore_ascii_case("error") {
        return Ok(None);
    }

    Ok(Some(RegistryRecord {
        title,
        cited_by: None,
    }))
}

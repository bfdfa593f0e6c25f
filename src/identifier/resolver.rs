// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Ordered identifier fallback chain.
//!
//! Handlers run cheapest first and the first one that yields an identifier
//! ends the chain:
//!
//! 1. priority metadata keys (`doi`, `arxiv`, ...)
//! 2. every metadata value through the grammar
//! 3. the title through the grammar
//! 4. the body text through the grammar
//! 5. web search on the start of the body, scanning each result URL
//!
//! Only step 5 and validation touch the network.

use std::sync::Arc;

use tracing::{debug, warn};

use super::grammar::{scan, standardize, StandardId};
use super::registry::Registry;
use super::{DocumentEvidence, Handler, Identifier, Validation};
use crate::search::{query_prefix, SearchProvider};

/// Metadata keys whose value is expected to be an identifier on its own.
pub const PRIORITY_KEYS: [&str; 7] = [
    "doi",
    "prism:doi",
    "dc:identifier",
    "arxiv",
    "arxivid",
    "arxiv_id",
    "identifier",
];

pub const DEFAULT_SEARCH_PREFIX_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub search_prefix_chars: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            search_prefix_chars: DEFAULT_SEARCH_PREFIX_CHARS,
        }
    }
}

/// Outcome of one resolution. `network` is set when search or the registry
/// was called for this document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub identifier: Identifier,
    pub network: bool,
}

#[derive(Default)]
pub struct IdentifierResolver {
    search: Option<Arc<dyn SearchProvider>>,
    registry: Option<Arc<dyn Registry>>,
    options: ResolverOptions,
}

impl IdentifierResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            search: None,
            registry: None,
            options,
        }
    }

    pub fn with_search(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Run the chain, then validate what it found. Never fails: exhaustion
    /// gives an unresolved identifier, lookup failures leave it unchecked.
    pub async fn resolve(&self, evidence: &DocumentEvidence) -> Identifier {
        self.resolve_traced(evidence).await.identifier
    }

    /// Like `resolve`, also reporting whether search or the registry was called.
    pub async fn resolve_traced(&self, evidence: &DocumentEvidence) -> Resolution {
        let mut network = false;
        let found = match find_offline(evidence) {
            Some(found) => Some(found),
            None => self
                .from_search(&evidence.body, &mut network)
                .await
                .map(|id| (id, Handler::WebSearch)),
        };

        let Some((id, handler)) = found else {
            debug!("No identifier found by any handler");
            return Resolution {
                identifier: Identifier::unresolved(),
                network,
            };
        };
        debug!(id = %id, handler = %handler, "Identifier resolved");

        let mut identifier = Identifier::resolved(id.clone(), handler);
        if let Some(registry) = &self.registry {
            network = true;
            identifier.validated = validate(registry.as_ref(), &id).await;
        }
        Resolution {
            identifier,
            network,
        }
    }

    async fn from_search(&self, body: &str, network: &mut bool) -> Option<StandardId> {
        let search = self.search.as_ref()?;
        let query = query_prefix(body, self.options.search_prefix_chars);
        if query.is_empty() {
            return None;
        }

        *network = true;
        let urls = match search.search(&query).await {
            Ok(urls) => urls,
            Err(e) => {
                warn!(error = %e, "Web search fallback failed");
                return None;
            }
        };
        urls.iter().find_map(|url| scan(url))
    }
}

/// Handlers that only look at the document itself, cheapest first.
fn find_offline(evidence: &DocumentEvidence) -> Option<(StandardId, Handler)> {
    if let Some(id) = from_priority_keys(evidence) {
        return Some((id, Handler::MetadataKey));
    }
    if let Some(id) = evidence.metadata.values().find_map(|v| scan(v)) {
        return Some((id, Handler::MetadataScan));
    }
    if let Some(id) = evidence.title.as_deref().and_then(scan) {
        return Some((id, Handler::Title));
    }
    scan(&evidence.body).map(|id| (id, Handler::Body))
}

fn from_priority_keys(evidence: &DocumentEvidence) -> Option<StandardId> {
    PRIORITY_KEYS.iter().find_map(|key| {
        let value = evidence.metadata.get(*key)?;
        standardize(value).or_else(|| scan(value))
    })
}

async fn validate(registry: &dyn Registry, id: &StandardId) -> Validation {
    match registry.lookup(id).await {
        Ok(Some(record)) => Validation::Confirmed {
            title: record.title,
            cited_by: record.cited_by,
        },
        Ok(None) => Validation::NotRegistered,
        Err(e) => {
            warn!(id = %id, error = %e, "Identifier validation failed");
            Validation::Unchecked
        }
    }
}

// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Bibliographic identifier recovery (DOI / arXiv).
//!
//! `grammar` defines what an identifier looks like, `resolver` runs the
//! ordered handler chain over a document's evidence, and `registry` checks a
//! resolved identifier against doi.org or the arXiv API.

pub mod grammar;
pub mod registry;
pub mod resolver;

use std::collections::BTreeMap;
use std::fmt;

pub use grammar::{scan, standardize, IdKind, StandardId};
pub use registry::{HttpRegistry, Registry, RegistryRecord};
pub use resolver::{IdentifierResolver, Resolution, ResolverOptions};

/// Everything the resolver may look at for one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentEvidence {
    /// Embedded document metadata, keys lowercased without a leading `/`.
    pub metadata: BTreeMap<String, String>,
    pub title: Option<String>,
    pub body: String,
}

/// The handler that produced an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    MetadataKey,
    MetadataScan,
    Title,
    Body,
    WebSearch,
}

impl Handler {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handler::MetadataKey => "metadata-key",
            Handler::MetadataScan => "metadata-scan",
            Handler::Title => "title",
            Handler::Body => "body",
            Handler::WebSearch => "web-search",
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking an identifier against its registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Validation {
    /// Not attempted, or the lookup itself failed.
    #[default]
    Unchecked,
    /// The registry answered and does not know the identifier.
    NotRegistered,
    Confirmed {
        title: String,
        cited_by: Option<u64>,
    },
}

impl Validation {
    /// Cell form: empty, `false`, or the registry title.
    pub fn describe(&self) -> String {
        match self {
            Validation::Unchecked => String::new(),
            Validation::NotRegistered => "false".to_string(),
            Validation::Confirmed { title, .. } => title.clone(),
        }
    }

    pub fn cited_by(&self) -> Option<u64> {
        match self {
            Validation::Confirmed { cited_by, .. } => *cited_by,
            _ => None,
        }
    }
}

/// Result of running the resolver chain. `value` is `None` when no handler
/// found anything, which is an ordinary outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifier {
    pub value: Option<String>,
    pub kind: Option<IdKind>,
    pub validated: Validation,
    pub source: Option<Handler>,
}

impl Identifier {
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn resolved(id: StandardId, source: Handler) -> Self {
        Self {
            value: Some(id.value),
            kind: Some(id.kind),
            validated: Validation::Unchecked,
            source: Some(source),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    pub fn standard_id(&self) -> Option<StandardId> {
        match (&self.value, self.kind) {
            (Some(value), Some(kind)) => Some(StandardId {
                value: value.clone(),
                kind,
            }),
            _ => None,
        }
    }
}

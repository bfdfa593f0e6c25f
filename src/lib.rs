// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Document relevance scoring and bibliographic identifier harvesting.
//!
//! Scores PDFs or CSV-listed abstracts against curated target/bycatch word
//! lists ("wordscore"), recovers a DOI or arXiv id for each document through
//! an ordered fallback chain, and exports one CSV row per document.

pub mod config;
pub mod download;
pub mod error;
pub mod export;
pub mod identifier;
pub mod matcher;
pub mod pdf;
pub mod relevance;
pub mod scraper;
pub mod search;
pub mod source;
pub mod terms;
pub mod tokenizer;

pub use config::Config;
pub use error::{Result, WordscoreError};
pub use identifier::{Identifier, Validation};
pub use matcher::{match_terms, MatchResult};
pub use relevance::RelevanceCalculator;
pub use scraper::{run_batch, DocScraper, DocumentResult, RunSummary, WordScorer};
pub use source::InputMode;
pub use tokenizer::{tokenize, TokenSequence};

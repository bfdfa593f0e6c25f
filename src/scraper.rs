// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Per-document pipeline: score, resolve, download, collect.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{build_client, Config};
use crate::download::{ArxivDownloader, Downloader};
use crate::error::Result;
use crate::export::ResultWriter;
use crate::identifier::{
    DocumentEvidence, HttpRegistry, IdKind, Identifier, IdentifierResolver, ResolverOptions,
};
use crate::matcher::match_terms;
use crate::relevance::RelevanceCalculator;
use crate::search::SearxngSearch;
use crate::source::PendingDocument;
use crate::terms::{TermCategory, TermLists};
use crate::tokenizer::tokenize;

/// Scored record of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentResult {
    pub document: String,
    pub title: Option<String>,
    pub matching_terms: usize,
    pub bycatch_terms: usize,
    pub total_length: usize,
    pub wordscore: f64,
    pub target_freq: Vec<(String, usize)>,
    pub bycatch_freq: Vec<(String, usize)>,
    /// Reported only, never part of the score.
    pub auxiliary_freq: Vec<(TermCategory, Vec<(String, usize)>)>,
    pub identifier: Option<Identifier>,
}

/// Tokenize, match and score text against a fixed set of term lists.
#[derive(Debug, Clone)]
pub struct WordScorer {
    lists: Arc<TermLists>,
    calculator: RelevanceCalculator,
}

impl WordScorer {
    pub fn new(lists: Arc<TermLists>) -> Self {
        let calculator = RelevanceCalculator::for_lists(&lists);
        Self { lists, calculator }
    }

    pub fn score(&self, document: &str, evidence: &DocumentEvidence) -> DocumentResult {
        let tokens = tokenize(&evidence.body);
        let target = match_terms(&tokens, &self.lists.target);
        let bycatch = match_terms(&tokens, &self.lists.bycatch);
        let auxiliary_freq = self
            .lists
            .auxiliary
            .iter()
            .map(|(category, set)| (*category, match_terms(&tokens, set).frequency_dist))
            .collect();

        let total_length = tokens.text_length();
        let wordscore = self
            .calculator
            .score(target.term_count, bycatch.term_count, total_length);

        DocumentResult {
            document: document.to_string(),
            title: evidence.title.clone(),
            matching_terms: target.term_count,
            bycatch_terms: bycatch.term_count,
            total_length,
            wordscore,
            target_freq: target.frequency_dist,
            bycatch_freq: bycatch.frequency_dist,
            auxiliary_freq,
            identifier: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub document: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub exported: usize,
    pub below_threshold: usize,
    pub identified: usize,
    pub downloaded: usize,
    pub skipped: Vec<SkippedDocument>,
}

impl RunSummary {
    pub fn print(&self, output: &str) {
        println!("\n{}", "=".repeat(64));
        println!("Results");
        println!("{}", "=".repeat(64));
        println!("Total processed: {}", self.processed);
        println!("Exported: {}", self.exported);
        println!("Below minimum score: {}", self.below_threshold);
        println!("With identifier: {}", self.identified);
        if self.downloaded > 0 {
            println!("Downloaded PDFs: {}", self.downloaded);
        }
        println!("Skipped: {}", self.skipped.len());
        for skipped in &self.skipped {
            println!("   {}: {}", skipped.document, skipped.reason);
        }
        println!("Output: {}\n", output);
    }
}

pub struct DocScraper {
    scorer: WordScorer,
    resolver: Option<IdentifierResolver>,
    downloader: Option<Arc<dyn Downloader>>,
    min_score: f64,
    delay: Duration,
}

impl DocScraper {
    pub fn new(scorer: WordScorer) -> Self {
        Self {
            scorer,
            resolver: None,
            downloader: None,
            min_score: 0.0,
            delay: Duration::ZERO,
        }
    }

    pub fn with_resolver(mut self, resolver: IdentifierResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_downloader(mut self, downloader: Arc<dyn Downloader>) -> Self {
        self.downloader = Some(downloader);
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Wire up a scraper from configuration. Fails only if a term list
    /// cannot be loaded or the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let lists = Arc::new(TermLists::load(&config.terms)?);
        info!(
            target_terms = lists.target.len(),
            bycatch_terms = lists.bycatch.len(),
            auxiliary_lists = lists.auxiliary.len(),
            "Loaded term lists"
        );

        let mut scraper = Self::new(WordScorer::new(lists))
            .with_min_score(config.min_score)
            .with_delay(config.delay);

        if !config.resolve_identifiers {
            return Ok(scraper);
        }

        let mut resolver = IdentifierResolver::new(ResolverOptions {
            search_prefix_chars: config.search_prefix_chars,
        });
        if config.needs_network() {
            let client = build_client()?;
            if let Some(search) = &config.search {
                resolver = resolver.with_search(Arc::new(SearxngSearch::new(
                    client.clone(),
                    &search.instance,
                    &search.engines,
                    search.max_results,
                )));
            }
            if config.validate {
                resolver = resolver.with_registry(Arc::new(HttpRegistry::new(client.clone())));
            }
            if let Some(dir) = &config.download_dir {
                scraper = scraper.with_downloader(Arc::new(ArxivDownloader::new(client, dir.clone())));
            }
        }

        Ok(scraper.with_resolver(resolver))
    }

    /// Score one document and, if configured, resolve its identifier.
    pub async fn process(&self, document: &str, evidence: &DocumentEvidence) -> DocumentResult {
        self.process_traced(document, evidence).await.0
    }

    // Also reports whether resolving went to the network
    async fn process_traced(
        &self,
        document: &str,
        evidence: &DocumentEvidence,
    ) -> (DocumentResult, bool) {
        let mut result = self.scorer.score(document, evidence);
        let Some(resolver) = &self.resolver else {
            return (result, false);
        };
        let resolution = resolver.resolve_traced(evidence).await;
        result.identifier = Some(resolution.identifier);
        (result, resolution.network)
    }

    /// `None` when nothing was attempted, otherwise whether the PDF was saved.
    async fn download(&self, result: &DocumentResult) -> Option<bool> {
        let downloader = self.downloader.as_ref()?;
        let id = result.identifier.as_ref().and_then(Identifier::standard_id)?;
        if id.kind != IdKind::Arxiv {
            return None;
        }

        match downloader.download(&id.value).await {
            Ok(_) => Some(true),
            Err(e) => {
                warn!(document = %result.document, id = %id, error = %e, "Download failed");
                Some(false)
            }
        }
    }

    /// Process every document in order. Unreadable documents are recorded
    /// and skipped; results under the minimum score are counted, not kept.
    pub async fn run(&self, documents: Vec<PendingDocument>) -> (Vec<DocumentResult>, RunSummary) {
        let mut summary = RunSummary::default();
        let mut results = Vec::new();
        let total = documents.len();

        for (i, pending) in documents.into_iter().enumerate() {
            let name = pending.name.clone();
            let evidence = match pending.load() {
                Ok(evidence) => evidence,
                Err(e) => {
                    warn!(document = %name, error = %e, "Skipping document");
                    summary.skipped.push(SkippedDocument {
                        document: name,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let (result, mut network) = self.process_traced(&name, &evidence).await;
            summary.processed += 1;
            info!(
                document = %name,
                index = i + 1,
                total,
                wordscore = result.wordscore,
                matching = result.matching_terms,
                bycatch = result.bycatch_terms,
                identifier = result
                    .identifier
                    .as_ref()
                    .and_then(|id| id.value.as_deref())
                    .unwrap_or("-"),
                "Scored document"
            );

            if result.identifier.as_ref().is_some_and(Identifier::is_resolved) {
                summary.identified += 1;
            }
            if let Some(saved) = self.download(&result).await {
                network = true;
                if saved {
                    summary.downloaded += 1;
                }
            }

            if result.wordscore >= self.min_score {
                summary.exported += 1;
                results.push(result);
            } else {
                summary.below_threshold += 1;
            }

            if network && !self.delay.is_zero() && i + 1 < total {
                sleep(self.delay).await;
            }
        }

        (results, summary)
    }
}

/// Load, score and export a whole batch as described by `config`.
pub async fn run_batch(config: &Config) -> Result<RunSummary> {
    config.validate()?;
    let scraper = DocScraper::from_config(config)?;

    let documents = config.input.documents()?;
    let mut writer = ResultWriter::create(&config.output)?;
    info!(documents = documents.len(), input = %config.input.path().display(), "Starting batch");

    let (results, summary) = scraper.run(documents).await;
    for result in &results {
        writer.write(result)?;
    }
    writer.finish()?;
    Ok(summary)
}

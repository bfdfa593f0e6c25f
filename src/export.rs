// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

// CSV export of scored documents

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::matcher::describe_frequencies;
use crate::scraper::DocumentResult;
use crate::terms::TermCategory;

pub const COLUMNS: [&str; 17] = [
    "document",
    "title",
    "matching_terms",
    "bycatch_terms",
    "total_length",
    "wordscore",
    "target_freq",
    "bycatch_freq",
    "research_freq",
    "tech_freq",
    "impact_freq",
    "identifier",
    "identifier_kind",
    "identifier_source",
    "validated",
    "cited_by",
    "scored_at",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    document: &'a str,
    title: &'a str,
    matching_terms: usize,
    bycatch_terms: usize,
    total_length: usize,
    wordscore: String,
    target_freq: String,
    bycatch_freq: String,
    research_freq: String,
    tech_freq: String,
    impact_freq: String,
    identifier: &'a str,
    identifier_kind: &'static str,
    identifier_source: &'static str,
    validated: String,
    cited_by: Option<u64>,
    scored_at: &'a str,
}

impl<'a> ExportRow<'a> {
    fn new(result: &'a DocumentResult, scored_at: &'a str) -> Self {
        let auxiliary = |category: TermCategory| {
            result
                .auxiliary_freq
                .iter()
                .find(|(c, _)| *c == category)
                .map(|(_, dist)| describe_frequencies(dist))
                .unwrap_or_default()
        };
        let identifier = result.identifier.as_ref();

        Self {
            document: &result.document,
            title: result.title.as_deref().unwrap_or(""),
            matching_terms: result.matching_terms,
            bycatch_terms: result.bycatch_terms,
            total_length: result.total_length,
            wordscore: format!("{:.4}", result.wordscore),
            target_freq: describe_frequencies(&result.target_freq),
            bycatch_freq: describe_frequencies(&result.bycatch_freq),
            research_freq: auxiliary(TermCategory::Research),
            tech_freq: auxiliary(TermCategory::Tech),
            impact_freq: auxiliary(TermCategory::Impact),
            identifier: identifier.and_then(|i| i.value.as_deref()).unwrap_or(""),
            identifier_kind: identifier.and_then(|i| i.kind).map_or("", |k| k.as_str()),
            identifier_source: identifier.and_then(|i| i.source).map_or("", |s| s.as_str()),
            validated: identifier.map(|i| i.validated.describe()).unwrap_or_default(),
            cited_by: identifier.and_then(|i| i.validated.cited_by()),
            scored_at,
        }
    }
}

/// CSV sink opened before a batch starts, so an unwritable output path fails
/// before any document is processed.
pub struct ResultWriter {
    wtr: csv::Writer<File>,
    path: PathBuf,
    scored_at: String,
    rows: usize,
}

impl ResultWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        wtr.write_record(COLUMNS)?;
        wtr.flush()?;

        Ok(Self {
            wtr,
            path: path.to_path_buf(),
            scored_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            rows: 0,
        })
    }

    pub fn write(&mut self, result: &DocumentResult) -> Result<()> {
        self.wtr.serialize(ExportRow::new(result, &self.scored_at))?;
        self.rows += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.wtr.flush()?;
        info!(path = %self.path.display(), rows = self.rows, "Saved results");
        Ok(())
    }
}

/// Write one row per result, header first, to `path`.
pub fn write_results(path: &Path, results: &[DocumentResult]) -> Result<()> {
    let mut writer = ResultWriter::create(path)?;
    for result in results {
        writer.write(result)?;
    }
    writer.finish()
}

// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Where documents come from: a directory of PDFs or a CSV of abstracts.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WordscoreError};
use crate::identifier::DocumentEvidence;
use crate::pdf::extract_pdf;

/// CSV columns whose cells are handed to the resolver as metadata.
const IDENTIFIER_COLUMNS: [&str; 3] = ["doi", "arxiv", "identifier"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    PdfDir(PathBuf),
    Csv(PathBuf),
}

impl InputMode {
    pub fn path(&self) -> &Path {
        match self {
            InputMode::PdfDir(path) | InputMode::Csv(path) => path,
        }
    }

    /// Enumerate the documents of this input. Only failure to list the input
    /// itself is an error here; per-document problems surface in `load`.
    pub fn documents(&self) -> Result<Vec<PendingDocument>> {
        match self {
            InputMode::PdfDir(dir) => pdf_documents(dir),
            InputMode::Csv(path) => csv_documents(path),
        }
    }
}

/// A document that has been listed but not yet read.
#[derive(Debug, Clone)]
pub struct PendingDocument {
    pub name: String,
    kind: PendingKind,
}

#[derive(Debug, Clone)]
enum PendingKind {
    Pdf(PathBuf),
    Row(std::result::Result<DocumentEvidence, String>),
}

impl PendingDocument {
    pub fn load(self) -> Result<DocumentEvidence> {
        match self.kind {
            PendingKind::Pdf(path) => extract_pdf(&path),
            PendingKind::Row(row) => row.map_err(WordscoreError::Extraction),
        }
    }
}

fn pdf_documents(dir: &Path) -> Result<Vec<PendingDocument>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_pdf(path))
        .collect();
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| PendingDocument {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            kind: PendingKind::Pdf(path),
        })
        .collect())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn csv_documents(path: &Path) -> Result<Vec<PendingDocument>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_lowercase(), i))
        .collect();

    let mut documents = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let fallback_name = format!("row-{}", i + 1);
        let document = match record {
            Ok(record) => {
                let cell = |name: &str| {
                    columns
                        .get(name)
                        .and_then(|&idx| record.get(idx))
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                };
                let metadata: BTreeMap<String, String> = IDENTIFIER_COLUMNS
                    .iter()
                    .filter_map(|col| cell(*col).map(|v| (col.to_string(), v)))
                    .collect();
                PendingDocument {
                    name: cell("id").unwrap_or(fallback_name),
                    kind: PendingKind::Row(Ok(DocumentEvidence {
                        metadata,
                        title: cell("title"),
                        body: cell("abstract").unwrap_or_default(),
                    })),
                }
            }
            Err(err) => PendingDocument {
                name: fallback_name,
                kind: PendingKind::Row(Err(format!("unreadable CSV row: {err}"))),
            },
        };
        documents.push(document);
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_rows_become_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abstracts.csv");
        fs::write(
            &path,
            "ID,Title,Abstract,DOI\n\
             p1,Nudges,\"Prosocial design, online\",doi:10.1234/abc\n\
             ,Untitled,,\n",
        )
        .unwrap();

        let docs = InputMode::Csv(path).documents().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, "p1");
        assert_eq!(docs[1].name, "row-2");

        let mut docs = docs.into_iter();
        let first = docs.next().unwrap().load().unwrap();
        assert_eq!(first.title.as_deref(), Some("Nudges"));
        assert_eq!(first.body, "Prosocial design, online");
        assert_eq!(first.metadata.get("doi").map(String::as_str), Some("doi:10.1234/abc"));

        let second = docs.next().unwrap().load().unwrap();
        assert_eq!(second.body, "");
        assert!(second.metadata.is_empty());
    }

    #[test]
    fn test_missing_csv_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(InputMode::Csv(dir.path().join("missing.csv")).documents().is_err());
    }

    #[test]
    fn test_pdf_dir_lists_sorted_pdfs_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let docs = InputMode::PdfDir(dir.path().to_path_buf()).documents().unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_unreadable_pdf_fails_on_load_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.pdf"), b"garbage").unwrap();
        let docs = InputMode::PdfDir(dir.path().to_path_buf()).documents().unwrap();
        assert_eq!(docs.len(), 1);
        let err = docs.into_iter().next().unwrap().load().unwrap_err();
        assert!(matches!(err, WordscoreError::Extraction(_)));
    }
}

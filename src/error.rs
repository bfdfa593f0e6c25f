// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Error types for wordscore.
//!
//! Only `Resource` is fatal for a batch. Extraction, validation and search
//! failures are caught per document by the scraper and degrade gracefully.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordscoreError {
    /// A required term list is missing or unreadable.
    #[error("Term list {path} could not be read: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text could not be pulled out of a document (corrupt, encrypted, no pages).
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Registry lookup for an identifier failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Web-search fallback failed.
    #[error("Search error: {0}")]
    Search(String),

    /// Source file download failed.
    #[error("Download error: {0}")]
    Download(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, WordscoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_error_names_the_file() {
        let err = WordscoreError::Resource {
            path: PathBuf::from("lists/target.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "Term list lists/target.txt could not be read: no such file"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: WordscoreError = io_err.into();
        assert!(matches!(err, WordscoreError::Io(_)));
    }
}

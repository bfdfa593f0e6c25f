// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Run configuration, built by the CLI and validated before a batch starts.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use crate::error::{Result, WordscoreError};
use crate::identifier::resolver::DEFAULT_SEARCH_PREFIX_CHARS;
use crate::search::{DEFAULT_ENGINES, DEFAULT_INSTANCE};
use crate::source::InputMode;
use crate::terms::TermListPaths;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub instance: String,
    pub engines: String,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            instance: DEFAULT_INSTANCE.to_string(),
            engines: DEFAULT_ENGINES.to_string(),
            max_results: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: InputMode,
    pub terms: TermListPaths,
    pub output: PathBuf,
    /// Skip identifier resolution entirely.
    pub resolve_identifiers: bool,
    /// `Some` enables the web-search fallback.
    pub search: Option<SearchConfig>,
    pub search_prefix_chars: usize,
    pub validate: bool,
    pub download_dir: Option<PathBuf>,
    pub min_score: f64,
    /// Pause after a document that went to the network.
    pub delay: Duration,
}

impl Config {
    pub fn new(input: InputMode, terms: TermListPaths, output: impl Into<PathBuf>) -> Self {
        Self {
            input,
            terms,
            output: output.into(),
            resolve_identifiers: true,
            search: None,
            search_prefix_chars: DEFAULT_SEARCH_PREFIX_CHARS,
            validate: false,
            download_dir: None,
            min_score: 0.0,
            delay: Duration::from_millis(500),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let input = self.input.path();
        match &self.input {
            InputMode::PdfDir(dir) if !dir.is_dir() => {
                return Err(WordscoreError::Config(format!(
                    "{} is not a directory",
                    input.display()
                )));
            }
            InputMode::Csv(file) if !file.is_file() => {
                return Err(WordscoreError::Config(format!(
                    "{} is not a file",
                    input.display()
                )));
            }
            _ => {}
        }

        if self.terms.target.as_os_str().is_empty() || self.terms.bycatch.as_os_str().is_empty() {
            return Err(WordscoreError::Config(
                "both a target and a bycatch word list are required".to_string(),
            ));
        }
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(WordscoreError::Config(format!(
                    "output directory {} does not exist",
                    parent.display()
                )));
            }
        }
        if self.search_prefix_chars == 0 {
            return Err(WordscoreError::Config(
                "search prefix must be at least one character".to_string(),
            ));
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(WordscoreError::Config(format!(
                "minimum score {} must be a non-negative number",
                self.min_score
            )));
        }
        Ok(())
    }

    /// Whether any stage needs an HTTP client.
    pub fn needs_network(&self) -> bool {
        self.resolve_identifiers
            && (self.search.is_some() || self.validate || self.download_dir.is_some())
    }
}

const USER_AGENTS: [&str; 8] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (Linux; Android 14; Pixel 7) AppleWebKit/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Fedora; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 12_5_1) AppleWebKit/537.36",
    "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36",
];

/// One client per run, shared by search, validation and downloads.
pub fn build_client() -> Result<Client> {
    let user_agent = USER_AGENTS[fastrand::usize(..USER_AGENTS.len())];
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .build()?)
}

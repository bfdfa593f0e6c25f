// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

// Source PDF download for resolved arXiv identifiers

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::error::{Result, WordscoreError};

const MAX_PDF_BYTES: usize = 20 * 1024 * 1024;

/// Fetches the source PDF of an arXiv id and returns where it was written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, arxiv_id: &str) -> Result<PathBuf>;
}

pub struct ArxivDownloader {
    client: Client,
    target_dir: PathBuf,
}

impl ArxivDownloader {
    pub fn new(client: Client, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            target_dir: target_dir.into(),
        }
    }
}

#[async_trait]
impl Downloader for ArxivDownloader {
    // Fetch https://arxiv.org/pdf/<id>.pdf into the target directory
    async fn download(&self, arxiv_id: &str) -> Result<PathBuf> {
        let url = format!("https://arxiv.org/pdf/{}.pdf", arxiv_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(WordscoreError::Download(format!(
                "arXiv returned status {} for {}",
                response.status(),
                arxiv_id
            )));
        }

        let bytes = response.bytes().await?;
        check_pdf(&bytes)?;

        tokio::fs::create_dir_all(&self.target_dir).await?;
        let path = pdf_path(&self.target_dir, arxiv_id);
        tokio::fs::write(&path, &bytes).await?;

        info!(id = arxiv_id, path = %path.display(), bytes = bytes.len(), "Downloaded arXiv PDF");
        Ok(path)
    }
}

fn check_pdf(bytes: &[u8]) -> Result<()> {
    if !bytes.starts_with(b"%PDF") {
        return Err(WordscoreError::Download(
            "arXiv response is not a valid PDF".to_string(),
        ));
    }
    if bytes.len() > MAX_PDF_BYTES {
        return Err(WordscoreError::Download(format!(
            "arXiv PDF too large: {} MB",
            bytes.len() / 1024 / 1024
        )));
    }
    Ok(())
}

/// Old-style ids contain a `/`, which cannot appear in a file name.
fn pdf_path(dir: &Path, arxiv_id: &str) -> PathBuf {
    dir.join(format!("{}.pdf", arxiv_id.replace('/', "_")))
}

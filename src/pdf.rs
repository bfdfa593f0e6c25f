// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! PDF text and metadata extraction.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object};
use tracing::debug;

use crate::error::{Result, WordscoreError};
use crate::identifier::DocumentEvidence;

const MAX_TITLE_CHARS: usize = 300;

/// Load a PDF and pull out its page text, Info dictionary and a title.
///
/// Corrupt, encrypted and page-less files are extraction errors. A page whose
/// text cannot be decoded is skipped.
pub fn extract_pdf(path: &Path) -> Result<DocumentEvidence> {
    let document = Document::load(path).map_err(|err| {
        WordscoreError::Extraction(format!("failed to open {}: {err}", path.display()))
    })?;

    if document.is_encrypted() {
        return Err(WordscoreError::Extraction(format!(
            "{} is encrypted",
            path.display()
        )));
    }

    let pages = document.get_pages();
    if pages.is_empty() {
        return Err(WordscoreError::Extraction(format!(
            "{} has no pages",
            path.display()
        )));
    }

    let mut texts = Vec::with_capacity(pages.len());
    for page in pages.keys() {
        match document.extract_text(&[*page]) {
            Ok(text) => texts.push(text),
            Err(err) => debug!(page = *page, error = %err, "Skipping unreadable page"),
        }
    }
    let body = texts.join("\n");

    let metadata = info_dictionary(&document)
        .map(read_metadata)
        .unwrap_or_default();
    let title = metadata
        .get("title")
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| first_line_title(&body));

    debug!(
        path = %path.display(),
        pages = pages.len(),
        chars = body.len(),
        metadata_keys = metadata.len(),
        "Extracted PDF"
    );

    Ok(DocumentEvidence {
        metadata,
        title,
        body,
    })
}

fn info_dictionary(document: &Document) -> Option<&Dictionary> {
    match document.trailer.get(b"Info").ok()? {
        Object::Reference(id) => document.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn read_metadata(info: &Dictionary) -> BTreeMap<String, String> {
    info.iter()
        .filter_map(|(key, value)| {
            let Object::String(bytes, _) = value else {
                return None;
            };
            let key = String::from_utf8_lossy(key)
                .trim_start_matches('/')
                .to_lowercase();
            let value = decode_pdf_string(bytes);
            (!value.trim().is_empty()).then(|| (key, value))
        })
        .collect()
}

/// PDF text strings are UTF-16BE when they start with a byte-order mark,
/// otherwise treated as UTF-8 with lossy fallback.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn first_line_title(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(MAX_TITLE_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, StringFormat};

    fn pageless_document() -> Document {
        let mut document = Document::with_version("1.5");
        let pages_id = document.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);
        document
    }

    #[test]
    fn test_decode_utf16_string() {
        let bytes = [0xFE, 0xFF, 0x00, 0x5A, 0x00, 0xFC, 0x00, 0x72];
        assert_eq!(decode_pdf_string(&bytes), "Zür");
    }

    #[test]
    fn test_decode_plain_string() {
        assert_eq!(decode_pdf_string(b"10.1234/abc"), "10.1234/abc");
    }

    #[test]
    fn test_read_metadata_lowercases_keys_and_drops_blanks() {
        let mut info = Dictionary::new();
        info.set("Title", Object::String(b"A Title".to_vec(), StringFormat::Literal));
        info.set("DOI", Object::String(b"10.1234/ABC".to_vec(), StringFormat::Literal));
        info.set("Subject", Object::String(b"   ".to_vec(), StringFormat::Literal));
        info.set("Pages", Object::Integer(12));

        let metadata = read_metadata(&info);
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("title").map(String::as_str), Some("A Title"));
        assert_eq!(metadata.get("doi").map(String::as_str), Some("10.1234/ABC"));
    }

    #[test]
    fn test_first_line_title() {
        assert_eq!(
            first_line_title("\n   \n  Nudging Online  \nAbstract").as_deref(),
            Some("Nudging Online")
        );
        assert_eq!(first_line_title(""), None);
    }

    #[test]
    fn test_corrupt_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        assert!(matches!(extract_pdf(&path), Err(WordscoreError::Extraction(_))));
    }

    #[test]
    fn test_pageless_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        pageless_document().save(&path).unwrap();
        assert!(matches!(extract_pdf(&path), Err(WordscoreError::Extraction(_))));
    }

    #[test]
    fn test_encrypted_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.pdf");
        let mut document = pageless_document();
        let encrypt_id = document.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "O" => Object::String(vec![0x11; 32], StringFormat::Literal),
            "U" => Object::String(vec![0x22; 32], StringFormat::Literal),
            "P" => -4,
        });
        document.trailer.set("Encrypt", encrypt_id);
        document.save(&path).unwrap();
        assert!(matches!(extract_pdf(&path), Err(WordscoreError::Extraction(_))));
    }
}

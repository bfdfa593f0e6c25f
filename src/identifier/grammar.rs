// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! DOI / arXiv identifier grammar.
//!
//! Scanning patterns find a raw identifier inside arbitrary text; the
//! canonical patterns re-parse that raw match into one textual form
//! (`10.<registrant>/<suffix>` lowercased, or a bare arXiv id).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Doi,
    Arxiv,
}

impl IdKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdKind::Doi => "doi",
            IdKind::Arxiv => "arxiv",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StandardId {
    pub value: String,
    pub kind: IdKind,
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

const DOI_BODY: &str = r"10\.\d{4,9}(?:\.\d+)*/[-._;()/:<>\[\]A-Za-z0-9]+";
const ARXIV_NEW: &str = r"\d{4}\.\d{4,5}(?:v\d+)?";
const ARXIV_OLD: &str = r"[a-z][a-z\-]+(?:\.[A-Za-z]{2})?/\d{7}(?:v\d+)?";

struct ScanPattern {
    kind: IdKind,
    regex: Regex,
}

impl ScanPattern {
    fn new(kind: IdKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

// Priority order: explicit prefixes and resolver URLs before bare forms.
static SCAN_PATTERNS: LazyLock<Vec<ScanPattern>> = LazyLock::new(|| {
    vec![
        ScanPattern::new(IdKind::Doi, &format!(r"(?i)\bdoi:\s*({DOI_BODY})")),
        ScanPattern::new(
            IdKind::Doi,
            &format!(r"(?i)https?://(?:dx\.)?doi\.org/({DOI_BODY})"),
        ),
        ScanPattern::new(IdKind::Arxiv, &format!(r"(?i)\barxiv:\s*({ARXIV_NEW}|{ARXIV_OLD})")),
        ScanPattern::new(
            IdKind::Arxiv,
            &format!(r"(?i)arxiv\.org/(?:abs|pdf)/({ARXIV_NEW}|{ARXIV_OLD})"),
        ),
        ScanPattern::new(IdKind::Doi, &format!(r"\b({DOI_BODY})")),
    ]
});

static CANONICAL_DOI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:doi:\s*|https?://(?:dx\.)?doi\.org/)?10\.(?P<registrant>\d{4,9}(?:\.\d+)*)/(?P<suffix>\S+)$",
    )
    .unwrap()
});

static CANONICAL_ARXIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:arxiv:\s*|https?://(?:www\.|export\.)?arxiv\.org/(?:abs|pdf)/)?(?P<identifier>\d{4}\.\d{4,5}|[a-z][a-z\-]+(?:\.[a-z]{2})?/\d{7})(?:v\d+)?(?:\.pdf)?$",
    )
    .unwrap()
});

/// Re-parse a raw match into canonical form. Idempotent on its own output.
pub fn standardize(raw: &str) -> Option<StandardId> {
    let raw = raw.trim();

    if let Some(caps) = CANONICAL_DOI.captures(raw) {
        let suffix = trim_suffix(&caps["suffix"]);
        if !suffix.is_empty() {
            return Some(StandardId {
                value: format!("10.{}/{}", &caps["registrant"], suffix).to_lowercase(),
                kind: IdKind::Doi,
            });
        }
    }

    CANONICAL_ARXIV.captures(raw).map(|caps| StandardId {
        value: caps["identifier"].to_string(),
        kind: IdKind::Arxiv,
    })
}

/// Scan text with the patterns in priority order. The first pattern with a
/// match that standardizes wins; later patterns are not consulted.
pub fn scan(text: &str) -> Option<StandardId> {
    for pattern in SCAN_PATTERNS.iter() {
        let Some(raw) = pattern.regex.captures(text).and_then(|c| c.get(1)) else {
            continue;
        };
        if let Some(id) = standardize(raw.as_str()).filter(|id| id.kind == pattern.kind) {
            return Some(id);
        }
    }
    None
}

// Sentence punctuation and unbalanced closing brackets glued to the end of a
// DOI are not part of it.
fn trim_suffix(suffix: &str) -> &str {
    let mut trimmed = suffix.trim_end_matches(['.', ',', ';', ':', '"', '\'']);
    loop {
        let Some(last) = trimmed.chars().last() else {
            return trimmed;
        };
        let open = match last {
            ')' => '(',
            ']' => '[',
            '>' => '<',
            _ => return trimmed,
        };
        if trimmed.matches(open).count() >= trimmed.matches(last).count() {
            return trimmed;
        }
        trimmed = trimmed[..trimmed.len() - 1].trim_end_matches(['.', ',', ';', ':', '"', '\'']);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn std_value(raw: &str) -> Option<String> {
        standardize(raw).map(|id| id.value)
    }

    #[test]
    fn test_standardize_prefixed_doi() {
        assert_eq!(std_value("doi:10.1234/ABC.123").as_deref(), Some("10.1234/abc.123"));
        assert_eq!(std_value("DOI: 10.1234/ABC.123").as_deref(), Some("10.1234/abc.123"));
    }

    #[test]
    fn test_standardize_doi_url() {
        assert_eq!(
            std_value("https://doi.org/10.1234/xyz789").as_deref(),
            Some("10.1234/xyz789")
        );
        assert_eq!(
            std_value("http://dx.doi.org/10.1038/nature12373").as_deref(),
            Some("10.1038/nature12373")
        );
    }

    #[test]
    fn test_standardize_arxiv_forms() {
        for raw in [
            "arXiv:2301.12345v2",
            "2301.12345",
            "https://arxiv.org/abs/2301.12345",
            "https://arxiv.org/pdf/2301.12345v3.pdf",
        ] {
            let id = standardize(raw).unwrap();
            assert_eq!(id.kind, IdKind::Arxiv, "{raw}");
            assert_eq!(id.value, "2301.12345", "{raw}");
        }
        assert_eq!(std_value("arXiv:hep-th/9901001").as_deref(), Some("hep-th/9901001"));
    }

    #[test]
    fn test_standardize_rejects_garbage() {
        assert_eq!(standardize("not an identifier"), None);
        assert_eq!(standardize("10.12/too-short-registrant"), None);
        assert_eq!(standardize(""), None);
    }

    #[test]
    fn test_standardize_is_idempotent() {
        for raw in [
            "doi:10.1234/ABC.123",
            "https://doi.org/10.1234/xyz789",
            "10.1000/(SICI)1097-4571(199806)49:8<693::AID-ASI4>3.0.CO;2-0",
            "10.1234/trailing.dot.",
            "arXiv:2301.12345v2",
            "math.GT/0309136",
        ] {
            let once = standardize(raw).unwrap();
            let twice = standardize(&once.value).unwrap();
            assert_eq!(once, twice, "{raw}");
        }
    }

    #[test]
    fn test_trailing_punctuation_is_trimmed() {
        assert_eq!(std_value("10.1234/abc.").as_deref(), Some("10.1234/abc"));
        assert_eq!(std_value("10.1234/abc)").as_deref(), Some("10.1234/abc"));
        assert_eq!(std_value("10.1234/abc(1)").as_deref(), Some("10.1234/abc(1)"));
    }

    #[test]
    fn test_scan_prefers_prefixed_form() {
        let text = "see 10.5555/bare.one and also doi:10.1111/prefixed.two";
        assert_eq!(scan(text).unwrap().value, "10.1111/prefixed.two");
    }

    #[test]
    fn test_scan_doi_in_sentence() {
        let text = "Available at https://doi.org/10.1145/3290605.3300233.";
        assert_eq!(scan(text).unwrap().value, "10.1145/3290605.3300233");
    }

    #[test]
    fn test_scan_arxiv_url() {
        let id = scan("mirror: https://arxiv.org/abs/2106.01234v1 (preprint)").unwrap();
        assert_eq!(id.kind, IdKind::Arxiv);
        assert_eq!(id.value, "2106.01234");
    }

    #[test]
    fn test_scan_nothing() {
        assert_eq!(scan("No identifiers in this text, 2023, page 10."), None);
    }
}

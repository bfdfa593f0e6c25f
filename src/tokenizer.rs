// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Text normalization into word tokens.
//!
//! Lowercases, treats every run of non-alphanumeric characters as one
//! separator and splits. Unicode letters and digits are kept, so `Ökonomie`
//! becomes `ökonomie` rather than `konomie`. No stemming.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}\p{M}]+").unwrap());

/// Ordered, non-deduplicated tokens of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Length in characters of the normalized text (tokens joined by single
    /// spaces). This is the document length the relevance score dampens by.
    pub fn text_length(&self) -> usize {
        if self.tokens.is_empty() {
            return 0;
        }
        let chars: usize = self.tokens.iter().map(|t| t.chars().count()).sum();
        chars + self.tokens.len() - 1
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

pub fn tokenize(text: &str) -> TokenSequence {
    let lowered = text.to_lowercase();
    let spaced = SEPARATOR_RUN.replace_all(&lowered, " ");
    let tokens = spaced
        .split_whitespace()
        .map(str::to_string)
        .collect();
    TokenSequence { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).iter().map(str::to_string).collect()
    }

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            words("Prosocial Design-Interventions, (reduce) misinformation!"),
            vec!["prosocial", "design", "interventions", "reduce", "misinformation"]
        );
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ...\n\t--  ").is_empty());
        assert_eq!(tokenize("").text_length(), 0);
    }

    #[test]
    fn test_keeps_multiplicity() {
        let tokens = tokenize("trust, Trust; TRUST");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t == "trust"));
    }

    #[test]
    fn test_unicode_letters_preserved() {
        assert_eq!(words("Ökonomie und Zürich"), vec!["ökonomie", "und", "zürich"]);
    }

    #[test]
    fn test_underscore_is_a_separator() {
        assert_eq!(words("snake_case"), vec!["snake", "case"]);
    }

    #[test]
    fn test_text_length_counts_normalized_characters() {
        let tokens = tokenize("  Prosocial   Design\n\nInterventions reduce misinformation. ");
        assert_eq!(tokens.text_length(), "prosocial design interventions reduce misinformation".len());
    }
}

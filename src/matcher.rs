// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Counting term-list hits in a token sequence.

use std::collections::HashMap;

use crate::terms::TermSet;
use crate::tokenizer::TokenSequence;

/// How many of the most frequent matching terms are kept.
pub const TOP_TERMS: usize = 3;

/// Top matching terms of one document for one term list.
///
/// `term_count` is the sum over `frequency_dist` only. Terms outside the top
/// three do not contribute to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub term_count: usize,
    pub frequency_dist: Vec<(String, usize)>,
}

impl MatchResult {
    /// `term:count` pairs joined for a single table cell.
    pub fn describe(&self) -> String {
        describe_frequencies(&self.frequency_dist)
    }
}

pub fn describe_frequencies(dist: &[(String, usize)]) -> String {
    dist.iter()
        .map(|(term, count)| format!("{term}:{count}"))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn match_terms(tokens: &TokenSequence, word_set: &TermSet) -> MatchResult {
    // first-seen order is kept so the stable sort breaks ties by it
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in tokens.iter().filter(|t| word_set.contains(t)) {
        match index.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_TERMS);

    let frequency_dist: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(term, count)| (term.to_string(), count))
        .collect();
    let term_count = frequency_dist.iter().map(|(_, count)| count).sum();

    MatchResult {
        term_count,
        frequency_dist,
    }
}

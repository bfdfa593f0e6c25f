// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Wordscore: bounded relevance from target/bycatch hit counts.
//!
//! Counts are first normalized by the size of their term list ("chances"),
//! converted from odds to a probability-like ratio, then dampened for short
//! documents:
//!
//! ```text
//! raw        = (pos / pos_chances) / (pos / pos_chances + neg / neg_chances)
//! len_factor = 1 - (pos_chances + neg_chances) / total_length * 0.75
//! wordscore  = max(0, raw * len_factor)
//! ```
//!
//! Degenerate inputs (no hits, empty document, empty lists) score `0.0`.

use crate::terms::TermLists;

pub const LENGTH_WEIGHT: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceCalculator {
    pos_chances: usize,
    neg_chances: usize,
}

impl RelevanceCalculator {
    pub fn new(pos_chances: usize, neg_chances: usize) -> Self {
        Self {
            pos_chances,
            neg_chances,
        }
    }

    pub fn for_lists(lists: &TermLists) -> Self {
        Self::new(lists.target.len(), lists.bycatch.len())
    }

    pub fn score(&self, pos_count: usize, neg_count: usize, total_length: usize) -> f64 {
        if total_length == 0 {
            return 0.0;
        }

        let pos_odds = odds(pos_count, self.pos_chances);
        let neg_odds = odds(neg_count, self.neg_chances);
        let denominator = pos_odds + neg_odds;
        if denominator == 0.0 {
            return 0.0;
        }
        let raw_score = pos_odds / denominator;

        let chances = (self.pos_chances + self.neg_chances) as f64;
        let len_factor = 1.0 - (chances / total_length as f64) * LENGTH_WEIGHT;

        (raw_score * len_factor).max(0.0)
    }
}

fn odds(count: usize, chances: usize) -> f64 {
    if chances == 0 {
        return 0.0;
    }
    count as f64 / chances as f64
}

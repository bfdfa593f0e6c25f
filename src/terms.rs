// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Word lists the scorer matches against.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, WordscoreError};

/// Immutable set of lowercase terms loaded from one word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet {
    terms: HashSet<String>,
}

impl TermSet {
    pub fn contains(&self, token: &str) -> bool {
        self.terms.contains(token)
    }

    /// Number of distinct terms, used as the "chances" denominator.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let terms = iter
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }
}

/// Load a newline-delimited word list. Blank lines are skipped.
pub fn load_term_set(path: &Path) -> Result<TermSet> {
    let contents = fs::read_to_string(path).map_err(|source| WordscoreError::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    let set: TermSet = contents.lines().collect();
    debug!(path = %path.display(), terms = set.len(), "Loaded term list");
    Ok(set)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermCategory {
    Target,
    Bycatch,
    Research,
    Tech,
    Impact,
}

impl TermCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermCategory::Target => "target",
            TermCategory::Bycatch => "bycatch",
            TermCategory::Research => "research",
            TermCategory::Tech => "tech",
            TermCategory::Impact => "impact",
        }
    }
}

impl fmt::Display for TermCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths to the word lists of a run. Target and bycatch are required.
#[derive(Debug, Clone, Default)]
pub struct TermListPaths {
    pub target: PathBuf,
    pub bycatch: PathBuf,
    pub research: Option<PathBuf>,
    pub tech: Option<PathBuf>,
    pub impact: Option<PathBuf>,
}

/// All term sets of a scoring run, shared read-only across documents.
#[derive(Debug, Clone, Default)]
pub struct TermLists {
    pub target: TermSet,
    pub bycatch: TermSet,
    pub auxiliary: Vec<(TermCategory, TermSet)>,
}

impl TermLists {
    pub fn new(target: TermSet, bycatch: TermSet) -> Self {
        Self {
            target,
            bycatch,
            auxiliary: Vec::new(),
        }
    }

    pub fn with_auxiliary(mut self, category: TermCategory, set: TermSet) -> Self {
        self.auxiliary.push((category, set));
        self
    }

    /// Any unreadable list aborts the load.
    pub fn load(paths: &TermListPaths) -> Result<Self> {
        let mut lists = Self::new(load_term_set(&paths.target)?, load_term_set(&paths.bycatch)?);

        let optional = [
            (TermCategory::Research, &paths.research),
            (TermCategory::Tech, &paths.tech),
            (TermCategory::Impact, &paths.impact),
        ];
        for (category, path) in optional {
            if let Some(path) = path {
                lists = lists.with_auxiliary(category, load_term_set(path)?);
            }
        }

        Ok(lists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_list(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_strips_lowercases_and_skips_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_list(dir.path(), "target.txt", "  Prosocial \n\nDESIGN\n   \nmisinformation\r\n");
        let set = load_term_set(&path).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("prosocial"));
        assert!(set.contains("design"));
        assert!(set.contains("misinformation"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_duplicate_lines_collapse() {
        let set: TermSet = ["Trust", "trust", " TRUST "].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_term_set(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, WordscoreError::Resource { .. }));
    }

    #[test]
    fn test_load_bundle_with_auxiliary() {
        let dir = tempfile::tempdir().unwrap();
        let paths = TermListPaths {
            target: write_list(dir.path(), "t.txt", "design\n"),
            bycatch: write_list(dir.path(), "b.txt", "medical\n"),
            tech: Some(write_list(dir.path(), "tech.txt", "app\nplatform\n")),
            ..Default::default()
        };
        let lists = TermLists::load(&paths).unwrap();
        assert_eq!(lists.target.len(), 1);
        assert_eq!(lists.bycatch.len(), 1);
        assert_eq!(lists.auxiliary.len(), 1);
        assert_eq!(lists.auxiliary[0].0, TermCategory::Tech);
        assert_eq!(lists.auxiliary[0].1.len(), 2);
    }

    #[test]
    fn test_missing_auxiliary_list_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = TermListPaths {
            target: write_list(dir.path(), "t.txt", "design\n"),
            bycatch: write_list(dir.path(), "b.txt", "medical\n"),
            impact: Some(dir.path().join("impact.txt")),
            ..Default::default()
        };
        assert!(matches!(
            TermLists::load(&paths),
            Err(WordscoreError::Resource { .. })
        ));
    }
}

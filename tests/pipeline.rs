// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::fs;
use std::path::Path;
use std::time::Duration;

use wordscore::terms::TermListPaths;
use wordscore::{run_batch, Config, InputMode, WordscoreError};

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn term_paths(dir: &Path) -> TermListPaths {
    TermListPaths {
        target: write(dir, "target.txt", "prosocial\ndesign\nmisinformation\n"),
        bycatch: write(dir, "bycatch.txt", "medical\n"),
        research: Some(write(dir, "research.txt", "experiment\nsurvey\n")),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_csv_batch_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "papers.csv",
        "id,title,abstract,doi\n\
         p1,Nudges,Prosocial Design Interventions reduce misinformation,doi:10.1234/ABC.123\n\
         p2,Empty,,\n\
         p3,Medical,\"A medical survey, see https://arxiv.org/abs/2301.12345v2\",\n",
    );
    let output = dir.path().join("results.csv");

    let mut config = Config::new(InputMode::Csv(input), term_paths(dir.path()), &output);
    config.delay = Duration::ZERO;

    let summary = run_batch(&config).await.unwrap();
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.exported, 3);
    assert_eq!(summary.identified, 2);
    assert!(summary.skipped.is_empty());

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    let relevant = &rows[0];
    assert_eq!(&relevant[0], "p1");
    assert_eq!(&relevant[2], "3");
    assert_eq!(&relevant[3], "0");
    assert!(relevant[5].parse::<f64>().unwrap() > 0.5);
    assert_eq!(&relevant[11], "10.1234/abc.123");
    assert_eq!(&relevant[13], "metadata-key");

    let empty = &rows[1];
    assert_eq!(&empty[0], "p2");
    assert_eq!(&empty[2], "0");
    assert_eq!(empty[5].parse::<f64>().unwrap(), 0.0);
    assert_eq!(&empty[11], "");

    let medical = &rows[2];
    assert_eq!(&medical[3], "1");
    assert_eq!(&medical[8], "survey:1");
    assert_eq!(&medical[11], "2301.12345");
    assert_eq!(&medical[12], "arxiv");
    assert_eq!(&medical[13], "body");
}

#[tokio::test]
async fn test_min_score_filters_rows_but_counts_them() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "papers.csv",
        "title,abstract\n\
         Good,Prosocial Design Interventions reduce misinformation\n\
         Off topic,Nothing to see in this abstract\n",
    );
    let output = dir.path().join("results.csv");

    let mut config = Config::new(InputMode::Csv(input), term_paths(dir.path()), &output);
    config.resolve_identifiers = false;
    config.min_score = 0.5;

    let summary = run_batch(&config).await.unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.exported, 1);
    assert_eq!(summary.below_threshold, 1);

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "row-1");
    assert_eq!(&rows[0][11], "");
}

#[tokio::test]
async fn test_bad_pdf_is_skipped_and_reported() {
    let dir = tempfile::tempdir().unwrap();
    let pdfs = dir.path().join("pdfs");
    fs::create_dir(&pdfs).unwrap();
    write(&pdfs, "broken.pdf", "not really a pdf");
    let output = dir.path().join("results.csv");

    let config = Config::new(InputMode::PdfDir(pdfs), term_paths(dir.path()), &output);
    let summary = run_batch(&config).await.unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].document, "broken.pdf");
    assert!(output.exists());
}

#[tokio::test]
async fn test_missing_term_list_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "papers.csv", "title,abstract\nA,text\n");
    let mut terms = term_paths(dir.path());
    terms.bycatch = dir.path().join("missing.txt");

    let config = Config::new(InputMode::Csv(input), terms, dir.path().join("results.csv"));
    let err = run_batch(&config).await.unwrap_err();
    assert!(matches!(err, WordscoreError::Resource { .. }));
}

#[tokio::test]
async fn test_unwritable_output_fails_before_scoring() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "papers.csv", "title,abstract\nA,prosocial design\n");

    let config = Config::new(InputMode::Csv(input), term_paths(dir.path()), dir.path());
    assert!(run_batch(&config).await.is_err());

    let missing = dir.path().join("missing").join("results.csv");
    let config = Config::new(
        InputMode::Csv(dir.path().join("papers.csv")),
        term_paths(dir.path()),
        missing,
    );
    let err = run_batch(&config).await.unwrap_err();
    assert!(matches!(err, WordscoreError::Config(_)));
}

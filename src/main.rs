// ┬ ┬┌─┐┬─┐┌┬┐┌─┐┌─┐┌─┐┬─┐┌─┐
// │││││ │├┬┘ ││└─┐│  │ │├┬┘├┤
// └┴┘└─┘┴└──┴┘└─┘└─┘└─┘┴└─└─┘

// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

// Scores papers against curated word lists, finds their DOI / arXiv id,
// and saves the results to a CSV file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use wordscore::config::SearchConfig;
use wordscore::search::{DEFAULT_ENGINES, DEFAULT_INSTANCE};
use wordscore::terms::TermListPaths;
use wordscore::{run_batch, Config, InputMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Directory of PDF files
    Pdf,
    /// CSV with title/abstract/doi/arxiv columns
    Csv,
}

// CL arguments for config
#[derive(Parser, Debug)]
#[command(author, version, about = "Wordscore: relevance scoring and DOI/arXiv harvesting for papers", long_about = None)]
struct Args {
    /// PDF directory or CSV file, depending on --mode
    input: PathBuf,

    #[arg(short, long, value_enum, default_value = "pdf")]
    mode: Mode,

    #[arg(short, long, default_value = "target_words.txt")]
    target: PathBuf,

    #[arg(short, long, default_value = "bycatch_words.txt")]
    bycatch: PathBuf,

    #[arg(long)]
    research: Option<PathBuf>,

    #[arg(long)]
    tech: Option<PathBuf>,

    #[arg(long)]
    impact: Option<PathBuf>,

    #[arg(short, long, default_value = "results.csv")]
    output: PathBuf,

    #[arg(long, default_value_t = false)]
    no_identifiers: bool,

    #[arg(long, default_value_t = false)]
    web_search: bool,

    #[arg(short, long, default_value = DEFAULT_INSTANCE)]
    instance: String,

    #[arg(short, long, default_value = DEFAULT_ENGINES)]
    engines: String,

    #[arg(long, default_value = "10")]
    max_search_results: usize,

    #[arg(long, default_value = "300")]
    search_chars: usize,

    #[arg(long, default_value_t = false)]
    validate: bool,

    #[arg(long)]
    download_dir: Option<PathBuf>,

    #[arg(long, default_value = "0.0")]
    min_score: f64,

    #[arg(long, default_value = "500")]
    delay_ms: u64,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Config {
        let input = match self.mode {
            Mode::Pdf => InputMode::PdfDir(self.input),
            Mode::Csv => InputMode::Csv(self.input),
        };
        let terms = TermListPaths {
            target: self.target,
            bycatch: self.bycatch,
            research: self.research,
            tech: self.tech,
            impact: self.impact,
        };

        let mut config = Config::new(input, terms, self.output);
        config.resolve_identifiers = !self.no_identifiers;
        config.search = self.web_search.then(|| SearchConfig {
            instance: self.instance,
            engines: self.engines,
            max_results: self.max_search_results,
        });
        config.search_prefix_chars = self.search_chars;
        config.validate = self.validate;
        config.download_dir = self.download_dir;
        config.min_score = self.min_score;
        config.delay = Duration::from_millis(self.delay_ms);
        config
    }
}

// Parse CL arguments, run the batch
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.into_config();

    println!("{}", "=".repeat(64));
    println!("   Wordscore: relevance scoring & identifier harvesting");
    println!("{}", "=".repeat(64));
    println!("\nInput: {}", config.input.path().display());
    println!("Target list: {}", config.terms.target.display());
    println!("Bycatch list: {}", config.terms.bycatch.display());
    println!("Identifiers: {}", if config.resolve_identifiers { "on" } else { "off" });
    if let Some(search) = &config.search {
        println!("Web search: {} ({})", search.instance, search.engines);
    }
    println!("Min score: {:.2}", config.min_score);
    println!("Output: {}\n", config.output.display());

    let summary = run_batch(&config).await?;
    summary.print(&config.output.display().to_string());
    Ok(())
}

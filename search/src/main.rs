use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use loupe_core::config::{DEFAULT_INDEX_DIR, DEFAULT_INPUT_DIR, DEFAULT_STOPWORDS_FILE};
use loupe_core::stopwords::load_stopwords;
use loupe_core::{
    collect_documents, read_shards, score_documents, Config, DocId, DocTable, InvertedIndex,
    Normalizer, Result,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Interactive query shell over a sharded positional index", long_about = None)]
struct Args {
    /// Directory holding shard-*.txt files
    #[arg(long, default_value = DEFAULT_INDEX_DIR)]
    index: PathBuf,
    /// Directory of normalized .txt files; defines doc id ordering
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    docs: PathBuf,
    /// Stopword file
    #[arg(long, default_value = DEFAULT_STOPWORDS_FILE)]
    stopwords: PathBuf,
}

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        tracing::error!("{err}");
        process::exit(err.exit_code());
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config {
        input_dir: args.docs,
        index_dir: args.index,
        stopwords_path: args.stopwords,
        ..Config::default()
    };
    config.validate_for_search()?;

    // The index and doc table are immutable for the rest of the session.
    let index = read_shards(&config.index_dir)?;
    let doc_table = collect_documents(&config.input_dir)?;
    let normalizer = Normalizer::new(load_stopwords(&config.stopwords_path)?);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "Q> ")?;
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            break;
        }
        let query_terms = normalizer.normalize_line(line);
        if query_terms.is_empty() {
            println!("Query contains no valid terms after processing.");
            continue;
        }
        print_top_hits(&query_terms, &index, &doc_table);
    }
    Ok(())
}

fn print_top_hits(query_terms: &[String], index: &InvertedIndex, doc_table: &DocTable) {
    let scores = score_documents(query_terms, index, doc_table);
    let mut ranked: Vec<(DocId, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    println!("Top 10 results:");
    for (rank, (doc_id, score)) in ranked.into_iter().take(10).enumerate() {
        let path = doc_table.path(doc_id).unwrap_or("<unknown>");
        println!("{:2}. {} (score {:.4})", rank + 1, path, score);
    }
}

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use loupe_core::config::{
    DEFAULT_INDEX_DIR, DEFAULT_INPUT_DIR, DEFAULT_NUM_SHARDS, DEFAULT_RAW_INPUT_DIR,
    DEFAULT_STOPWORDS_FILE,
};
use loupe_core::stopwords::load_stopwords;
use loupe_core::{build_index, write_shards, Config, Error, Normalizer, Result};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Normalize a corpus and build the sharded positional index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw text files into the indexable form
    Transform {
        /// Directory of raw .txt files
        #[arg(long, default_value = DEFAULT_RAW_INPUT_DIR)]
        input: PathBuf,
        /// Output directory, mirroring the input tree
        #[arg(long, default_value = DEFAULT_INPUT_DIR)]
        output: PathBuf,
        /// Stopword file, one word per line
        #[arg(long, default_value = DEFAULT_STOPWORDS_FILE)]
        stopwords: PathBuf,
    },
    /// Build the sharded inverted index from normalized files
    Build {
        /// Directory of normalized .txt files
        #[arg(long, default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,
        /// Output directory for shard files
        #[arg(long, default_value = DEFAULT_INDEX_DIR)]
        output: PathBuf,
        /// Number of shard files to partition the index into
        #[arg(long, default_value_t = DEFAULT_NUM_SHARDS)]
        shards: u32,
    },
}

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Transform {
            input,
            output,
            stopwords,
        } => transform(&input, &output, &stopwords),
        Commands::Build {
            input,
            output,
            shards,
        } => build(&input, &output, shards),
    };
    if let Err(err) = result {
        tracing::error!("{err}");
        process::exit(err.exit_code());
    }
}

fn transform(input: &Path, output: &Path, stopwords: &Path) -> Result<()> {
    if !input.is_dir() {
        return Err(Error::NotADirectory(input.to_path_buf()));
    }
    let normalizer = Normalizer::new(load_stopwords(stopwords)?);

    let mut count = 0usize;
    for entry in WalkDir::new(input) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "txt") {
            continue;
        }
        let dest = output.join(path.strip_prefix(input).unwrap_or(path));
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        transform_file(path, &dest, &normalizer)?;
        count += 1;
    }
    tracing::info!(count, output = %output.display(), "corpus normalized");
    Ok(())
}

/// Normalize one document into a single space-joined line of terms.
fn transform_file(src: &Path, dest: &Path, normalizer: &Normalizer) -> Result<()> {
    let reader = BufReader::new(File::open(src)?);
    let mut writer = BufWriter::new(File::create(dest)?);
    let mut first = true;
    for line in reader.lines() {
        for term in normalizer.normalize_line(&line?) {
            if first {
                first = false;
            } else {
                write!(writer, " ")?;
            }
            write!(writer, "{term}")?;
        }
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn build(input: &Path, output: &Path, shards: u32) -> Result<()> {
    let config = Config {
        input_dir: input.to_path_buf(),
        index_dir: output.to_path_buf(),
        num_shards: shards,
        ..Config::default()
    };
    config.validate_for_indexing()?;

    let (index, doc_table) = build_index(&config.input_dir)?;
    write_shards(
        &index,
        &config.index_dir,
        config.num_shards,
        doc_table.len() as u32,
    )?;
    tracing::info!(
        docs = doc_table.len(),
        terms = index.len(),
        shards,
        index_dir = %config.index_dir.display(),
        "sharded index written"
    );
    Ok(())
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Closed error sum for the indexing and retrieval pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Host-supplied configuration is unusable (bad paths, zero shard count).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The corpus root does not exist or is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An index build found no `.txt` files under the corpus root.
    #[error("no .txt files found under {0}")]
    EmptyCorpus(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),

    /// A shard line had a posting section that could not be parsed.
    #[error("malformed shard line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for host CLIs: 2 for configuration problems, which
    /// are detected before any side effect, 1 for I/O and parse failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::NotADirectory(_) | Error::EmptyCorpus(_) => 2,
            Error::Io(_) | Error::Parse { .. } => 1,
        }
    }
}

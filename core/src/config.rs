use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default directory of raw text files fed to the transform step.
pub const DEFAULT_RAW_INPUT_DIR: &str = "input-files";
/// Default directory of normalized `.txt` files.
pub const DEFAULT_INPUT_DIR: &str = "input-transform";
/// Default directory holding the `shard-*.txt` files.
pub const DEFAULT_INDEX_DIR: &str = "inv-index";
/// Default shard count.
pub const DEFAULT_NUM_SHARDS: u32 = 3;
/// Default stopword file path.
pub const DEFAULT_STOPWORDS_FILE: &str = "stopwords.txt";

/// Host-supplied options accepted by the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of normalized `.txt` files to index. Also defines doc id
    /// assignment on the query side.
    pub input_dir: PathBuf,
    /// Directory in which to read or write `shard-*.txt`.
    pub index_dir: PathBuf,
    /// Shard count used when writing; the reader discovers shards by name.
    pub num_shards: u32,
    /// Stopword file, one word per line. A missing file is tolerated.
    pub stopwords_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            index_dir: PathBuf::from(DEFAULT_INDEX_DIR),
            num_shards: DEFAULT_NUM_SHARDS,
            stopwords_path: PathBuf::from(DEFAULT_STOPWORDS_FILE),
        }
    }
}

impl Config {
    /// Checks performed before an index build mutates anything on disk.
    pub fn validate_for_indexing(&self) -> Result<()> {
        if self.num_shards == 0 {
            return Err(Error::Config("num_shards must be positive".into()));
        }
        if !self.input_dir.is_dir() {
            return Err(Error::Config(format!(
                "input_dir is not a directory: {}",
                self.input_dir.display()
            )));
        }
        Ok(())
    }

    /// Checks performed before loading shards for a query session.
    pub fn validate_for_search(&self) -> Result<()> {
        if !self.index_dir.is_dir() {
            return Err(Error::Config(format!(
                "index_dir is not a directory: {}",
                self.index_dir.display()
            )));
        }
        if !self.input_dir.is_dir() {
            return Err(Error::Config(format!(
                "input_dir is not a directory: {}",
                self.input_dir.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_shards_is_invalid_before_any_io() {
        let config = Config {
            num_shards: 0,
            ..Config::default()
        };
        let err = config.validate_for_indexing().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

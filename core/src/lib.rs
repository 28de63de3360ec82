//! Indexing and retrieval core for the Loupe search engine.
//!
//! The pipeline: raw text is normalized ([`Normalizer`]) into lowercase,
//! stopword-free, stemmed terms; a corpus of normalized files becomes a
//! positional inverted index ([`build_index`]); the index is persisted as
//! hash-partitioned shard files ([`write_shards`] / [`read_shards`]); and a
//! loaded index answers free-text queries with a combined tf-idf cosine and
//! positional proximity score ([`score_documents`]).

pub mod config;
pub mod error;
pub mod index;
pub mod normalize;
pub mod rank;
pub mod shard;
pub mod stopwords;

pub use config::Config;
pub use error::{Error, Result};
pub use index::{build_index, collect_documents, DocId, DocTable, InvertedIndex, Posting};
pub use normalize::Normalizer;
pub use rank::score_documents;
pub use shard::{read_shards, write_shards};

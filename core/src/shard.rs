use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::index::{InvertedIndex, Posting};

pub const SHARD_PREFIX: &str = "shard-";
const META_FILE: &str = "meta.json";
const FORMAT_VERSION: u32 = 1;

/// Sidecar metadata written next to the shards. The reader discovers shards
/// by filename and never recomputes hash assignments, so this file is
/// informational: it records which hash produced the partitioning.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShardMeta {
    pub version: u32,
    pub num_shards: u32,
    pub hash: String,
    pub num_docs: u32,
}

/// Deterministic term-to-shard assignment: the std `DefaultHasher` (SipHash
/// with fixed keys, stable across processes) modulo the shard count.
fn shard_id(term: &str, num_shards: u32) -> u32 {
    let mut hasher = DefaultHasher::new();
    term.hash(&mut hasher);
    (hasher.finish() % num_shards as u64) as u32
}

/// Write the index as `shard-0.txt` .. `shard-{N-1}.txt` under `dir`,
/// creating the directory if absent. One line per term:
/// `<term> <doc>:<tf>:<pos>,<pos>...(;<doc>:...)*`, terms in lexicographic
/// order, so two writes of equal indexes are byte-identical.
pub fn write_shards(
    index: &InvertedIndex,
    dir: &Path,
    num_shards: u32,
    num_docs: u32,
) -> Result<()> {
    if num_shards == 0 {
        return Err(Error::Config("num_shards must be positive".into()));
    }
    fs::create_dir_all(dir)?;
    let mut writers = Vec::with_capacity(num_shards as usize);
    for i in 0..num_shards {
        let file = File::create(dir.join(format!("{SHARD_PREFIX}{i}.txt")))?;
        writers.push(BufWriter::new(file));
    }

    for (term, postings) in index.iter() {
        let writer = &mut writers[shard_id(term, num_shards) as usize];
        write!(writer, "{term} ")?;
        for (i, posting) in postings.iter().enumerate() {
            if i > 0 {
                write!(writer, ";")?;
            }
            let positions = posting
                .positions
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            write!(writer, "{}:{}:{}", posting.doc_id, posting.term_freq, positions)?;
        }
        writeln!(writer)?;
    }
    for mut writer in writers {
        writer.flush()?;
    }

    let meta = ShardMeta {
        version: FORMAT_VERSION,
        num_shards,
        hash: "siphash13/std-default-hasher".into(),
        num_docs,
    };
    let json = serde_json::to_string_pretty(&meta).map_err(io::Error::from)?;
    fs::write(dir.join(META_FILE), json)?;
    Ok(())
}

/// Load every `shard-*` file in `dir` into one in-memory index. A line with
/// no space separator is skipped; anything after the separator must parse or
/// the whole load fails and no partial index is returned.
pub fn read_shards(dir: &Path) -> Result<InvertedIndex> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    let mut index = InvertedIndex::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(SHARD_PREFIX) || !entry.file_type()?.is_file() {
            continue;
        }
        read_shard_file(&entry.path(), name, &mut index)?;
    }
    tracing::info!(terms = index.len(), "index loaded");
    Ok(index)
}

fn read_shard_file(path: &Path, name: &str, index: &mut InvertedIndex) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let Some((term, rest)) = line.split_once(' ') else {
            continue;
        };
        let postings = parse_posting_list(rest).map_err(|reason| Error::Parse {
            file: name.to_string(),
            line: line_no + 1,
            reason,
        })?;
        index.insert_list(term.to_string(), postings);
    }
    Ok(())
}

fn parse_posting_list(s: &str) -> std::result::Result<Vec<Posting>, String> {
    let mut postings = Vec::new();
    for part in s.split(';') {
        let mut fields = part.splitn(3, ':');
        let doc_id = parse_u32(fields.next(), "doc id")?;
        let term_freq = parse_u32(fields.next(), "term frequency")?;
        let pos_field = fields.next().unwrap_or("");
        if pos_field.is_empty() {
            return Err("empty position list".into());
        }
        let mut positions = Vec::with_capacity(term_freq as usize);
        for pos in pos_field.split(',') {
            positions.push(parse_u32(Some(pos), "position")?);
        }
        postings.push(Posting {
            doc_id,
            term_freq,
            positions,
        });
    }
    Ok(postings)
}

fn parse_u32(field: Option<&str>, what: &str) -> std::result::Result<u32, String> {
    let field = field
        .filter(|f| !f.is_empty())
        .ok_or_else(|| format!("missing {what}"))?;
    field
        .parse::<u32>()
        .map_err(|_| format!("invalid {what}: {field:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_assignment_is_deterministic() {
        for term in ["market", "share", "predict"] {
            assert_eq!(shard_id(term, 3), shard_id(term, 3));
            assert!(shard_id(term, 3) < 3);
        }
    }

    #[test]
    fn posting_list_parse_rejects_missing_fields() {
        assert!(parse_posting_list("1:2:4,6").is_ok());
        assert!(parse_posting_list("1:2").is_err());
        assert!(parse_posting_list("1:2:").is_err());
        assert!(parse_posting_list("1:x:4").is_err());
        assert!(parse_posting_list("").is_err());
    }
}

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Error, Result};

pub type DocId = u32;

lazy_static! {
    static ref TERM_RE: Regex = Regex::new(r"[a-z0-9]+").expect("valid regex");
}

/// One term's occurrences in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    /// Always equals `positions.len()`.
    pub term_freq: u32,
    /// 1-based token ordinals within the document, strictly increasing.
    /// Only emitted terms advance the ordinal.
    pub positions: Vec<u32>,
}

/// Positional inverted index. Terms iterate in lexicographic order so shard
/// output is deterministic; posting lists are ascending by `doc_id`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    terms: BTreeMap<String, Vec<Posting>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.terms.get(term).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Posting])> {
        self.terms.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    /// Record one occurrence of `term` at `position` in `doc_id`. Documents
    /// are visited in ascending id order, so appending keeps posting lists
    /// sorted and each doc id appears in at most one posting per term.
    pub fn record(&mut self, term: &str, doc_id: DocId, position: u32) {
        if let Some(postings) = self.terms.get_mut(term) {
            match postings.last_mut() {
                Some(last) if last.doc_id == doc_id => {
                    last.term_freq += 1;
                    last.positions.push(position);
                }
                _ => postings.push(Posting {
                    doc_id,
                    term_freq: 1,
                    positions: vec![position],
                }),
            }
        } else {
            self.terms.insert(
                term.to_string(),
                vec![Posting {
                    doc_id,
                    term_freq: 1,
                    positions: vec![position],
                }],
            );
        }
    }

    /// Install a fully parsed posting list, replacing any previous entry for
    /// `term`. Duplicate terms across shards overwrite.
    pub fn insert_list(&mut self, term: String, postings: Vec<Posting>) {
        self.terms.insert(term, postings);
    }
}

/// Document table: 1-based `doc_id` to display path. Ids are assigned by
/// walking the corpus, keeping regular `.txt` files, and sorting full paths
/// in byte order; the indexing and query sides must agree on this ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTable {
    paths: Vec<String>,
}

impl DocTable {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Display path for `doc_id`, relative to the corpus root.
    pub fn path(&self, doc_id: DocId) -> Option<&str> {
        doc_id
            .checked_sub(1)
            .and_then(|i| self.paths.get(i as usize))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &str)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(i, p)| (i as DocId + 1, p.as_str()))
    }
}

fn corpus_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(Error::NotADirectory(folder.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(folder) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if entry.file_type().is_file()
            && entry.path().extension().map_or(false, |ext| ext == "txt")
        {
            files.push(entry.path().to_path_buf());
        }
    }
    if files.is_empty() {
        return Err(Error::EmptyCorpus(folder.to_path_buf()));
    }
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(files)
}

fn doc_table_from(folder: &Path, files: &[PathBuf]) -> DocTable {
    let paths = files
        .iter()
        .map(|p| {
            p.strip_prefix(folder)
                .unwrap_or(p)
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    DocTable { paths }
}

/// Build the doc table alone. The query side uses this to mirror the
/// indexer's id assignment exactly.
pub fn collect_documents(folder: &Path) -> Result<DocTable> {
    let files = corpus_files(folder)?;
    Ok(doc_table_from(folder, &files))
}

/// Walk `folder`, assign 1-based doc ids in sorted path order, and build the
/// positional index. Input is assumed to be pre-normalized: lines are
/// lowercased and split on runs of non-alphanumerics, but never re-stemmed
/// or stopword-filtered here.
pub fn build_index(folder: &Path) -> Result<(InvertedIndex, DocTable)> {
    let files = corpus_files(folder)?;
    let doc_table = doc_table_from(folder, &files);
    let mut index = InvertedIndex::new();
    for (i, path) in files.iter().enumerate() {
        index_file(path, i as DocId + 1, &mut index)?;
    }
    tracing::info!(docs = doc_table.len(), terms = index.len(), "index built");
    Ok((index, doc_table))
}

fn index_file(path: &Path, doc_id: DocId, index: &mut InvertedIndex) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    let mut position = 0u32;
    for line in reader.lines() {
        let lowered = line?.to_lowercase();
        for mat in TERM_RE.find_iter(&lowered) {
            position += 1;
            index.record(mat.as_str(), doc_id, position);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_to_last_posting_of_same_doc() {
        let mut index = InvertedIndex::new();
        index.record("market", 1, 3);
        index.record("market", 1, 11);
        index.record("market", 2, 4);
        let postings = index.postings("market").unwrap();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].term_freq, 2);
        assert_eq!(postings[0].positions, vec![3, 11]);
        assert_eq!(postings[1].term_freq, 1);
    }

    #[test]
    fn doc_table_ids_are_one_based() {
        let table = DocTable {
            paths: vec!["a.txt".into(), "b.txt".into()],
        };
        assert_eq!(table.path(1), Some("a.txt"));
        assert_eq!(table.path(2), Some("b.txt"));
        assert_eq!(table.path(0), None);
        assert_eq!(table.path(3), None);
    }
}

use std::collections::HashMap;

use crate::index::{DocId, DocTable, InvertedIndex, Posting};

/// Score every document matching at least one query term: truncated-cosine
/// tf-idf similarity plus a positional proximity bonus. `query_terms` must
/// already be normalized; callers pass the output of
/// [`crate::Normalizer::normalize_line`] unchanged.
///
/// The index is only read, so a loaded index may be scored from several
/// threads at once.
pub fn score_documents(
    query_terms: &[String],
    index: &InvertedIndex,
    doc_table: &DocTable,
) -> HashMap<DocId, f64> {
    let num_docs = doc_table.len() as f64;

    // idf = log10(N / df) per distinct query term present in the index.
    // Absent terms are dropped here and contribute to neither component.
    let mut idf: HashMap<&str, f64> = HashMap::new();
    // Sparse document vectors over query-term support only: doc id ->
    // (term -> tf-idf weight).
    let mut doc_weights: HashMap<DocId, HashMap<&str, f64>> = HashMap::new();

    for term in query_terms {
        let term = term.as_str();
        if idf.contains_key(term) {
            continue;
        }
        let Some(postings) = index.postings(term) else {
            continue;
        };
        let term_idf = (num_docs / postings.len() as f64).log10();
        idf.insert(term, term_idf);
        for posting in postings {
            let weight = (1.0 + (posting.term_freq as f64).log10()) * term_idf;
            doc_weights
                .entry(posting.doc_id)
                .or_default()
                .insert(term, weight);
        }
    }

    // Query vector over the same support, with log-weighted raw counts.
    let mut query_freq: HashMap<&str, u32> = HashMap::new();
    for term in query_terms {
        *query_freq.entry(term.as_str()).or_insert(0) += 1;
    }
    let mut query_weights: HashMap<&str, f64> = HashMap::new();
    for (term, freq) in &query_freq {
        if let Some(term_idf) = idf.get(term) {
            query_weights.insert(*term, (1.0 + (*freq as f64).log10()) * term_idf);
        }
    }

    let proximity = proximity_scores(query_terms, index, &doc_weights);

    let mut scores = HashMap::with_capacity(doc_weights.len());
    for (doc_id, weights) in &doc_weights {
        let score = cosine(weights, &query_weights)
            + proximity.get(doc_id).copied().unwrap_or(0.0);
        scores.insert(*doc_id, score);
    }
    scores
}

/// Truncated cosine: both vectors range over query terms only, so the
/// document norm deliberately ignores the document's non-query terms. Zero
/// when either norm vanishes.
fn cosine(doc_weights: &HashMap<&str, f64>, query_weights: &HashMap<&str, f64>) -> f64 {
    let mut dot = 0.0;
    for (term, query_weight) in query_weights {
        if let Some(doc_weight) = doc_weights.get(term) {
            dot += doc_weight * query_weight;
        }
    }
    let doc_norm = doc_weights.values().map(|w| w * w).sum::<f64>().sqrt();
    let query_norm = query_weights.values().map(|w| w * w).sum::<f64>().sqrt();
    if doc_norm == 0.0 || query_norm == 0.0 {
        return 0.0;
    }
    dot / (doc_norm * query_norm)
}

/// For each adjacent query-term pair, in query order, add
/// `1 / shortest_distance` for every candidate document containing both
/// terms, then average over the number of pairs. A distance of zero (an
/// identical adjacent pair) contributes nothing.
fn proximity_scores(
    query_terms: &[String],
    index: &InvertedIndex,
    doc_weights: &HashMap<DocId, HashMap<&str, f64>>,
) -> HashMap<DocId, f64> {
    let mut raw: HashMap<DocId, f64> = HashMap::new();
    if query_terms.len() < 2 {
        return raw;
    }
    for pair in query_terms.windows(2) {
        let (Some(first), Some(second)) = (index.postings(&pair[0]), index.postings(&pair[1]))
        else {
            continue;
        };
        let first_by_doc = by_doc(first);
        let second_by_doc = by_doc(second);
        for doc_id in doc_weights.keys() {
            let (Some(a), Some(b)) = (first_by_doc.get(doc_id), second_by_doc.get(doc_id))
            else {
                continue;
            };
            if let Some(distance) = shortest_distance(&a.positions, &b.positions) {
                if distance > 0 {
                    *raw.entry(*doc_id).or_insert(0.0) += 1.0 / distance as f64;
                }
            }
        }
    }
    let pairs = (query_terms.len() - 1) as f64;
    raw.values_mut().for_each(|score| *score /= pairs);
    raw
}

/// Immutable doc-id lookup view over a posting list.
fn by_doc(postings: &[Posting]) -> HashMap<DocId, &Posting> {
    postings.iter().map(|p| (p.doc_id, p)).collect()
}

/// Shortest absolute distance between two sorted position lists, by a
/// two-pointer sweep. `None` when either list is empty.
fn shortest_distance(a: &[u32], b: &[u32]) -> Option<u32> {
    let (mut i, mut j) = (0, 0);
    let mut min: Option<u32> = None;
    while i < a.len() && j < b.len() {
        let diff = a[i].abs_diff(b[j]);
        min = Some(min.map_or(diff, |m| m.min(diff)));
        if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    min
}

use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::stopwords;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z0-9]+").expect("valid regex");
}

/// Text normalizer applied identically at index time and query time.
///
/// Pipeline per line: NFKC fold, lowercase, split on runs of characters
/// outside `[a-z0-9]`, drop tokens shorter than two characters, drop
/// stopwords, Porter-stem the survivors.
pub struct Normalizer {
    stopwords: HashSet<String>,
    stemmer: Stemmer,
}

impl Normalizer {
    /// The stopword set is fixed at construction and never mutated.
    pub fn new(stopwords: HashSet<String>) -> Self {
        Self {
            stopwords,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    pub fn with_default_stopwords() -> Self {
        Self::new(stopwords::default_stopwords())
    }

    /// Normalize one line of raw text into index terms. Infallible; an empty
    /// result is valid. Token boundaries never span newlines, so applying
    /// this line by line is equivalent to normalizing the whole document.
    pub fn normalize_line(&self, raw: &str) -> Vec<String> {
        let folded = raw.nfkc().collect::<String>().to_lowercase();
        let mut terms = Vec::new();
        for mat in TOKEN_RE.find_iter(&folded) {
            let token = mat.as_str();
            if token.len() < 2 {
                continue;
            }
            if self.stopwords.contains(token) {
                continue;
            }
            terms.push(self.stemmer.stem(token).to_string());
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_related_forms_together() {
        let normalizer = Normalizer::with_default_stopwords();
        let terms = normalizer.normalize_line("Marketing markets market!");
        assert_eq!(terms, vec!["market"; 3]);
    }

    #[test]
    fn punctuation_splits_tokens() {
        let normalizer = Normalizer::with_default_stopwords();
        assert_eq!(
            normalizer.normalize_line("price-cut (volume)"),
            vec!["price", "cut", "volum"]
        );
    }
}

//! TF-IDF vectorisation over normalised message text.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SpamError};

static TERM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Hyper-parameters of the vectorizer searched during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfidfParams {
    /// Inclusive word n-gram range.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            ngram_range: (1, 1),
            min_df: 1,
        }
    }
}

impl TfidfParams {
    /// Learn the vocabulary and IDF table from a corpus of normalised documents.
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfVectorizer> {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = analyze(doc.as_ref(), self.ngram_range)
                .into_iter()
                .collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::new();
        for (term, df) in doc_freq {
            if df < self.min_df {
                continue;
            }
            vocabulary.insert(term, idf.len());
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }
        if vocabulary.is_empty() {
            return Err(SpamError::EmptyVocabulary);
        }
        debug!(terms = vocabulary.len(), params = ?self, "fitted tfidf vocabulary");

        Ok(TfidfVectorizer {
            params: *self,
            vocabulary,
            idf,
        })
    }
}

/// Sparse row with strictly increasing indices into the fitted vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub dim: usize,
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(idx, value)| weights.get(*idx).copied().unwrap_or(0.0) * value)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fitted vocabulary and IDF weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    params: TfidfParams,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Number of features, fixed at fit time.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// L2-normalised TF-IDF weights; out-of-vocabulary terms contribute nothing.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in analyze(document, self.params.ngram_range) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut entries {
                *value /= norm;
            }
        }
        SparseVector {
            dim: self.dimension(),
            entries,
        }
    }

    /// Dense design matrix for a batch of documents, one row per document.
    pub fn transform_dense<S: AsRef<str>>(&self, documents: &[S]) -> Array2<f64> {
        let mut matrix = Array2::zeros((documents.len(), self.dimension()));
        for (row, doc) in documents.iter().enumerate() {
            for (col, value) in self.transform(doc.as_ref()).entries {
                matrix[[row, col]] = value;
            }
        }
        matrix
    }
}

/// Split a document into the word n-grams counted by the vectorizer.
fn analyze(document: &str, (min_n, max_n): (usize, usize)) -> Vec<String> {
    let lowered = document.to_lowercase();
    let tokens: Vec<&str> = TERM_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();
    let min_n = min_n.max(1);
    let mut terms = Vec::new();
    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bigrams_extend_vocabulary() {
        let docs = ["free prize now", "meet you now"];
        let unigrams = TfidfParams::default().fit(&docs).unwrap();
        let bigrams = TfidfParams {
            ngram_range: (1, 2),
            min_df: 1,
        }
        .fit(&docs)
        .unwrap();
        assert_eq!(unigrams.dimension(), 5);
        assert_eq!(bigrams.dimension(), 9);
        assert!(bigrams.vocabulary().contains_key("free prize"));
    }

    #[test]
    fn min_df_drops_rare_terms() {
        let docs = ["win cash", "win prize", "hello there"];
        let vectorizer = TfidfParams {
            ngram_range: (1, 1),
            min_df: 2,
        }
        .fit(&docs)
        .unwrap();
        assert_eq!(vectorizer.dimension(), 1);
        assert!(vectorizer.vocabulary().contains_key("win"));
    }

    #[test]
    fn rows_are_unit_length() {
        let docs = ["win cash win", "hello friend"];
        let vectorizer = TfidfParams::default().fit(&docs).unwrap();
        let row = vectorizer.transform("win cash");
        let norm: f64 = row.entries.iter().map(|(_, v)| v * v).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_terms_yield_empty_row() {
        let vectorizer = TfidfParams::default().fit(&["win cash"]).unwrap();
        let row = vectorizer.transform("completely unseen words");
        assert!(row.is_empty());
        assert_eq!(row.dim, 2);
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        let result = TfidfParams {
            ngram_range: (1, 1),
            min_df: 3,
        }
        .fit(&["a b", "c d"]);
        assert!(matches!(result, Err(SpamError::EmptyVocabulary)));
    }
}

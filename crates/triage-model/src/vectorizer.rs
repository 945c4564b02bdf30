//! TF-IDF vectorization with a vocabulary frozen at training time.
//!
//! `TfidfVectorizer` is the unfitted configuration; fitting it on a corpus
//! produces a `FittedVectorizer`, the only type with a `transform` method.
//! Inference must reuse the exact fitted instance from training — refitting
//! on new data would silently desynchronize the feature space from the
//! classifier's weights. Making `transform` unavailable before `fit` keeps
//! that ordering a compile-time property.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::tokenizer::{ngram_terms, tokenize};

/// Default vocabulary cap, matching the trained production model.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Default n-gram range upper bound (unigrams and bigrams).
pub const DEFAULT_NGRAM_MAX: usize = 2;

/// A sparse feature vector: (vocabulary index, weight) pairs sorted by
/// index, zero entries omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Computes the L2 norm of the vector.
    pub fn magnitude(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scales all weights so the vector has unit L2 norm. A zero vector
    /// stays zero.
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        if mag > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= mag;
            }
        }
    }

    /// Checks whether the vector has no non-zero entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unfitted TF-IDF vectorizer configuration.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    ngram_max: usize,
}

impl TfidfVectorizer {
    /// Creates a vectorizer with the default configuration
    /// (5000 features, unigrams + bigrams).
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_max: DEFAULT_NGRAM_MAX,
        }
    }

    /// Sets the maximum vocabulary size.
    pub fn max_features(mut self, max: usize) -> Self {
        self.max_features = max;
        self
    }

    /// Sets the n-gram range upper bound.
    pub fn ngram_max(mut self, max: usize) -> Self {
        self.ngram_max = max;
        self
    }

    /// Learns a vocabulary and IDF weights from the training corpus.
    ///
    /// The vocabulary is built from all n-gram terms across the corpus
    /// and capped at the `max_features` terms with the highest total
    /// corpus frequency (ties broken lexicographically). Selected terms
    /// are then indexed in alphabetical order so the mapping is stable.
    pub fn fit(&self, documents: &[String]) -> FittedVectorizer {
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            let terms = ngram_terms(&tokens, self.ngram_max);

            let mut seen_in_doc: HashSet<&str> = HashSet::new();
            for term in &terms {
                *term_freq.entry(term.clone()).or_insert(0) += 1;
                if seen_in_doc.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        // Cap the vocabulary by total corpus frequency.
        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        // Alphabetical order for stable, reproducible indices.
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let document_count = documents.len();
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());

        for (index, (term, _)) in ranked.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0);
            idf.push(smooth_idf(document_count, df));
            vocabulary.insert(term, index);
        }

        tracing::debug!(
            terms = vocabulary.len(),
            documents = document_count,
            "fitted TF-IDF vocabulary"
        );

        FittedVectorizer {
            vocabulary,
            idf,
            ngram_max: self.ngram_max,
            document_count,
        }
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`.
///
/// The +1 smoothing acts as if one extra document contained every term,
/// so no weight is ever zero or divides by zero.
fn smooth_idf(document_count: usize, document_frequency: usize) -> f64 {
    ((1.0 + document_count as f64) / (1.0 + document_frequency as f64)).ln() + 1.0
}

/// A vectorizer fitted on a training corpus. The vocabulary and IDF
/// weights are frozen; serialized as a model artifact and reloaded
/// unchanged at service startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedVectorizer {
    /// Term to feature-index mapping.
    vocabulary: HashMap<String, usize>,
    /// IDF weight per feature index.
    idf: Vec<f64>,
    /// N-gram range upper bound used at fit time.
    ngram_max: usize,
    /// Number of documents the vocabulary was fitted on.
    document_count: usize,
}

impl FittedVectorizer {
    /// Number of features (vocabulary size).
    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// Number of documents seen at fit time.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Converts text into an L2-normalized TF-IDF vector.
    ///
    /// Out-of-vocabulary terms contribute zero weight; text consisting
    /// entirely of unseen terms yields an empty (all-zero) vector, never
    /// an error.
    pub fn transform(&self, text: &str) -> SparseVector {
        let tokens = tokenize(text);
        let terms = ngram_terms(&tokens, self.ngram_max);

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for term in &terms {
            if let Some(&index) = self.vocabulary.get(term.as_str()) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count as f64 * self.idf[index]))
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let mut vector = SparseVector { entries };
        vector.normalize();
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "train delayed by four hours".to_string(),
            "train cancelled without notice".to_string(),
            "dirty toilet no water".to_string(),
            "refund not received for cancelled ticket".to_string(),
        ]
    }

    #[test]
    fn fit_builds_vocabulary_with_bigrams() {
        let fitted = TfidfVectorizer::new().fit(&corpus());
        assert!(fitted.vocabulary_len() > 0);
        assert!(fitted.vocabulary.contains_key("train"));
        assert!(fitted.vocabulary.contains_key("train delayed"));
    }

    #[test]
    fn max_features_caps_vocabulary() {
        let fitted = TfidfVectorizer::new().max_features(5).fit(&corpus());
        assert_eq!(fitted.vocabulary_len(), 5);
    }

    #[test]
    fn transform_is_unit_length() {
        let fitted = TfidfVectorizer::new().fit(&corpus());
        let vector = fitted.transform("train delayed again");
        assert!((vector.magnitude() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn transform_of_unseen_text_is_empty_not_error() {
        let fitted = TfidfVectorizer::new().fit(&corpus());
        let vector = fitted.transform("zzz qqq unrelated gibberish");
        assert!(vector.is_empty());
    }

    #[test]
    fn transform_entries_are_sorted_by_index() {
        let fitted = TfidfVectorizer::new().fit(&corpus());
        let vector = fitted.transform("refund for cancelled train ticket");
        let indices: Vec<usize> = vector.entries.iter().map(|(i, _)| *i).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn vocabulary_is_stable_across_fits() {
        let a = TfidfVectorizer::new().fit(&corpus());
        let b = TfidfVectorizer::new().fit(&corpus());
        assert_eq!(a.vocabulary, b.vocabulary);
        assert_eq!(a.idf, b.idf);
    }

    #[test]
    fn fitted_vectorizer_round_trips_through_json() {
        let fitted = TfidfVectorizer::new().fit(&corpus());
        let json = serde_json::to_string(&fitted).unwrap();
        let parsed: FittedVectorizer = serde_json::from_str(&json).unwrap();

        let text = "train cancelled and refund pending";
        assert_eq!(fitted.transform(text), parsed.transform(text));
    }

    #[test]
    fn smooth_idf_never_zero() {
        // Term present in every document still gets a positive weight.
        assert!(smooth_idf(10, 10) > 0.0);
        assert!(smooth_idf(0, 0) >= 1.0);
    }
}

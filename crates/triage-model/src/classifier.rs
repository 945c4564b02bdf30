//! Multinomial logistic regression over sparse TF-IDF vectors.
//!
//! `LogisticRegression` holds the training hyperparameters; fitting
//! produces a `FittedModel` holding per-class weight rows and intercepts.
//! Training is full-batch gradient descent on the softmax cross-entropy
//! loss with L2 regularization and a bounded epoch count. Training is an
//! offline batch operation, never invoked on the request path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use triage_core::Prediction;

use crate::error::{ModelError, ModelResult};
use crate::vectorizer::SparseVector;

/// Default bound on gradient-descent epochs.
pub const DEFAULT_EPOCHS: usize = 200;

/// Training configuration for multinomial logistic regression.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    epochs: usize,
    learning_rate: f64,
    l2: f64,
    tolerance: f64,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            learning_rate: 0.5,
            l2: 1e-4,
            tolerance: 1e-6,
        }
    }

    /// Sets the maximum number of epochs.
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Sets the gradient-descent step size.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the L2 regularization strength.
    pub fn l2(mut self, l2: f64) -> Self {
        self.l2 = l2;
        self
    }

    /// Fits the model on feature vectors and their department labels.
    ///
    /// `n_features` is the vectorizer's vocabulary size; every entry index
    /// in `rows` must be below it. Labels are sorted lexicographically to
    /// fix the class order.
    pub fn fit(
        &self,
        n_features: usize,
        rows: &[SparseVector],
        labels: &[String],
    ) -> ModelResult<FittedModel> {
        if rows.len() != labels.len() {
            return Err(ModelError::TrainingShape {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if classes.len() < 2 {
            return Err(ModelError::TooFewClasses {
                found: classes.len(),
            });
        }

        let targets: Vec<usize> = labels
            .iter()
            .map(|label| classes.binary_search(label).expect("label in class set"))
            .collect();

        let n_classes = classes.len();
        let n = rows.len() as f64;
        let mut weights = vec![0.0; n_classes * n_features];
        let mut intercepts = vec![0.0; n_classes];

        let mut grad_w = vec![0.0; n_classes * n_features];
        let mut grad_b = vec![0.0; n_classes];
        let mut previous_loss = f64::INFINITY;

        for epoch in 0..self.epochs {
            grad_w.iter_mut().for_each(|g| *g = 0.0);
            grad_b.iter_mut().for_each(|g| *g = 0.0);
            let mut loss = 0.0;

            for (row, &target) in rows.iter().zip(&targets) {
                let probs = softmax(&raw_scores(&weights, &intercepts, n_features, row));
                loss -= probs[target].max(f64::MIN_POSITIVE).ln();

                for (class, &p) in probs.iter().enumerate() {
                    let g = p - if class == target { 1.0 } else { 0.0 };
                    grad_b[class] += g;
                    let base = class * n_features;
                    for &(index, value) in &row.entries {
                        grad_w[base + index] += g * value;
                    }
                }
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= self.learning_rate * (g / n + self.l2 * *w);
            }
            for (b, g) in intercepts.iter_mut().zip(&grad_b) {
                *b -= self.learning_rate * g / n;
            }

            let mean_loss = loss / n;
            if (previous_loss - mean_loss).abs() < self.tolerance {
                tracing::debug!(epoch, mean_loss, "converged early");
                break;
            }
            previous_loss = mean_loss;
        }

        tracing::debug!(
            classes = n_classes,
            features = n_features,
            samples = rows.len(),
            "fitted logistic regression"
        );

        Ok(FittedModel {
            classes,
            weights,
            intercepts,
            n_features,
        })
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-sample class scores before softmax.
fn raw_scores(
    weights: &[f64],
    intercepts: &[f64],
    n_features: usize,
    row: &SparseVector,
) -> Vec<f64> {
    intercepts
        .iter()
        .enumerate()
        .map(|(class, &b)| {
            let base = class * n_features;
            b + row
                .entries
                .iter()
                .map(|&(index, value)| weights[base + index] * value)
                .sum::<f64>()
        })
        .collect()
}

/// Numerically stable softmax.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// A trained classifier: one weight row and intercept per department
/// class. Serialized as a model artifact and reloaded unchanged at
/// service startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModel {
    /// Class labels in lexicographic order; index is the class id.
    classes: Vec<String>,
    /// Flattened weight matrix, `classes.len() * n_features`.
    weights: Vec<f64>,
    /// Per-class intercepts.
    intercepts: Vec<f64>,
    /// Feature dimension the model was trained with.
    n_features: usize,
}

impl FittedModel {
    /// The trained department labels, lexicographically ordered.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Feature dimension the model expects.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Softmax probabilities per class, in `classes()` order.
    pub fn probabilities(&self, row: &SparseVector) -> Vec<f64> {
        softmax(&raw_scores(
            &self.weights,
            &self.intercepts,
            self.n_features,
            row,
        ))
    }

    /// The single best label for a feature vector.
    ///
    /// Ties break toward the lexicographically smallest label: the class
    /// list is sorted at fit time and the scan keeps the first maximum.
    pub fn predict(&self, row: &SparseVector) -> &str {
        let probs = self.probabilities(row);
        let mut best = 0;
        for (class, &p) in probs.iter().enumerate() {
            if p > probs[best] {
                best = class;
            }
        }
        &self.classes[best]
    }

    /// The top `k` labels with their softmax probabilities, best first.
    pub fn predict_topk(&self, row: &SparseVector, k: usize) -> Vec<Prediction> {
        let probs = self.probabilities(row);
        let mut ranked: Vec<(usize, f64)> = probs.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
            .into_iter()
            .take(k)
            .map(|(class, score)| Prediction {
                department: self.classes[class].clone(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::TfidfVectorizer;

    fn fixture() -> (Vec<SparseVector>, Vec<String>, crate::FittedVectorizer) {
        let texts: Vec<String> = vec![
            "train delayed by four hours".into(),
            "train running late no announcement".into(),
            "delay of three hours at junction".into(),
            "dirty toilet no water in coach".into(),
            "washroom very dirty and smelly".into(),
            "no water in toilet".into(),
        ];
        let labels: Vec<String> = vec![
            "Punctuality".into(),
            "Punctuality".into(),
            "Punctuality".into(),
            "Cleanliness".into(),
            "Cleanliness".into(),
            "Cleanliness".into(),
        ];
        let vectorizer = TfidfVectorizer::new().fit(&texts);
        let rows: Vec<SparseVector> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        (rows, labels, vectorizer)
    }

    #[test]
    fn fit_learns_separable_classes() {
        let (rows, labels, vectorizer) = fixture();
        let model = LogisticRegression::new()
            .fit(vectorizer.vocabulary_len(), &rows, &labels)
            .unwrap();

        assert_eq!(model.classes(), &["Cleanliness", "Punctuality"]);
        assert_eq!(
            model.predict(&vectorizer.transform("train delayed by 4 hours")),
            "Punctuality"
        );
        assert_eq!(
            model.predict(&vectorizer.transform("very dirty toilet")),
            "Cleanliness"
        );
    }

    #[test]
    fn probabilities_sum_to_one() {
        let (rows, labels, vectorizer) = fixture();
        let model = LogisticRegression::new()
            .fit(vectorizer.vocabulary_len(), &rows, &labels)
            .unwrap();

        let probs = model.probabilities(&vectorizer.transform("train late"));
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn topk_is_sorted_and_bounded() {
        let (rows, labels, vectorizer) = fixture();
        let model = LogisticRegression::new()
            .fit(vectorizer.vocabulary_len(), &rows, &labels)
            .unwrap();

        let top = model.predict_topk(&vectorizer.transform("delayed train"), 3);
        assert_eq!(top.len(), 2); // only two trained classes
        assert!(top[0].score >= top[1].score);
        assert_eq!(top[0].department, "Punctuality");
    }

    #[test]
    fn exact_ties_break_to_lexicographically_smallest_class() {
        let model = FittedModel {
            classes: vec!["Cleanliness".to_string(), "Punctuality".to_string()],
            weights: vec![0.0; 2 * 4],
            intercepts: vec![0.0, 0.0],
            n_features: 4,
        };

        let prediction = model.predict(&SparseVector::default());
        assert_eq!(prediction, "Cleanliness");
    }

    #[test]
    fn fit_rejects_single_class() {
        let rows = vec![SparseVector::default(), SparseVector::default()];
        let labels = vec!["Only".to_string(), "Only".to_string()];
        let err = LogisticRegression::new().fit(4, &rows, &labels).unwrap_err();
        assert!(matches!(err, ModelError::TooFewClasses { found: 1 }));
    }

    #[test]
    fn fit_rejects_shape_mismatch() {
        let rows = vec![SparseVector::default()];
        let labels = vec!["A".to_string(), "B".to_string()];
        let err = LogisticRegression::new().fit(4, &rows, &labels).unwrap_err();
        assert!(matches!(err, ModelError::TrainingShape { .. }));
    }

    #[test]
    fn fit_rejects_empty_input() {
        let err = LogisticRegression::new().fit(4, &[], &[]).unwrap_err();
        assert!(matches!(err, ModelError::EmptyTrainingSet));
    }

    #[test]
    fn fitted_model_round_trips_through_json() {
        let (rows, labels, vectorizer) = fixture();
        let model = LogisticRegression::new()
            .fit(vectorizer.vocabulary_len(), &rows, &labels)
            .unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let parsed: FittedModel = serde_json::from_str(&json).unwrap();

        let probe = vectorizer.transform("refund for delayed train");
        assert_eq!(model.predict(&probe), parsed.predict(&probe));
    }
}

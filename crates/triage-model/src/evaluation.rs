//! Per-class evaluation of a trained classifier on a held-out set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Precision/recall/F1 for one department class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true samples of this class in the evaluation set.
    pub support: usize,
}

/// Evaluation summary over a held-out sample set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total: usize,
}

/// Computes per-class precision, recall and F1 plus overall accuracy.
///
/// `truth` and `predicted` must be the same length; classes are taken
/// from the union of both so a class the model never predicts still
/// appears with zero precision.
pub fn evaluate(truth: &[String], predicted: &[String]) -> EvaluationReport {
    debug_assert_eq!(truth.len(), predicted.len());

    let mut true_positives: BTreeMap<&str, usize> = BTreeMap::new();
    let mut predicted_counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut truth_counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut correct = 0usize;

    for (t, p) in truth.iter().zip(predicted) {
        *truth_counts.entry(t).or_insert(0) += 1;
        *predicted_counts.entry(p).or_insert(0) += 1;
        if t == p {
            *true_positives.entry(t).or_insert(0) += 1;
            correct += 1;
        }
    }

    let mut labels: Vec<&str> = truth_counts.keys().copied().collect();
    for label in predicted_counts.keys() {
        if !labels.contains(label) {
            labels.push(label);
        }
    }
    labels.sort_unstable();

    let classes = labels
        .into_iter()
        .map(|label| {
            let tp = true_positives.get(label).copied().unwrap_or(0) as f64;
            let predicted_n = predicted_counts.get(label).copied().unwrap_or(0) as f64;
            let support = truth_counts.get(label).copied().unwrap_or(0);

            let precision = if predicted_n > 0.0 { tp / predicted_n } else { 0.0 };
            let recall = if support > 0 { tp / support as f64 } else { 0.0 };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            ClassMetrics {
                label: label.to_string(),
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    let total = truth.len();
    let accuracy = if total > 0 {
        correct as f64 / total as f64
    } else {
        0.0
    };

    EvaluationReport {
        classes,
        accuracy,
        total,
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .max()
            .unwrap_or(10)
            .max(10);

        writeln!(
            f,
            "{:>width$}  precision  recall  f1-score  support",
            "",
            width = width
        )?;
        for class in &self.classes {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
                class.label,
                class.precision,
                class.recall,
                class.f1,
                class.support,
                width = width
            )?;
        }
        writeln!(f)?;
        write!(
            f,
            "{:>width$}  {:>9.2}  (on {} samples)",
            "accuracy",
            self.accuracy,
            self.total,
            width = width
        )
    }
}

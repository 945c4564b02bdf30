//! End-to-end training pipeline: prepare, split, fit, evaluate.

use triage_core::TrainingSample;

use crate::classifier::{FittedModel, LogisticRegression, DEFAULT_EPOCHS};
use crate::dataset;
use crate::error::ModelResult;
use crate::evaluation::{self, EvaluationReport};
use crate::vectorizer::{FittedVectorizer, TfidfVectorizer, DEFAULT_MAX_FEATURES};

/// Hyperparameters and split settings for a training run.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Vocabulary cap for the vectorizer.
    pub max_features: usize,
    /// Gradient-descent epoch bound.
    pub epochs: usize,
    /// Fraction of each class held out for evaluation.
    pub test_fraction: f64,
    /// Shuffle seed, fixed for reproducible splits.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            epochs: DEFAULT_EPOCHS,
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// The result of a training run: the fitted pair plus its held-out
/// evaluation.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub vectorizer: FittedVectorizer,
    pub model: FittedModel,
    pub report: EvaluationReport,
}

/// Runs the full pipeline over a raw sample set.
///
/// Prepares the corpus (canonical labels, rare classes dropped), splits
/// it stratified, fits the vectorizer on the training texts only, trains
/// the classifier, and evaluates on the held-out split. The fitted
/// vectorizer is the single instance later used at inference time.
pub fn train(samples: Vec<TrainingSample>, config: &TrainingConfig) -> ModelResult<TrainingOutcome> {
    let prepared = dataset::prepare(samples)?;
    let (train_set, test_set) =
        dataset::stratified_split(prepared, config.test_fraction, config.seed);

    tracing::info!(
        train = train_set.len(),
        test = test_set.len(),
        "prepared and split corpus"
    );

    let train_texts: Vec<String> = train_set.iter().map(|s| s.complaint.clone()).collect();
    let train_labels: Vec<String> = train_set.iter().map(|s| s.department.clone()).collect();

    let vectorizer = TfidfVectorizer::new()
        .max_features(config.max_features)
        .fit(&train_texts);

    let train_rows: Vec<_> = train_texts
        .iter()
        .map(|text| vectorizer.transform(text))
        .collect();

    let model = LogisticRegression::new()
        .epochs(config.epochs)
        .fit(vectorizer.vocabulary_len(), &train_rows, &train_labels)?;

    let truth: Vec<String> = test_set.iter().map(|s| s.department.clone()).collect();
    let predicted: Vec<String> = test_set
        .iter()
        .map(|s| model.predict(&vectorizer.transform(&s.complaint)).to_string())
        .collect();
    let report = evaluation::evaluate(&truth, &predicted);

    tracing::info!(accuracy = report.accuracy, "training run complete");

    Ok(TrainingOutcome {
        vectorizer,
        model,
        report,
    })
}

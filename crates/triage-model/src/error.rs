//! Error types for the classification pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur during training, evaluation, or artifact I/O.
#[derive(Debug, Error)]
pub enum ModelError {
    /// CSV parsing error while reading a corpus file.
    #[error("corpus parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required column is missing from the corpus CSV.
    #[error("required column '{0}' not found in corpus")]
    MissingColumn(String),

    /// No usable samples remained after cleaning.
    #[error("training corpus is empty after cleaning")]
    EmptyTrainingSet,

    /// Fewer than two department classes survived filtering.
    #[error("dataset must have at least 2 unique departments, found {found}")]
    TooFewClasses { found: usize },

    /// Feature vectors and labels disagree in length.
    #[error("training shape mismatch: {rows} feature vectors, {labels} labels")]
    TrainingShape { rows: usize, labels: usize },

    /// A model artifact file could not be read.
    #[error("failed to read model artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The loaded vectorizer and classifier do not belong together.
    #[error(
        "artifact mismatch: classifier expects {model_features} features, \
         vectorizer has a vocabulary of {vocabulary}"
    )]
    ArtifactMismatch {
        model_features: usize,
        vocabulary: usize,
    },
}

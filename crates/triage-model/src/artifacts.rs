//! Persistence of the fitted vectorizer/classifier pair.
//!
//! The two artifacts are JSON blobs written side by side and always
//! loaded together. The service refuses to start without them, and
//! `load` rejects a pair whose dimensions disagree — a classifier from
//! one training run silently paired with another run's vectorizer would
//! otherwise misbehave instead of failing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::classifier::FittedModel;
use crate::error::{ModelError, ModelResult};
use crate::vectorizer::FittedVectorizer;

/// Default file name for the serialized classifier.
pub const DEFAULT_MODEL_FILE: &str = "complaint_model.json";
/// Default file name for the serialized vectorizer.
pub const DEFAULT_VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

/// The pair of file paths a model is stored under.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    pub fn new(vectorizer: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            vectorizer: vectorizer.into(),
            model: model.into(),
        }
    }

    /// Default artifact paths inside the given directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vectorizer: dir.join(DEFAULT_VECTORIZER_FILE),
            model: dir.join(DEFAULT_MODEL_FILE),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(DEFAULT_VECTORIZER_FILE, DEFAULT_MODEL_FILE)
    }
}

/// Serializes the fitted pair to disk.
pub fn save(
    vectorizer: &FittedVectorizer,
    model: &FittedModel,
    paths: &ArtifactPaths,
) -> ModelResult<()> {
    fs::write(&paths.vectorizer, serde_json::to_vec(vectorizer)?)?;
    fs::write(&paths.model, serde_json::to_vec(model)?)?;
    tracing::info!(
        vectorizer = %paths.vectorizer.display(),
        model = %paths.model.display(),
        "saved model artifacts"
    );
    Ok(())
}

/// Loads the fitted pair from disk and verifies they belong together.
///
/// A missing file is reported with its path so a failed service startup
/// points at what to run first.
pub fn load(paths: &ArtifactPaths) -> ModelResult<(FittedVectorizer, FittedModel)> {
    let vectorizer: FittedVectorizer = serde_json::from_slice(&read(&paths.vectorizer)?)?;
    let model: FittedModel = serde_json::from_slice(&read(&paths.model)?)?;

    if model.n_features() != vectorizer.vocabulary_len() {
        return Err(ModelError::ArtifactMismatch {
            model_features: model.n_features(),
            vocabulary: vectorizer.vocabulary_len(),
        });
    }

    tracing::info!(
        classes = model.classes().len(),
        features = model.n_features(),
        "loaded model artifacts"
    );
    Ok((vectorizer, model))
}

fn read(path: &Path) -> ModelResult<Vec<u8>> {
    fs::read(path).map_err(|source| ModelError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })
}

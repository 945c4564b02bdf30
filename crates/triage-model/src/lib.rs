//! triage-model: Classification pipeline for the Railway Complaint Triage service
//!
//! This crate provides:
//! - Tokenization and n-gram extraction for complaint text
//! - A TF-IDF vectorizer with a vocabulary frozen at training time
//! - A multinomial logistic-regression classifier
//! - Dataset preparation (label canonicalization, rare-class filtering,
//!   stratified train/test split)
//! - Per-class evaluation reports
//! - Model artifact persistence (save/load of the fitted pair)
//!
//! The implementation is intentionally simple, using basic string
//! operations and hash maps rather than external ML libraries.
//!
//! # Usage
//!
//! ```rust,ignore
//! use triage_model::{trainer, TrainingConfig};
//!
//! let samples = triage_model::dataset::load_samples("Dataset_cleaned.csv")?;
//! let outcome = trainer::train(samples, &TrainingConfig::default())?;
//! println!("{}", outcome.report);
//! triage_model::artifacts::save(&outcome.vectorizer, &outcome.model, &paths)?;
//! ```
//!
//! At inference time the fitted vectorizer and model are loaded once and
//! shared immutably; `transform` and `predict` are pure functions over
//! that state.

pub mod artifacts;
pub mod classifier;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod tokenizer;
pub mod trainer;
pub mod vectorizer;

pub use artifacts::ArtifactPaths;
pub use classifier::{FittedModel, LogisticRegression};
pub use error::{ModelError, ModelResult};
pub use evaluation::EvaluationReport;
pub use tokenizer::{ngram_terms, tokenize};
pub use trainer::{TrainingConfig, TrainingOutcome};
pub use vectorizer::{FittedVectorizer, SparseVector, TfidfVectorizer};

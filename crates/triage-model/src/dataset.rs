//! Training corpus loading and preparation.
//!
//! The cleaned corpus is a CSV with `Complaint` and `Department` columns
//! (a `PNR` column may be present and is ignored here). Preparation
//! canonicalizes labels, drops unusable rows, removes classes too small
//! to stratify, and splits the corpus into train and test sets.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::path::Path;

use triage_core::TrainingSample;

use crate::error::{ModelError, ModelResult};

/// Column header for the complaint text.
pub const COMPLAINT_COLUMN: &str = "Complaint";
/// Column header for the department label.
pub const DEPARTMENT_COLUMN: &str = "Department";

/// Loads training samples from a cleaned-corpus CSV file.
///
/// Fails if either required column is missing. Rows whose complaint or
/// department is empty after trimming are skipped.
pub fn load_samples(path: impl AsRef<Path>) -> ModelResult<Vec<TrainingSample>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;

    let headers = reader.headers()?.clone();
    let complaint_idx = column_index(&headers, COMPLAINT_COLUMN)?;
    let department_idx = column_index(&headers, DEPARTMENT_COLUMN)?;

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let complaint = record.get(complaint_idx).unwrap_or("").trim();
        let department = record.get(department_idx).unwrap_or("").trim();
        if complaint.is_empty() || department.is_empty() {
            continue;
        }
        samples.push(TrainingSample::new(complaint, department));
    }

    tracing::info!(
        samples = samples.len(),
        path = %path.as_ref().display(),
        "loaded training corpus"
    );
    Ok(samples)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> ModelResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ModelError::MissingColumn(name.to_string()))
}

/// Canonicalizes a department label: trimmed and title-cased, so
/// "general" and "General" are one class.
pub fn canonical_label(raw: &str) -> String {
    raw.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prepares raw samples for training.
///
/// Canonicalizes department labels, drops samples that end up empty, and
/// removes department classes with fewer than 2 samples — a single-sample
/// class cannot be split into train and test. Fails if fewer than two
/// classes remain.
pub fn prepare(samples: Vec<TrainingSample>) -> ModelResult<Vec<TrainingSample>> {
    let cleaned: Vec<TrainingSample> = samples
        .into_iter()
        .filter_map(|sample| {
            let complaint = sample.complaint.trim().to_string();
            let department = canonical_label(&sample.department);
            if complaint.is_empty() || department.is_empty() {
                None
            } else {
                Some(TrainingSample::new(complaint, department))
            }
        })
        .collect();

    if cleaned.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for sample in &cleaned {
        *counts.entry(sample.department.as_str()).or_insert(0) += 1;
    }
    let dropped: Vec<&&str> = counts
        .iter()
        .filter(|&(_, &n)| n < 2)
        .map(|(label, _)| label)
        .collect();
    if !dropped.is_empty() {
        tracing::warn!(classes = ?dropped, "dropping single-sample department classes");
    }

    let keep: Vec<String> = counts
        .iter()
        .filter(|&(_, &n)| n >= 2)
        .map(|(label, _)| label.to_string())
        .collect();

    let filtered: Vec<TrainingSample> = cleaned
        .into_iter()
        .filter(|sample| keep.iter().any(|k| k == &sample.department))
        .collect();

    let distinct = keep.len();
    if distinct < 2 {
        return Err(ModelError::TooFewClasses { found: distinct });
    }

    Ok(filtered)
}

/// Stratified train/test split with a seeded shuffle.
///
/// Each class is shuffled and split independently so the test fraction
/// holds per class. Every class keeps at least one training sample.
pub fn stratified_split(
    samples: Vec<TrainingSample>,
    test_fraction: f64,
    seed: u64,
) -> (Vec<TrainingSample>, Vec<TrainingSample>) {
    let mut by_class: BTreeMap<String, Vec<TrainingSample>> = BTreeMap::new();
    for sample in samples {
        by_class
            .entry(sample.department.clone())
            .or_default()
            .push(sample);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for (_, mut group) in by_class {
        group.shuffle(&mut rng);
        let len = group.len();
        let test_n = ((len as f64) * test_fraction).round() as usize;
        let test_n = test_n.min(len.saturating_sub(1));
        let split_at = len - test_n;
        let tail = group.split_off(split_at);
        train.extend(group);
        test.extend(tail);
    }

    (train, test)
}

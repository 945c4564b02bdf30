//! PREDICT command - Classify complaint text with saved artifacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use triage_core::{clean_text, Prediction};
use triage_model::artifacts::{self, DEFAULT_MODEL_FILE, DEFAULT_VECTORIZER_FILE};
use triage_model::ArtifactPaths;

use super::{output, HumanReadable};

/// How many scored departments to show per input.
const TOP_K: usize = 3;

/// Arguments for the predict command.
#[derive(Args)]
pub struct PredictArgs {
    /// Path to the fitted classifier
    #[arg(long, default_value = DEFAULT_MODEL_FILE)]
    pub model: PathBuf,

    /// Path to the fitted vectorizer
    #[arg(long, default_value = DEFAULT_VECTORIZER_FILE)]
    pub vectorizer: PathBuf,

    /// Complaint text(s) to classify
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Predictions for one input text.
#[derive(Debug, Serialize)]
pub struct PredictResult {
    pub input: String,
    pub predicted: Vec<Prediction>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub results: Vec<PredictResult>,
}

impl HumanReadable for PredictResponse {
    fn print_human(&self) {
        for result in &self.results {
            println!("{}", result.input.bold());
            match result.predicted.first() {
                Some(top) => {
                    println!(
                        "  {} {} ({:.1}%)",
                        "->".cyan(),
                        top.department.green().bold(),
                        top.score * 100.0
                    );
                    for p in result.predicted.iter().skip(1) {
                        println!("     {} ({:.1}%)", p.department, p.score * 100.0);
                    }
                }
                None => println!("  {} no prediction", "->".cyan()),
            }
            println!();
        }
    }
}

/// Execute the predict command.
pub fn execute(human: bool, args: PredictArgs) -> Result<()> {
    let paths = ArtifactPaths::new(&args.vectorizer, &args.model);
    let (vectorizer, model) =
        artifacts::load(&paths).context("could not load model artifacts")?;

    let results = args
        .text
        .into_iter()
        .map(|input| {
            let features = vectorizer.transform(&clean_text(&input));
            let predicted = model.predict_topk(&features, TOP_K);
            PredictResult { input, predicted }
        })
        .collect();

    output(&PredictResponse { results }, human)
}

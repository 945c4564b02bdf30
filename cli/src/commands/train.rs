//! TRAIN command - Fit the classifier pipeline and save artifacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use triage_model::artifacts::{self, DEFAULT_MODEL_FILE, DEFAULT_VECTORIZER_FILE};
use triage_model::{dataset, trainer, ArtifactPaths, EvaluationReport, TrainingConfig};

use super::{output, HumanReadable};

/// Arguments for the train command.
#[derive(Args)]
pub struct TrainArgs {
    /// Cleaned corpus CSV (from `triage clean`)
    #[arg(long)]
    pub input: PathBuf,

    /// Where to save the fitted classifier
    #[arg(long, default_value = DEFAULT_MODEL_FILE)]
    pub model: PathBuf,

    /// Where to save the fitted vectorizer
    #[arg(long, default_value = DEFAULT_VECTORIZER_FILE)]
    pub vectorizer: PathBuf,

    /// Vocabulary cap for the vectorizer
    #[arg(long, default_value_t = 5000)]
    pub max_features: usize,

    /// Gradient-descent epoch bound
    #[arg(long, default_value_t = 200)]
    pub epochs: usize,
}

/// Summary of a training run.
#[derive(Debug, Serialize)]
pub struct TrainSummary {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
    pub departments: Vec<String>,
    pub report: EvaluationReport,
}

impl HumanReadable for TrainSummary {
    fn print_human(&self) {
        println!("{}", "Training complete!".green().bold());
        println!();
        println!("  {} {}", "Model:".cyan(), self.model.display());
        println!("  {} {}", "Vectorizer:".cyan(), self.vectorizer.display());
        println!(
            "  {} {}",
            "Departments:".cyan(),
            self.departments.join(", ")
        );
        println!();
        println!("{}", "Held-out evaluation:".yellow());
        println!("{}", self.report);
    }
}

/// Execute the train command.
pub fn execute(human: bool, args: TrainArgs) -> Result<()> {
    let samples = dataset::load_samples(&args.input)
        .with_context(|| format!("cannot load corpus {}", args.input.display()))?;

    let config = TrainingConfig {
        max_features: args.max_features,
        epochs: args.epochs,
        ..TrainingConfig::default()
    };
    let outcome = trainer::train(samples, &config).context("training failed")?;

    let paths = ArtifactPaths::new(&args.vectorizer, &args.model);
    artifacts::save(&outcome.vectorizer, &outcome.model, &paths)
        .context("could not save artifacts")?;

    output(
        &TrainSummary {
            model: args.model,
            vectorizer: args.vectorizer,
            departments: outcome.model.classes().to_vec(),
            report: outcome.report,
        },
        human,
    )
}

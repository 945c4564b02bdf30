//! Command-line interface for the Railway Complaint Triage service.
//!
//! Local commands work directly on corpus files and model artifacts:
//! - clean: Normalize a raw complaint CSV into the cleaned corpus
//! - train: Fit the vectorizer and classifier, save artifacts
//! - predict: Classify text with saved artifacts
//! - add-staff: Register a staff account in the credential store
//!
//! Remote commands talk to a running triage-server:
//! - submit: Submit a complaint for classification
//! - status: Look up a complaint by its ID
//!
//! Configuration via environment:
//! - TRIAGE_URL: Base URL of the triage server (default: http://localhost:3000)

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    add_staff::AddStaffArgs, clean::CleanArgs, predict::PredictArgs, status::StatusArgs,
    submit::SubmitArgs, train::TrainArgs,
};

/// Railway Complaint Triage CLI
///
/// Prepare corpora, train and query the complaint classifier, and talk
/// to a running triage server. Output is JSON by default; pass --human
/// for formatted text.
#[derive(Parser)]
#[command(name = "triage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Triage server URL (remote commands only)
    #[arg(
        long,
        env = "TRIAGE_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw complaint CSV into a cleaned training corpus
    Clean(CleanArgs),

    /// Train the classifier and save model artifacts
    Train(TrainArgs),

    /// Classify complaint text with saved artifacts
    Predict(PredictArgs),

    /// Register a staff account in the credential store
    AddStaff(AddStaffArgs),

    /// Submit a complaint to a running server
    Submit(SubmitArgs),

    /// Look up a complaint's triage status on a running server
    Status(StatusArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean(args) => commands::clean::execute(cli.human, args),
        Commands::Train(args) => commands::train::execute(cli.human, args),
        Commands::Predict(args) => commands::predict::execute(cli.human, args),
        Commands::AddStaff(args) => commands::add_staff::execute(cli.human, args).await,
        Commands::Submit(args) => commands::submit::execute(&cli.url, cli.human, args).await,
        Commands::Status(args) => commands::status::execute(&cli.url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

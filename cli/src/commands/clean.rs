//! CLEAN command - Normalize a raw complaint CSV into the cleaned corpus.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use triage_core::{clean_text, extract_pnr};
use triage_model::dataset::{self, COMPLAINT_COLUMN, DEPARTMENT_COLUMN};

use super::{output, HumanReadable};

/// Arguments for the clean command.
#[derive(Args)]
pub struct CleanArgs {
    /// Raw corpus CSV with Complaint and Department columns
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the cleaned corpus CSV
    #[arg(long)]
    pub output: PathBuf,
}

/// Summary of a cleaning run.
#[derive(Debug, Serialize)]
pub struct CleanSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_dropped: usize,
}

impl HumanReadable for CleanSummary {
    fn print_human(&self) {
        println!("{}", "Corpus cleaned!".green().bold());
        println!();
        println!("  {} {}", "Input:".cyan(), self.input.display());
        println!("  {} {}", "Output:".cyan(), self.output.display());
        println!("  {} {}", "Rows read:".cyan(), self.rows_read);
        println!("  {} {}", "Rows written:".cyan(), self.rows_written);
        if self.rows_dropped > 0 {
            println!(
                "  {} {}",
                "Rows dropped:".cyan(),
                self.rows_dropped.to_string().yellow()
            );
        }
    }
}

/// Execute the clean command.
///
/// PNRs are pulled from the raw text before normalization strips the
/// digits' context; rows that normalize to nothing are dropped.
pub fn execute(human: bool, args: CleanArgs) -> Result<()> {
    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;

    let headers = reader.headers()?.clone();
    let complaint_idx = headers
        .iter()
        .position(|h| h == COMPLAINT_COLUMN)
        .with_context(|| format!("missing column {COMPLAINT_COLUMN:?}"))?;
    let department_idx = headers
        .iter()
        .position(|h| h == DEPARTMENT_COLUMN)
        .with_context(|| format!("missing column {DEPARTMENT_COLUMN:?}"))?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    writer.write_record(["PNR", COMPLAINT_COLUMN, DEPARTMENT_COLUMN])?;

    let mut rows_read = 0;
    let mut rows_written = 0;
    for record in reader.records() {
        let record = record?;
        rows_read += 1;

        let raw = record.get(complaint_idx).unwrap_or("");
        let department = dataset::canonical_label(record.get(department_idx).unwrap_or(""));

        let pnr = extract_pnr(raw).unwrap_or_default();
        let cleaned = clean_text(raw);
        if cleaned.is_empty() || department.is_empty() {
            continue;
        }

        writer.write_record([pnr.as_str(), cleaned.as_str(), department.as_str()])?;
        rows_written += 1;
    }
    writer.flush()?;

    output(
        &CleanSummary {
            rows_dropped: rows_read - rows_written,
            input: args.input,
            output: args.output,
            rows_read,
            rows_written,
        },
        human,
    )
}

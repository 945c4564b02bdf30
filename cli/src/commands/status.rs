//! STATUS command - Look up a complaint's triage status.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use triage_core::ComplaintRecord;

use super::{make_request, output, HumanReadable};

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Complaint ID returned at submission
    pub complaint_id: String,
}

impl HumanReadable for ComplaintRecord {
    fn print_human(&self) {
        println!("{}", "Complaint Status".green().bold());
        println!("{}", "=".repeat(60));
        println!();
        println!("  {} {}", "Status:".cyan(), self.status.bold());
        if !self.pnr.is_empty() {
            println!("  {} {}", "PNR:".cyan(), self.pnr);
        }
        println!(
            "  {} {}",
            "Submitted:".cyan(),
            self.submitted_at.format("%Y-%m-%d %H:%M UTC")
        );
        println!(
            "  {} {}",
            "Assigned to:".cyan(),
            self.assigned_departments.join(", ")
        );
        println!();
        println!("{}", "Complaint:".yellow());
        println!("{}", self.complaint);
        if !self.predicted.is_empty() {
            println!();
            println!("{}", "Predicted departments:".yellow());
            for p in &self.predicted {
                println!("  {} ({:.1}%)", p.department, p.score * 100.0);
            }
        }
    }
}

/// Execute the status command.
pub async fn execute(base_url: &str, human: bool, args: StatusArgs) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("{}/status/{}", base_url, args.complaint_id);

    let response: ComplaintRecord = make_request(client.get(&url)).await?;

    output(&response, human)
}

//! SUBMIT command - Send a complaint to a running triage server.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use triage_core::{ComplaintId, Prediction};

use super::{make_request, output, HumanReadable};

/// Arguments for the submit command.
#[derive(Args)]
pub struct SubmitArgs {
    /// Complaint text
    pub complaint: String,

    /// Booking reference (PNR), if known
    #[arg(long)]
    pub pnr: Option<String>,
}

#[derive(Serialize)]
struct SubmitRequest {
    complaint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pnr: Option<String>,
}

/// Response from submitting a complaint.
#[derive(Debug, Deserialize, Serialize)]
pub struct SubmitResponse {
    pub complaint_id: ComplaintId,
    pub predicted: Vec<Prediction>,
}

impl HumanReadable for SubmitResponse {
    fn print_human(&self) {
        println!("{}", "Complaint submitted!".green().bold());
        println!();
        println!("  {} {}", "Complaint ID:".cyan(), self.complaint_id);
        match self.predicted.first() {
            Some(top) => {
                println!(
                    "  {} {} ({:.1}%)",
                    "Routed to:".cyan(),
                    top.department.green().bold(),
                    top.score * 100.0
                );
                for p in self.predicted.iter().skip(1) {
                    println!("             {} ({:.1}%)", p.department, p.score * 100.0);
                }
            }
            None => println!("  {} none", "Routed to:".cyan()),
        }
    }
}

/// Execute the submit command.
pub async fn execute(base_url: &str, human: bool, args: SubmitArgs) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("{}/submit", base_url);

    let request_body = SubmitRequest {
        complaint: args.complaint,
        pnr: args.pnr,
    };

    let response: SubmitResponse = make_request(client.post(&url).json(&request_body)).await?;

    output(&response, human)
}

//! ADD-STAFF command - Register a staff account in the credential store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use triage_store::UserStore;

use super::{output, HumanReadable};

/// Arguments for the add-staff command.
#[derive(Args)]
pub struct AddStaffArgs {
    /// Username for the new staff account
    pub username: String,

    /// Password (at least 6 characters)
    pub password: String,

    /// Credential store file
    #[arg(long, default_value = "users.json")]
    pub users_file: PathBuf,
}

/// Confirmation of a created staff account.
#[derive(Debug, Serialize)]
pub struct AddStaffResponse {
    pub username: String,
    pub users_file: PathBuf,
}

impl HumanReadable for AddStaffResponse {
    fn print_human(&self) {
        println!("{}", "Staff account created!".green().bold());
        println!();
        println!("  {} {}", "Username:".cyan(), self.username);
        println!("  {} {}", "Store:".cyan(), self.users_file.display());
    }
}

/// Execute the add-staff command.
pub async fn execute(human: bool, args: AddStaffArgs) -> Result<()> {
    let store = UserStore::new(&args.users_file);
    store
        .add_user(&args.username, &args.password)
        .await
        .context("could not add staff account")?;

    output(
        &AddStaffResponse {
            username: args.username,
            users_file: args.users_file,
        },
        human,
    )
}

//! Command implementations and shared helpers.

pub mod add_staff;
pub mod clean;
pub mod predict;
pub mod status;
pub mod submit;
pub mod train;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Types that have a formatted representation for --human output.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Print a response as pretty JSON, or formatted text with --human.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Error envelope the server returns on failures.
#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Send a request and deserialize the JSON response, turning the
/// server's error envelope into a readable message.
pub async fn make_request<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<T> {
    let response = builder
        .send()
        .await
        .context("could not reach the triage server")?;

    let status = response.status();
    let body = response.text().await.context("failed to read response")?;

    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_str::<ErrorBody>(&body) {
            anyhow::bail!("{} ({})", envelope.error.message, envelope.error.code);
        }
        anyhow::bail!("server returned {}: {}", status, body);
    }

    serde_json::from_str(&body).context("unexpected response body")
}

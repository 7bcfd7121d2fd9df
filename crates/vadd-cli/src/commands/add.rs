//! `vadd add` command implementation

use crate::error::CliError;
use crate::output::{OutputFormat, print_json};
use colored::Colorize;
use std::time::Duration;
use tracing::debug;
use vadd_kernel::wire::{AddRequest, AddResponse, ErrorBody};

/// Post both arrays to `{url}/add` and print the sum.
pub async fn run(
    url: &str,
    array1: Vec<f32>,
    array2: Vec<f32>,
    timeout: Duration,
    format: OutputFormat,
) -> Result<(), CliError> {
    let endpoint = format!("{}/add", url.trim_end_matches('/'));
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    debug!(endpoint = %endpoint, left = array1.len(), right = array2.len(), "sending addition");
    let resp = client
        .post(&endpoint)
        .json(&AddRequest { array1, array2 })
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await?;
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.error.code, body.error.message),
            Err(_) => (String::from("HTTP_ERROR"), text),
        };
        return Err(CliError::Gateway {
            status: status.as_u16(),
            code,
            message,
        });
    }

    let sum: AddResponse = resp.json().await?;
    match format {
        OutputFormat::Json => print_json(&sum)?,
        OutputFormat::Text => {
            println!("{} {:?}", "Result:".bold(), sum.result);
            println!(
                "{} {}",
                "Computation mode:".bold(),
                sum.computation_mode.to_string().cyan()
            );
        }
    }
    Ok(())
}

use clap::Args;
use serde_json::Value;

use voice_invoice_core::batch::{self, BatchPayload};

use crate::input;

/// Arguments for listing-page totals
#[derive(Args)]
pub struct BatchArgs {
    /// Path to JSON or YAML file with an `invoices` array
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_batch(args: BatchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload: BatchPayload = input::file_or_stdin(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for batch totals")?;
    let result = batch::calculate_batch_payload(payload);
    Ok(serde_json::to_value(result)?)
}

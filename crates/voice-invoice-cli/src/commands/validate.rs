use clap::Args;
use serde_json::{json, Value};

use voice_invoice_core::totals::InvoiceTotalsInput;
use voice_invoice_core::validation::validate_invoice_input;

use crate::input;

/// Arguments for strict validation
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to JSON or YAML invoice
    #[arg(long)]
    pub input: Option<String>,
}

/// Exits non-zero on the first invalid field.
pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let invoice: InvoiceTotalsInput = input::file_or_stdin(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for validation")?;
    validate_invoice_input(&invoice)?;
    Ok(json!({ "result": { "valid": true, "material_lines": invoice.materials.len() } }))
}

use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use voice_invoice_core::currency::{format_gbp, round_money};

/// Arguments for currency formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Amount in pounds, e.g. 1234.5
    pub amount: Decimal,
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "result": {
            "formatted": format_gbp(args.amount),
            "rounded": round_money(args.amount).to_string(),
        }
    }))
}

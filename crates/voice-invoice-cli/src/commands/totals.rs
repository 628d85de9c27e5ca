use clap::Args;
use serde_json::Value;

use voice_invoice_core::totals;

use super::invoice::InvoiceArgs;

/// Arguments for a single invoice's totals
#[derive(Args)]
pub struct TotalsArgs {
    #[command(flatten)]
    pub invoice: InvoiceArgs,
}

pub fn run_totals(args: TotalsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (invoice, prior) = args.invoice.load()?;
    let result = totals::calculate_with_prior_adjustments(&invoice, prior);
    Ok(serde_json::to_value(result)?)
}

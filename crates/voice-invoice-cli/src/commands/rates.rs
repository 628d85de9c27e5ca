use clap::Args;
use serde_json::{json, Value};

use super::invoice::RegimeArgs;

/// Arguments for showing the resolved rate regime
#[derive(Args)]
pub struct RatesArgs {
    #[command(flatten)]
    pub regime: RegimeArgs,
}

pub fn run_rates(args: RatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let regime = args.regime.resolve()?;
    let source = args.regime.rates.as_deref().unwrap_or("uk_standard");
    Ok(json!({ "result": regime, "source": source }))
}

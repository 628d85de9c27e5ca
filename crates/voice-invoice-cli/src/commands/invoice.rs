use clap::Args;
use rust_decimal::Decimal;

use voice_invoice_core::totals::{InputAdjustment, InvoicePayload, InvoiceTotalsInput, MaterialLine};
use voice_invoice_core::RateRegime;

use crate::input;

/// Where rates come from when they are not on the invoice itself
#[derive(Args, Clone, Default)]
pub struct RegimeArgs {
    /// Rate regime file (.json, .yaml or .yml); UK standard rates otherwise
    #[arg(long)]
    pub rates: Option<String>,

    /// Hourly labour rate in GBP
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// CIS percentage (e.g. 20 or 30)
    #[arg(long)]
    pub cis_rate: Option<Decimal>,

    /// VAT percentage (e.g. 20)
    #[arg(long)]
    pub vat_rate: Option<Decimal>,
}

/// An invoice given as a file, on stdin, or as flags
#[derive(Args)]
pub struct InvoiceArgs {
    /// Path to JSON or YAML invoice (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Hours worked; omit when the duration is unknown
    #[arg(long)]
    pub hours: Option<Decimal>,

    /// Material line as COST[xQTY][:DESCRIPTION]; use "tbc" for an unpriced cost
    #[arg(long = "material", short = 'm', value_parser = parse_material)]
    pub materials: Vec<MaterialLine>,

    /// Apply CIS withholding to labour
    #[arg(long)]
    pub cis: bool,

    /// Charge VAT on the subtotal
    #[arg(long)]
    pub vat: bool,

    #[command(flatten)]
    pub regime: RegimeArgs,
}

impl RegimeArgs {
    /// File (or UK standard) with any individual flags applied on top.
    pub fn resolve(&self) -> Result<RateRegime, Box<dyn std::error::Error>> {
        let mut regime = match self.rates {
            Some(ref path) => input::file::read_structured(path)?,
            None => RateRegime::uk_standard(),
        };
        if let Some(rate) = self.rate {
            regime.labour_rate = rate;
        }
        if let Some(pct) = self.cis_rate {
            regime.cis_rate_pct = pct;
        }
        if let Some(pct) = self.vat_rate {
            regime.vat_rate_pct = pct;
        }
        regime.validate()?;
        tracing::debug!(
            labour_rate = %regime.labour_rate,
            cis_rate_pct = %regime.cis_rate_pct,
            vat_rate_pct = %regime.vat_rate_pct,
            "rate regime resolved"
        );
        Ok(regime)
    }
}

impl InvoiceArgs {
    /// The invoice plus any numbers that were `null` in a file or on stdin.
    pub fn load(
        &self,
    ) -> Result<(InvoiceTotalsInput, Vec<InputAdjustment>), Box<dyn std::error::Error>> {
        if let Some(payload) = input::file_or_stdin::<InvoicePayload>(self.input.as_deref())? {
            return Ok(payload.into_input());
        }

        let regime = self.regime.resolve()?;
        let invoice = InvoiceTotalsInput {
            labour: regime.labour(self.hours),
            materials: self.materials.clone(),
            tax: regime.toggles(self.cis, self.vat),
        };
        Ok((invoice, Vec::new()))
    }
}

/// Parse `180`, `2.50x4`, `tbc:Tiles` or `12x3:Copper elbow`.
pub fn parse_material(s: &str) -> Result<MaterialLine, String> {
    let (amounts, description) = match s.split_once(':') {
        Some((a, d)) => (a.trim(), Some(d.trim().to_string())),
        None => (s.trim(), None),
    };
    let (cost, qty) = match amounts.split_once(['x', 'X']) {
        Some((c, q)) => (c.trim(), Some(q.trim())),
        None => (amounts, None),
    };

    let unit_cost = if cost.eq_ignore_ascii_case("tbc") {
        None
    } else {
        Some(
            cost.parse::<Decimal>()
                .map_err(|e| format!("invalid material cost '{cost}': {e}"))?,
        )
    };
    let quantity = qty
        .map(|q| {
            q.parse::<Decimal>()
                .map_err(|e| format!("invalid material quantity '{q}': {e}"))
        })
        .transpose()?;

    Ok(MaterialLine {
        description: description.filter(|d| !d.is_empty()),
        unit_cost,
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_cost_only() {
        let line = parse_material("180").unwrap();
        assert_eq!(line.unit_cost, Some(dec!(180)));
        assert_eq!(line.quantity, None);
        assert_eq!(line.description, None);
    }

    #[test]
    fn test_parse_cost_quantity_description() {
        let line = parse_material("2.50x4:Compression fitting").unwrap();
        assert_eq!(
            line,
            MaterialLine {
                description: Some("Compression fitting".into()),
                unit_cost: Some(dec!(2.50)),
                quantity: Some(dec!(4)),
            }
        );
    }

    #[test]
    fn test_parse_unpriced() {
        let line = parse_material("TBC:Tiles").unwrap();
        assert_eq!(line.unit_cost, None);
        assert_eq!(line.description.as_deref(), Some("Tiles"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_material("abc").is_err());
        assert!(parse_material("12xlots").is_err());
    }

    #[test]
    fn test_flag_overrides_apply_to_standard_regime() {
        let args = RegimeArgs {
            rate: Some(dec!(55)),
            ..Default::default()
        };
        let regime = args.resolve().unwrap();
        assert_eq!(regime.labour_rate, dec!(55));
        assert_eq!(regime.vat_rate_pct, dec!(20));
    }

    #[test]
    fn test_null_rate_in_file_is_reported() {
        let path = std::env::temp_dir().join("vinv_null_rate_invoice.json");
        std::fs::write(
            &path,
            r#"{ "labour": { "hours": 2, "rate": null }, "materials": [{ "unitCost": 30 }] }"#,
        )
        .unwrap();
        let args = InvoiceArgs {
            input: Some(path.to_string_lossy().into_owned()),
            hours: None,
            materials: vec![],
            cis: false,
            vat: false,
            regime: RegimeArgs::default(),
        };
        let (invoice, prior) = args.load().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(invoice.labour.rate, Decimal::ZERO);
        assert_eq!(invoice.materials.len(), 1);
        assert_eq!(prior.len(), 1);
        assert_eq!(prior[0].field, "labour.rate");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = RegimeArgs {
            vat_rate: Some(dec!(150)),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }
}

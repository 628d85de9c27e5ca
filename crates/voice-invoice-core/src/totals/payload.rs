//! The invoice as the web app posts it.
//!
//! JavaScript serialises `NaN` as `null`, so fields the engine treats as
//! required numbers may arrive empty. They are accepted here and replaced
//! with zero, and each replacement is reported like any other adjustment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::totals::input::*;
use crate::totals::normalise::{AdjustmentReason, InputAdjustment};
use crate::types::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabourPayload {
    #[serde(default)]
    pub hours: Option<Hours>,
    #[serde(default)]
    pub rate: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPayload {
    #[serde(default, alias = "cisEnabled")]
    pub cis_enabled: bool,
    #[serde(default, alias = "cisRatePct")]
    pub cis_rate_pct: Option<RatePct>,
    #[serde(default, alias = "vatEnabled")]
    pub vat_enabled: bool,
    #[serde(default, alias = "vatRatePct")]
    pub vat_rate_pct: Option<RatePct>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePayload {
    #[serde(default)]
    pub labour: LabourPayload,
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    #[serde(default, alias = "taxToggles")]
    pub tax: TaxPayload,
}

impl InvoicePayload {
    /// Fill empty numbers with zero. A missing rate is always reported; a
    /// missing percentage only when its tax is switched on.
    pub fn into_input(self) -> (InvoiceTotalsInput, Vec<InputAdjustment>) {
        let mut adjustments = Vec::new();

        let rate = filled("labour.rate", self.labour.rate, true, &mut adjustments);
        let cis_rate_pct = filled(
            "tax.cis_rate_pct",
            self.tax.cis_rate_pct,
            self.tax.cis_enabled,
            &mut adjustments,
        );
        let vat_rate_pct = filled(
            "tax.vat_rate_pct",
            self.tax.vat_rate_pct,
            self.tax.vat_enabled,
            &mut adjustments,
        );

        let input = InvoiceTotalsInput {
            labour: LabourInput {
                hours: self.labour.hours,
                rate,
            },
            materials: self.materials,
            tax: TaxToggles {
                cis_enabled: self.tax.cis_enabled,
                cis_rate_pct,
                vat_enabled: self.tax.vat_enabled,
                vat_rate_pct,
            },
        };
        (input, adjustments)
    }
}

impl From<InvoiceTotalsInput> for InvoicePayload {
    fn from(input: InvoiceTotalsInput) -> Self {
        InvoicePayload {
            labour: LabourPayload {
                hours: input.labour.hours,
                rate: Some(input.labour.rate),
            },
            materials: input.materials,
            tax: TaxPayload {
                cis_enabled: input.tax.cis_enabled,
                cis_rate_pct: Some(input.tax.cis_rate_pct),
                vat_enabled: input.tax.vat_enabled,
                vat_rate_pct: Some(input.tax.vat_rate_pct),
            },
        }
    }
}

fn filled(
    field: &str,
    value: Option<Decimal>,
    report: bool,
    adjustments: &mut Vec<InputAdjustment>,
) -> Decimal {
    match value {
        Some(v) => v,
        None => {
            if report {
                adjustments.push(InputAdjustment {
                    field: field.to_string(),
                    original: "null".into(),
                    applied: Decimal::ZERO,
                    reason: AdjustmentReason::NotFinite,
                });
            }
            Decimal::ZERO
        }
    }
}

//! Input guards.
//!
//! Out-of-range numbers are caller bugs, but an invoice must still be
//! produced. Each guard substitutes the nearest safe value and records an
//! [`InputAdjustment`] so the caller can log or surface it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::currency::money_from_f64;
use crate::totals::input::*;
use crate::types::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentReason {
    Negative,
    NotFinite,
    NonPositiveQuantity,
    ExceedsLimit,
}

/// Largest amount, in pounds, any single figure may reach. Keeps every sum
/// of the finalised amounts exact at two decimal places.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

/// One value the engine replaced before computing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAdjustment {
    /// Path of the offending field, e.g. `materials[2].quantity`
    pub field: String,
    /// The value as received, rendered as text (`NaN` survives this way)
    pub original: String,
    pub applied: Decimal,
    pub reason: AdjustmentReason,
}

impl fmt::Display for InputAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let why = match self.reason {
            AdjustmentReason::Negative => "negative value",
            AdjustmentReason::NotFinite => "not a finite decimal",
            AdjustmentReason::NonPositiveQuantity => "quantity must be positive",
            AdjustmentReason::ExceedsLimit => "above the amount limit",
        };
        write!(
            f,
            "{}: {} ({}), used {} instead",
            self.field, self.original, why, self.applied
        )
    }
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Clamp a cost, rate or duration to zero if negative.
pub(crate) fn non_negative(
    field: impl FnOnce() -> String,
    value: Decimal,
    adjustments: &mut Vec<InputAdjustment>,
) -> Decimal {
    if value < Decimal::ZERO {
        adjustments.push(InputAdjustment {
            field: field(),
            original: value.to_string(),
            applied: Decimal::ZERO,
            reason: AdjustmentReason::Negative,
        });
        Decimal::ZERO
    } else {
        value
    }
}

/// Cap an amount at [`MAX_AMOUNT`].
pub(crate) fn ceiling(
    field: &str,
    value: Decimal,
    adjustments: &mut Vec<InputAdjustment>,
) -> Decimal {
    if value > MAX_AMOUNT {
        adjustments.push(InputAdjustment {
            field: field.to_string(),
            original: value.to_string(),
            applied: MAX_AMOUNT,
            reason: AdjustmentReason::ExceedsLimit,
        });
        MAX_AMOUNT
    } else {
        value
    }
}

/// Missing quantity means one; zero or negative is recorded and also becomes one.
pub(crate) fn quantity(
    field: impl FnOnce() -> String,
    value: Option<Decimal>,
    adjustments: &mut Vec<InputAdjustment>,
) -> Decimal {
    match value {
        None => Decimal::ONE,
        Some(q) if q > Decimal::ZERO => q,
        Some(q) => {
            adjustments.push(InputAdjustment {
                field: field(),
                original: q.to_string(),
                applied: Decimal::ONE,
                reason: AdjustmentReason::NonPositiveQuantity,
            });
            Decimal::ONE
        }
    }
}

// ---------------------------------------------------------------------------
// Floating-point ingestion
// ---------------------------------------------------------------------------

/// Invoice input as floating-point callers hold it. `NaN` and infinities are
/// possible here and nowhere else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInvoiceInput {
    pub hours: Option<f64>,
    pub rate: f64,
    pub materials: Vec<RawMaterialLine>,
    pub cis_enabled: bool,
    pub cis_rate_pct: f64,
    pub vat_enabled: bool,
    pub vat_rate_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMaterialLine {
    pub description: Option<String>,
    pub unit_cost: Option<f64>,
    pub quantity: Option<f64>,
}

impl RawInvoiceInput {
    /// Convert to decimal input. Non-finite values become zero (or one, for
    /// quantities) and are recorded; range checks happen later in the engine.
    pub fn into_decimal(self) -> (InvoiceTotalsInput, Vec<InputAdjustment>) {
        let mut adjustments = Vec::new();

        let hours = self
            .hours
            .map(|h| finite_or(|| "labour.hours".into(), h, Decimal::ZERO, &mut adjustments));
        let rate = finite_or(|| "labour.rate".into(), self.rate, Decimal::ZERO, &mut adjustments);

        let materials = self
            .materials
            .into_iter()
            .enumerate()
            .map(|(i, line)| MaterialLine {
                description: line.description,
                unit_cost: line.unit_cost.map(|c| {
                    finite_or(
                        || format!("materials[{i}].unit_cost"),
                        c,
                        Decimal::ZERO,
                        &mut adjustments,
                    )
                }),
                quantity: line.quantity.map(|q| {
                    finite_or(
                        || format!("materials[{i}].quantity"),
                        q,
                        Decimal::ONE,
                        &mut adjustments,
                    )
                }),
            })
            .collect();

        let tax = TaxToggles {
            cis_enabled: self.cis_enabled,
            cis_rate_pct: finite_or(
                || "tax.cis_rate_pct".into(),
                self.cis_rate_pct,
                Decimal::ZERO,
                &mut adjustments,
            ),
            vat_enabled: self.vat_enabled,
            vat_rate_pct: finite_or(
                || "tax.vat_rate_pct".into(),
                self.vat_rate_pct,
                Decimal::ZERO,
                &mut adjustments,
            ),
        };

        let input = InvoiceTotalsInput {
            labour: LabourInput { hours, rate },
            materials,
            tax,
        };
        (input, adjustments)
    }
}

fn finite_or(
    field: impl FnOnce() -> String,
    value: f64,
    fallback: Decimal,
    adjustments: &mut Vec<InputAdjustment>,
) -> Decimal {
    match money_from_f64(value) {
        Some(d) => d,
        None => {
            adjustments.push(InputAdjustment {
                field: field(),
                original: value.to_string(),
                applied: fallback,
                reason: AdjustmentReason::NotFinite,
            });
            fallback
        }
    }
}

/// Convenience for callers that only hold a money figure as `f64`.
pub fn money_or_zero(value: f64) -> Money {
    money_from_f64(value).unwrap_or(Decimal::ZERO)
}

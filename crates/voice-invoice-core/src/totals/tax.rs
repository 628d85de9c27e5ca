//! CIS and VAT.
//!
//! CIS is withheld from labour only; materials never enter its base. VAT is
//! charged on the whole pre-VAT subtotal and CIS does not reduce that base,
//! since the withholding happens between payer and HMRC after invoicing.

use rust_decimal::Decimal;

use crate::totals::input::TaxToggles;
use crate::totals::normalise::{self, InputAdjustment};
use crate::types::*;

/// Unrounded CIS withholding on the labour cost.
pub fn cis_deduction(
    labour_cost: Money,
    tax: &TaxToggles,
    adjustments: &mut Vec<InputAdjustment>,
) -> Money {
    if !tax.cis_enabled {
        return Decimal::ZERO;
    }
    let pct = normalise::non_negative(|| "tax.cis_rate_pct".into(), tax.cis_rate_pct, adjustments);
    labour_cost.saturating_mul(pct_to_fraction(pct))
}

/// Unrounded VAT on the full subtotal.
pub fn vat_amount(
    subtotal: Money,
    tax: &TaxToggles,
    adjustments: &mut Vec<InputAdjustment>,
) -> Money {
    if !tax.vat_enabled {
        return Decimal::ZERO;
    }
    let pct = normalise::non_negative(|| "tax.vat_rate_pct".into(), tax.vat_rate_pct, adjustments);
    subtotal.saturating_mul(pct_to_fraction(pct))
}

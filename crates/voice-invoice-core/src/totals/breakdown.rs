use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::currency::round_money;
use crate::totals::input::*;
use crate::totals::normalise::{self, InputAdjustment, RawInvoiceInput};
use crate::totals::payload::InvoicePayload;
use crate::totals::{labour, materials, tax};
use crate::types::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Final amounts for one invoice, each to exactly two decimal places.
///
/// `invoice_total` is what the customer is billed and charged; it never
/// reflects CIS. `net_receivable` is what the tradesperson keeps after the
/// payer withholds CIS and is only ever shown to the tradesperson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TotalsBreakdown {
    pub labour_cost: Money,
    pub materials_total: Money,
    pub subtotal: Money,
    pub cis_deduction: Money,
    pub vat_amount: Money,
    pub invoice_total: Money,
    pub net_receivable: Money,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Compute every total for an invoice.
///
/// Pure and total: any input produces a breakdown. Out-of-range values are
/// normalised; use [`compute_totals_with_adjustments`] to see which.
pub fn compute_totals(
    labour: &LabourInput,
    materials: &[MaterialLine],
    tax: &TaxToggles,
) -> TotalsBreakdown {
    compute_totals_with_adjustments(labour, materials, tax).0
}

/// As [`compute_totals`], also returning every input the engine had to replace.
pub fn compute_totals_with_adjustments(
    labour_input: &LabourInput,
    material_lines: &[MaterialLine],
    toggles: &TaxToggles,
) -> (TotalsBreakdown, Vec<InputAdjustment>) {
    let mut adjustments = Vec::new();

    // Unrounded chain. Tax bases use the exact figures, not the displayed ones.
    // Arithmetic saturates so absurd magnitudes cannot panic mid-invoice, and
    // every leaf is capped so the finalised sums stay exact.
    let labour_raw = normalise::ceiling(
        "labour_cost",
        labour::labour_cost(labour_input, &mut adjustments),
        &mut adjustments,
    );
    let materials_raw = normalise::ceiling(
        "materials_total",
        materials::materials_total(material_lines, &mut adjustments),
        &mut adjustments,
    );
    let subtotal_raw = labour_raw + materials_raw;
    let cis_raw = normalise::ceiling(
        "cis_deduction",
        tax::cis_deduction(labour_raw, toggles, &mut adjustments),
        &mut adjustments,
    );
    let vat_raw = normalise::ceiling(
        "vat_amount",
        tax::vat_amount(subtotal_raw, toggles, &mut adjustments),
        &mut adjustments,
    );

    // Finalise: round each leaf once, derive the sums from the rounded leaves
    // so the printed figures always add up.
    let labour_cost = round_money(labour_raw);
    let materials_total = round_money(materials_raw);
    let cis_deduction = round_money(cis_raw);
    let vat_amount = round_money(vat_raw);

    let subtotal = labour_cost + materials_total;
    let invoice_total = subtotal + vat_amount;
    let net_receivable = invoice_total - cis_deduction;

    (
        TotalsBreakdown {
            labour_cost,
            materials_total,
            subtotal,
            cis_deduction,
            vat_amount,
            invoice_total,
            net_receivable,
        },
        adjustments,
    )
}

/// Compute totals and wrap them in the standard output envelope, with every
/// normalisation reported as a warning.
pub fn calculate_invoice_totals(input: &InvoiceTotalsInput) -> ComputationOutput<TotalsBreakdown> {
    calculate_with_prior_adjustments(input, Vec::new())
}

/// As [`calculate_invoice_totals`], with adjustments already made while the
/// input was decoded reported ahead of the engine's own.
pub fn calculate_with_prior_adjustments(
    input: &InvoiceTotalsInput,
    prior: Vec<InputAdjustment>,
) -> ComputationOutput<TotalsBreakdown> {
    let start = Instant::now();

    let (breakdown, adjustments) =
        compute_totals_with_adjustments(&input.labour, &input.materials, &input.tax);
    let warnings = prior
        .iter()
        .chain(&adjustments)
        .map(ToString::to_string)
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "UK trade invoice totals: labour + materials, CIS on labour, VAT on subtotal",
        &assumptions(input),
        warnings,
        elapsed,
        breakdown,
    )
}

/// Totals for an invoice posted by the web app, where empty numbers are
/// reported rather than rejected.
pub fn calculate_invoice_payload(payload: InvoicePayload) -> ComputationOutput<TotalsBreakdown> {
    let (input, prior) = payload.into_input();
    calculate_with_prior_adjustments(&input, prior)
}

/// Totals for input that arrived as floating-point numbers; non-finite values
/// are reported alongside range normalisations.
pub fn calculate_invoice_totals_f64(raw: RawInvoiceInput) -> ComputationOutput<TotalsBreakdown> {
    let (input, prior) = raw.into_decimal();
    calculate_with_prior_adjustments(&input, prior)
}

fn assumptions(input: &InvoiceTotalsInput) -> serde_json::Value {
    serde_json::json!({
        "labour_hours": input.labour.hours.map(|h| h.to_string()),
        "labour_rate": input.labour.rate.to_string(),
        "material_lines": input.materials.len(),
        "cis_enabled": input.tax.cis_enabled,
        "cis_rate_pct": input.tax.cis_rate_pct.to_string(),
        "vat_enabled": input.tax.vat_enabled,
        "vat_rate_pct": input.tax.vat_rate_pct.to_string(),
        "cis_base": "labour only",
        "vat_base": "labour + materials, before CIS",
        "rounding": "half-up to 2dp, once per leaf amount",
    })
}

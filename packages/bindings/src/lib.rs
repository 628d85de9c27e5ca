use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use voice_invoice_core::batch::{self, BatchPayload};
use voice_invoice_core::totals::{self, InvoicePayload, InvoiceTotalsInput, TotalsBreakdown};
use voice_invoice_core::views::{self, ListingRow, MaterialRow, SummaryLine};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Numbers the app sent as `null` (a JS `NaN`) are totalled as zero and
/// reported in `warnings`.
#[napi]
pub fn compute_totals(input_json: String) -> NapiResult<String> {
    let payload: InvoicePayload = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = totals::calculate_invoice_payload(payload);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_batch(input_json: String) -> NapiResult<String> {
    let payload: BatchPayload = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = batch::calculate_batch_payload(payload);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_invoice(input_json: String) -> NapiResult<bool> {
    let input: InvoiceTotalsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    voice_invoice_core::validation::validate_invoice_input(&input).map_err(to_napi_error)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Call-site views
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct InvoicePreview {
    totals: TotalsBreakdown,
    summary: Vec<SummaryLine>,
    materials: Vec<MaterialRow>,
    labour_hours: String,
    amount_due: String,
    payment_amount_pence: i64,
    listing: ListingRow,
    warnings: Vec<String>,
}

/// Everything the PDF renderer, email composer, payment link and listing
/// page need, from one engine call.
#[napi]
pub fn invoice_preview(input_json: String) -> NapiResult<String> {
    let payload: InvoicePayload = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let (input, prior) = payload.into_input();
    let (breakdown, adjustments) =
        totals::compute_totals_with_adjustments(&input.labour, &input.materials, &input.tax);

    let preview = InvoicePreview {
        totals: breakdown,
        summary: views::pdf_summary_lines(&breakdown, &input.tax),
        materials: views::material_rows(&input.materials),
        labour_hours: views::format_hours(input.labour.hours),
        amount_due: views::email_amount_due(&breakdown),
        payment_amount_pence: views::payment_amount_pence(&breakdown).map_err(to_napi_error)?,
        listing: ListingRow::from_breakdown(&breakdown),
        warnings: prior
            .iter()
            .chain(&adjustments)
            .map(ToString::to_string)
            .collect(),
    };
    serde_json::to_string(&preview).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting & config
// ---------------------------------------------------------------------------

/// `£1,234.56` from a JS number. NaN and infinities render as `£0.00`.
#[napi]
pub fn format_gbp(amount: f64) -> String {
    voice_invoice_core::currency::format_gbp(totals::normalise::money_or_zero(amount))
}

/// Validate a rate regime, or return the UK standard one when none is given.
#[napi]
pub fn rate_regime(regime_json: Option<String>) -> NapiResult<String> {
    let regime = match regime_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => voice_invoice_core::RateRegime::uk_standard(),
    };
    regime.validate().map_err(to_napi_error)?;
    serde_json::to_string(&regime).map_err(to_napi_error)
}

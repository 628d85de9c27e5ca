//! The invoice totals engine.
//!
//! Order of evaluation: line aggregation, labour, CIS, VAT, then a single
//! rounding pass in [`breakdown`].

pub mod breakdown;
pub mod input;
pub mod labour;
pub mod materials;
pub mod normalise;
pub mod payload;
pub mod tax;

pub use breakdown::{
    calculate_invoice_payload, calculate_invoice_totals, calculate_invoice_totals_f64,
    calculate_with_prior_adjustments, compute_totals, compute_totals_with_adjustments,
    TotalsBreakdown,
};
pub use input::{InvoiceTotalsInput, LabourInput, MaterialLine, TaxToggles};
pub use normalise::{
    AdjustmentReason, InputAdjustment, RawInvoiceInput, RawMaterialLine, MAX_AMOUNT,
};
pub use payload::{InvoicePayload, LabourPayload, TaxPayload};

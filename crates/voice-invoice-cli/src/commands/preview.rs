use clap::Args;
use serde_json::{json, Value};

use voice_invoice_core::totals::compute_totals_with_adjustments;
use voice_invoice_core::views;

use super::invoice::InvoiceArgs;

/// Arguments for an invoice preview
#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub invoice: InvoiceArgs,
}

/// Everything the PDF, email and payment link would show for this invoice.
pub fn run_preview(args: PreviewArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (invoice, prior) = args.invoice.load()?;
    let (breakdown, adjustments) =
        compute_totals_with_adjustments(&invoice.labour, &invoice.materials, &invoice.tax);

    let summary: Vec<Value> = views::pdf_summary_lines(&breakdown, &invoice.tax)
        .into_iter()
        .map(|l| json!({ "item": l.label, "amount": l.formatted }))
        .collect();

    Ok(json!({
        "result": {
            "labour_hours": views::format_hours(invoice.labour.hours),
            "labour_rate": voice_invoice_core::currency::format_gbp(invoice.labour.rate),
            "amount_due": views::email_amount_due(&breakdown),
            "payment_amount_pence": views::payment_amount_pence(&breakdown)?,
            "net_receivable": voice_invoice_core::currency::format_gbp(breakdown.net_receivable),
        },
        "summary": summary,
        "materials": views::material_rows(&invoice.materials),
        "warnings": prior
            .iter()
            .chain(&adjustments)
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
    }))
}

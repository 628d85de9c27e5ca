//! Figures in the shape each call site consumes: the PDF renderer, the
//! payment-link creator, the invoice email and the listing pages.
//!
//! Every function here reads a [`TotalsBreakdown`]; none of them add, scale
//! or round amounts on their own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{format_gbp, round_money, to_pence};
use crate::totals::materials::line_amount;
use crate::totals::{MaterialLine, TaxToggles, TotalsBreakdown};
use crate::types::*;
use crate::InvoiceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryLineKind {
    Labour,
    Materials,
    Subtotal,
    Vat,
    CisDeduction,
    InvoiceTotal,
}

/// One labelled amount in the totals block of the invoice PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub kind: SummaryLineKind,
    pub label: String,
    pub amount: Money,
    pub formatted: String,
}

/// A material row as printed on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRow {
    pub description: String,
    pub quantity: Decimal,
    /// `None` when the line was never priced
    pub unit_cost: Option<Money>,
    pub unit_cost_display: String,
    pub line_total: Money,
}

/// Totals for one row of an invoice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    pub invoice_total: Money,
    pub invoice_total_display: String,
    pub vat_amount: Money,
    pub cis_deduction: Money,
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

/// Totals block for the invoice document, in print order.
///
/// VAT and CIS lines appear only when their toggle is on. The net receivable
/// is deliberately absent: the document goes to the customer.
pub fn pdf_summary_lines(breakdown: &TotalsBreakdown, tax: &TaxToggles) -> Vec<SummaryLine> {
    let mut lines = vec![
        summary(SummaryLineKind::Labour, "Labour".into(), breakdown.labour_cost),
        summary(
            SummaryLineKind::Materials,
            "Materials".into(),
            breakdown.materials_total,
        ),
        summary(SummaryLineKind::Subtotal, "Subtotal".into(), breakdown.subtotal),
    ];
    if tax.vat_enabled {
        lines.push(summary(
            SummaryLineKind::Vat,
            format!("VAT ({})", format_pct(tax.vat_rate_pct)),
            breakdown.vat_amount,
        ));
    }
    if tax.cis_enabled {
        lines.push(summary(
            SummaryLineKind::CisDeduction,
            format!("CIS deduction ({}, labour only)", format_pct(tax.cis_rate_pct)),
            breakdown.cis_deduction,
        ));
    }
    lines.push(summary(
        SummaryLineKind::InvoiceTotal,
        "Invoice total".into(),
        breakdown.invoice_total,
    ));
    lines
}

/// Material rows for the invoice body. Unpriced lines stay on the document.
pub fn material_rows(materials: &[MaterialLine]) -> Vec<MaterialRow> {
    // Adjustments were already reported when the totals were computed.
    let mut ignored = Vec::new();
    materials
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let quantity = match line.quantity {
                Some(q) if q > Decimal::ZERO => q.normalize(),
                _ => Decimal::ONE,
            };
            MaterialRow {
                description: line
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Item {}", i + 1)),
                quantity,
                unit_cost: line.unit_cost,
                unit_cost_display: match line.unit_cost {
                    Some(c) => format_gbp(c.max(Decimal::ZERO)),
                    None => "Price TBC".into(),
                },
                line_total: round_money(line_amount(i, line, &mut ignored)),
            }
        })
        .collect()
}

/// Labour duration for display. Unknown hours are not the same as zero hours.
pub fn format_hours(hours: Option<Hours>) -> String {
    match hours {
        None => "Not specified".into(),
        Some(h) if h == Decimal::ONE => "1 hr".into(),
        Some(h) => format!("{} hrs", h.normalize()),
    }
}

fn format_pct(pct: RatePct) -> String {
    format!("{}%", pct.normalize())
}

fn summary(kind: SummaryLineKind, label: String, amount: Money) -> SummaryLine {
    SummaryLine {
        kind,
        label,
        amount,
        formatted: format_gbp(amount),
    }
}

// ---------------------------------------------------------------------------
// Payment link, email, listing
// ---------------------------------------------------------------------------

/// Amount to charge through a payment link, in pence. Always the invoice
/// total; CIS is settled between the payer and HMRC, not at checkout.
pub fn payment_amount_pence(breakdown: &TotalsBreakdown) -> InvoiceResult<i64> {
    to_pence(breakdown.invoice_total)
}

/// Amount due as shown in the invoice email body.
pub fn email_amount_due(breakdown: &TotalsBreakdown) -> String {
    format_gbp(breakdown.invoice_total)
}

impl ListingRow {
    pub fn from_breakdown(breakdown: &TotalsBreakdown) -> Self {
        ListingRow {
            invoice_total: breakdown.invoice_total,
            invoice_total_display: format_gbp(breakdown.invoice_total),
            vat_amount: breakdown.vat_amount,
            cis_deduction: breakdown.cis_deduction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::{compute_totals, LabourInput};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn toggles(cis: bool, vat: bool) -> TaxToggles {
        TaxToggles {
            cis_enabled: cis,
            cis_rate_pct: dec!(20),
            vat_enabled: vat,
            vat_rate_pct: dec!(20),
        }
    }

    fn boiler_job(tax: &TaxToggles) -> TotalsBreakdown {
        let labour = LabourInput {
            hours: Some(dec!(3)),
            rate: dec!(45),
        };
        let materials = vec![
            MaterialLine::priced(dec!(180), dec!(1)),
            MaterialLine::priced(dec!(45), dec!(1)),
        ];
        compute_totals(&labour, &materials, tax)
    }

    #[test]
    fn test_pdf_lines_with_both_taxes() {
        let tax = toggles(true, true);
        let lines = pdf_summary_lines(&boiler_job(&tax), &tax);
        let rendered: Vec<(String, String)> = lines
            .iter()
            .map(|l| (l.label.clone(), l.formatted.clone()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("Labour".to_string(), "£135.00".to_string()),
                ("Materials".to_string(), "£225.00".to_string()),
                ("Subtotal".to_string(), "£360.00".to_string()),
                ("VAT (20%)".to_string(), "£72.00".to_string()),
                (
                    "CIS deduction (20%, labour only)".to_string(),
                    "£27.00".to_string()
                ),
                ("Invoice total".to_string(), "£432.00".to_string()),
            ]
        );
    }

    #[test]
    fn test_pdf_lines_omit_disabled_taxes() {
        let tax = toggles(false, false);
        let kinds: Vec<SummaryLineKind> = pdf_summary_lines(&boiler_job(&tax), &tax)
            .iter()
            .map(|l| l.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SummaryLineKind::Labour,
                SummaryLineKind::Materials,
                SummaryLineKind::Subtotal,
                SummaryLineKind::InvoiceTotal,
            ]
        );
    }

    #[test]
    fn test_payment_uses_invoice_total_not_net() {
        let tax = toggles(true, true);
        let b = boiler_job(&tax);
        assert_eq!(payment_amount_pence(&b).unwrap(), 43_200);
        assert_ne!(b.invoice_total, b.net_receivable);
    }

    #[test]
    fn test_email_and_listing_agree_with_pdf() {
        let tax = toggles(true, true);
        let b = boiler_job(&tax);
        let pdf_total = pdf_summary_lines(&b, &tax)
            .into_iter()
            .find(|l| l.kind == SummaryLineKind::InvoiceTotal)
            .unwrap();
        let row = ListingRow::from_breakdown(&b);
        assert_eq!(email_amount_due(&b), pdf_total.formatted);
        assert_eq!(row.invoice_total_display, pdf_total.formatted);
        assert_eq!(row.invoice_total, pdf_total.amount);
    }

    #[test]
    fn test_material_rows_keep_unpriced() {
        let materials = vec![
            MaterialLine::priced(dec!(2.50), dec!(4)).with_description("Compression fitting"),
            MaterialLine::unpriced("Radiator"),
            MaterialLine::priced(dec!(12), dec!(0)),
        ];
        let rows = material_rows(&materials);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].description, "Compression fitting");
        assert_eq!(rows[0].unit_cost_display, "£2.50");
        assert_eq!(rows[0].line_total, dec!(10.00));
        assert_eq!(rows[1].unit_cost, None);
        assert_eq!(rows[1].unit_cost_display, "Price TBC");
        assert_eq!(rows[1].line_total, dec!(0));
        assert_eq!(rows[2].description, "Item 3");
        assert_eq!(rows[2].quantity, dec!(1));
        assert_eq!(rows[2].line_total, dec!(12.00));
    }

    #[test]
    fn test_format_hours_distinguishes_unknown_from_zero() {
        assert_eq!(format_hours(None), "Not specified");
        assert_eq!(format_hours(Some(dec!(0))), "0 hrs");
        assert_eq!(format_hours(Some(dec!(1))), "1 hr");
        assert_eq!(format_hours(Some(dec!(2.50))), "2.5 hrs");
    }
}

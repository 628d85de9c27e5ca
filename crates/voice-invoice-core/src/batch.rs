use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::currency::MONEY_DP;
use crate::totals::{
    compute_totals_with_adjustments, InputAdjustment, InvoicePayload, InvoiceTotalsInput,
    TotalsBreakdown,
};
use crate::types::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A page of invoices, as a listing view loads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTotalsInput {
    pub invoices: Vec<InvoiceTotalsInput>,
}

/// A listing page as the web app posts it, with nullable numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchPayload {
    #[serde(default)]
    pub invoices: Vec<InvoicePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTotalsOutput {
    pub per_invoice: Vec<TotalsBreakdown>,
    pub invoice_count: usize,
    pub total_invoiced: Money,
    pub total_vat: Money,
    pub total_cis_withheld: Money,
    pub total_net_receivable: Money,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Totals for every invoice on a listing page, plus page-level sums.
///
/// Each row goes through the same engine as the PDF and email; the sums are
/// taken over the already-rounded per-invoice figures.
pub fn calculate_batch(input: &BatchTotalsInput) -> ComputationOutput<BatchTotalsOutput> {
    summarise(input.invoices.iter().map(|inv| (inv, Vec::new())))
}

/// As [`calculate_batch`], for a page whose numbers may be `null`.
pub fn calculate_batch_payload(payload: BatchPayload) -> ComputationOutput<BatchTotalsOutput> {
    let decoded: Vec<(InvoiceTotalsInput, Vec<InputAdjustment>)> = payload
        .invoices
        .into_iter()
        .map(InvoicePayload::into_input)
        .collect();
    summarise(decoded.iter().map(|(inv, prior)| (inv, prior.clone())))
}

fn summarise<'a>(
    invoices: impl ExactSizeIterator<Item = (&'a InvoiceTotalsInput, Vec<InputAdjustment>)>,
) -> ComputationOutput<BatchTotalsOutput> {
    let start = Instant::now();
    let count = invoices.len();
    let mut warnings: Vec<String> = Vec::new();

    let mut per_invoice = Vec::with_capacity(count);
    let mut total_invoiced = Decimal::new(0, MONEY_DP);
    let mut total_vat = Decimal::new(0, MONEY_DP);
    let mut total_cis = Decimal::new(0, MONEY_DP);
    let mut total_net = Decimal::new(0, MONEY_DP);

    for (i, (invoice, prior)) in invoices.enumerate() {
        let (breakdown, adjustments) =
            compute_totals_with_adjustments(&invoice.labour, &invoice.materials, &invoice.tax);

        // Carry per-invoice warnings up to page level
        for a in prior.iter().chain(&adjustments) {
            warnings.push(format!("Invoice {}: {}", i + 1, a));
        }

        total_invoiced = total_invoiced.saturating_add(breakdown.invoice_total);
        total_vat = total_vat.saturating_add(breakdown.vat_amount);
        total_cis = total_cis.saturating_add(breakdown.cis_deduction);
        total_net = total_net.saturating_add(breakdown.net_receivable);
        per_invoice.push(breakdown);
    }

    let output = BatchTotalsOutput {
        invoice_count: per_invoice.len(),
        per_invoice,
        total_invoiced,
        total_vat,
        total_cis_withheld: total_cis,
        total_net_receivable: total_net,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Invoice listing totals: per-invoice engine results with page sums",
        &serde_json::json!({
            "invoice_count": count,
            "sum_basis": "rounded per-invoice totals",
        }),
        warnings,
        elapsed,
        output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::{compute_totals, LabourInput, MaterialLine, TaxToggles};
    use rust_decimal_macros::dec;

    fn invoice(hours: Option<Decimal>, materials: Vec<MaterialLine>, cis: bool, vat: bool) -> InvoiceTotalsInput {
        InvoiceTotalsInput {
            labour: LabourInput {
                hours,
                rate: dec!(45),
            },
            materials,
            tax: TaxToggles {
                cis_enabled: cis,
                cis_rate_pct: dec!(20),
                vat_enabled: vat,
                vat_rate_pct: dec!(20),
            },
        }
    }

    #[test]
    fn test_batch_matches_single_engine() {
        let invoices = vec![
            invoice(
                Some(dec!(3)),
                vec![
                    MaterialLine::priced(dec!(180), dec!(1)),
                    MaterialLine::priced(dec!(45), dec!(1)),
                ],
                true,
                true,
            ),
            invoice(None, vec![], false, false),
            invoice(
                Some(dec!(2)),
                vec![MaterialLine::priced(dec!(120), dec!(1))],
                false,
                true,
            ),
        ];
        let out = calculate_batch(&BatchTotalsInput {
            invoices: invoices.clone(),
        });
        let r = &out.result;

        assert_eq!(r.invoice_count, 3);
        for (inv, row) in invoices.iter().zip(&r.per_invoice) {
            assert_eq!(*row, compute_totals(&inv.labour, &inv.materials, &inv.tax));
        }
        assert_eq!(r.total_invoiced, dec!(684.00));
        assert_eq!(r.total_vat, dec!(114.00));
        assert_eq!(r.total_cis_withheld, dec!(27.00));
        assert_eq!(r.total_net_receivable, dec!(657.00));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_batch_prefixes_warnings_with_invoice_number() {
        let invoices = vec![
            invoice(Some(dec!(1)), vec![], false, false),
            invoice(Some(dec!(-1)), vec![], false, false),
        ];
        let out = calculate_batch(&BatchTotalsInput { invoices });
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].starts_with("Invoice 2: labour.hours"));
    }

    #[test]
    fn test_empty_batch() {
        let out = calculate_batch(&BatchTotalsInput { invoices: vec![] });
        assert_eq!(out.result.invoice_count, 0);
        assert_eq!(out.result.total_invoiced, Decimal::ZERO);

        let json = serde_json::to_value(&out.result).unwrap();
        assert_eq!(json["total_invoiced"], "0.00");
        assert_eq!(json["total_vat"], "0.00");
        assert_eq!(json["total_cis_withheld"], "0.00");
        assert_eq!(json["total_net_receivable"], "0.00");
    }

    #[test]
    fn test_payload_batch_reports_null_rate_per_invoice() {
        let payload: BatchPayload = serde_json::from_str(
            r#"{ "invoices": [
                { "labour": { "hours": 2, "rate": 45 } },
                { "labour": { "hours": 2, "rate": null },
                  "materials": [{ "unitCost": 10, "qty": 1 }] }
            ] }"#,
        )
        .unwrap();
        let out = calculate_batch_payload(payload);

        assert_eq!(out.result.invoice_count, 2);
        assert_eq!(out.result.total_invoiced, dec!(100.00));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].starts_with("Invoice 2: labour.rate: null"));
    }
}

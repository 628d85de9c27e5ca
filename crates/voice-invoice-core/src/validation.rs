//! Strict checks for the data-entry boundary.
//!
//! The engine tolerates anything; this is where genuinely invalid invoices
//! are turned away before they are saved. It is never called by the engine.

use rust_decimal::Decimal;

use crate::error::InvoiceError;
use crate::totals::{InvoiceTotalsInput, MAX_AMOUNT};
use crate::InvoiceResult;

pub fn validate_invoice_input(input: &InvoiceTotalsInput) -> InvoiceResult<()> {
    if let Some(hours) = input.labour.hours {
        if hours < Decimal::ZERO {
            return Err(InvoiceError::invalid(
                "labour.hours",
                "Hours worked cannot be negative",
            ));
        }
    }
    if input.labour.rate < Decimal::ZERO {
        return Err(InvoiceError::invalid(
            "labour.rate",
            "Hourly rate cannot be negative",
        ));
    }
    within_limit("labour.hours", input.labour.hours)?;
    within_limit("labour.rate", Some(input.labour.rate))?;

    for (i, line) in input.materials.iter().enumerate() {
        if let Some(cost) = line.unit_cost {
            if cost < Decimal::ZERO {
                return Err(InvoiceError::invalid(
                    format!("materials[{i}].unit_cost"),
                    "Material price cannot be negative",
                ));
            }
        }
        if let Some(qty) = line.quantity {
            if qty <= Decimal::ZERO {
                return Err(InvoiceError::invalid(
                    format!("materials[{i}].quantity"),
                    "Quantity must be greater than zero",
                ));
            }
        }
        within_limit(&format!("materials[{i}].unit_cost"), line.unit_cost)?;
        within_limit(&format!("materials[{i}].quantity"), line.quantity)?;
    }

    for (field, pct) in [
        ("tax.cis_rate_pct", input.tax.cis_rate_pct),
        ("tax.vat_rate_pct", input.tax.vat_rate_pct),
    ] {
        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            return Err(InvoiceError::invalid(
                field,
                "Rate must be between 0 and 100 percent",
            ));
        }
    }

    Ok(())
}

fn within_limit(field: &str, value: Option<Decimal>) -> InvoiceResult<()> {
    match value {
        Some(v) if v > MAX_AMOUNT => Err(InvoiceError::invalid(
            field,
            format!("Must not exceed {MAX_AMOUNT}"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::{LabourInput, MaterialLine, TaxToggles};
    use rust_decimal_macros::dec;

    fn valid_input() -> InvoiceTotalsInput {
        InvoiceTotalsInput {
            labour: LabourInput {
                hours: Some(dec!(3)),
                rate: dec!(45),
            },
            materials: vec![
                MaterialLine::priced(dec!(180), dec!(1)),
                MaterialLine::unpriced("Fixings"),
            ],
            tax: TaxToggles {
                cis_enabled: true,
                cis_rate_pct: dec!(20),
                vat_enabled: true,
                vat_rate_pct: dec!(20),
            },
        }
    }

    fn field_of(err: InvoiceError) -> String {
        match err {
            InvoiceError::InvalidInput { field, .. } => field,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_invoice_input(&valid_input()).is_ok());
    }

    #[test]
    fn test_unknown_hours_are_valid() {
        let mut input = valid_input();
        input.labour.hours = None;
        assert!(validate_invoice_input(&input).is_ok());
    }

    #[test]
    fn test_negative_hours_rejected() {
        let mut input = valid_input();
        input.labour.hours = Some(dec!(-1));
        let err = validate_invoice_input(&input).unwrap_err();
        assert_eq!(field_of(err), "labour.hours");
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut input = valid_input();
        input.materials.push(MaterialLine::priced(dec!(-5), dec!(1)));
        let err = validate_invoice_input(&input).unwrap_err();
        assert_eq!(field_of(err), "materials[2].unit_cost");
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut input = valid_input();
        input.materials[0].quantity = Some(dec!(0));
        let err = validate_invoice_input(&input).unwrap_err();
        assert_eq!(field_of(err), "materials[0].quantity");
    }

    #[test]
    fn test_rate_over_100_rejected() {
        let mut input = valid_input();
        input.tax.cis_rate_pct = dec!(120);
        let err = validate_invoice_input(&input).unwrap_err();
        assert!(err.to_string().contains("tax.cis_rate_pct"));
    }

    #[test]
    fn test_amounts_above_limit_rejected() {
        let mut input = valid_input();
        input.labour.hours = Some(Decimal::MAX);
        let err = validate_invoice_input(&input).unwrap_err();
        assert_eq!(field_of(err), "labour.hours");

        let mut input = valid_input();
        input.materials[0].quantity = Some(MAX_AMOUNT + Decimal::ONE);
        let err = validate_invoice_input(&input).unwrap_err();
        assert_eq!(field_of(err), "materials[0].quantity");

        let mut input = valid_input();
        input.labour.rate = MAX_AMOUNT;
        assert!(validate_invoice_input(&input).is_ok());
    }
}

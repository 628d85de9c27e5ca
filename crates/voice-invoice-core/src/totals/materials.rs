use rust_decimal::Decimal;

use crate::totals::input::MaterialLine;
use crate::totals::normalise::{self, InputAdjustment};
use crate::types::*;

/// Unrounded amount for one line: unit cost times quantity.
///
/// An unpriced line is zero whatever its quantity.
pub fn line_amount(
    index: usize,
    line: &MaterialLine,
    adjustments: &mut Vec<InputAdjustment>,
) -> Money {
    let Some(unit_cost) = line.unit_cost else {
        return Decimal::ZERO;
    };
    let unit_cost = normalise::non_negative(
        || format!("materials[{index}].unit_cost"),
        unit_cost,
        adjustments,
    );
    let qty = normalise::quantity(
        || format!("materials[{index}].quantity"),
        line.quantity,
        adjustments,
    );
    unit_cost.saturating_mul(qty)
}

/// Unrounded sum over all lines.
pub fn materials_total(lines: &[MaterialLine], adjustments: &mut Vec<InputAdjustment>) -> Money {
    lines
        .iter()
        .enumerate()
        .fold(Decimal::ZERO, |acc, (i, line)| {
            acc.saturating_add(line_amount(i, line, adjustments))
        })
}

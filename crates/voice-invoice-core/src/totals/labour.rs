use rust_decimal::Decimal;

use crate::totals::input::LabourInput;
use crate::totals::normalise::{self, InputAdjustment};
use crate::types::*;

/// Unrounded labour cost: hours times rate. Unknown hours cost nothing.
pub fn labour_cost(labour: &LabourInput, adjustments: &mut Vec<InputAdjustment>) -> Money {
    let rate = normalise::non_negative(|| "labour.rate".into(), labour.rate, adjustments);
    let hours = match labour.hours {
        Some(h) => normalise::non_negative(|| "labour.hours".into(), h, adjustments),
        None => Decimal::ZERO,
    };
    hours.saturating_mul(rate)
}

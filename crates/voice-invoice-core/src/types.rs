use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in pounds sterling. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Tax rates expressed as percentage points (20 = 20%). Never as fractions.
pub type RatePct = Decimal;

/// Labour duration in hours (may be fractional, e.g. 2.5)
pub type Hours = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Percentage points to a multiplier (20 -> 0.20).
pub(crate) fn pct_to_fraction(pct: RatePct) -> Decimal {
    pct / Decimal::ONE_HUNDRED
}

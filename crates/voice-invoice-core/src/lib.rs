pub mod config;
pub mod currency;
pub mod error;
pub mod totals;
pub mod types;
pub mod validation;

#[cfg(feature = "views")]
pub mod views;

#[cfg(feature = "batch")]
pub mod batch;

pub use config::RateRegime;
pub use error::InvoiceError;
pub use totals::{compute_totals, TotalsBreakdown};
pub use types::*;

/// Standard result type for all voice-invoice operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;

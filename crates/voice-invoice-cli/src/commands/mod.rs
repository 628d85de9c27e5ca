pub mod batch;
pub mod format;
pub mod invoice;
pub mod preview;
pub mod rates;
pub mod totals;
pub mod validate;

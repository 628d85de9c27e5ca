use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid rate regime: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for InvoiceError {
    fn from(e: serde_json::Error) -> Self {
        InvoiceError::SerializationError(e.to_string())
    }
}

impl InvoiceError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        InvoiceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

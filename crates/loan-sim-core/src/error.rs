use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanSimError {
    #[error("Invalid parameters: {field} — {reason}")]
    InvalidParameters { field: String, reason: String },

    #[error("Export to '{path}' failed: {reason}")]
    Export { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoanSimError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanSimError::InvalidParameters {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "export")]
impl From<csv::Error> for LoanSimError {
    fn from(e: csv::Error) -> Self {
        LoanSimError::Serialization(e.to_string())
    }
}

//! Error handling primitives shared across the core.
//!
//! Every variant maps onto a stable [`BoardCode`] so hosts calling through the
//! C ABI can branch on a number instead of parsing messages.

/// Stable error codes that cross the FFI boundary.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoardCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// Input failed validation.
    InvalidInput = 1,
    /// Catch-all for bugs.
    Internal = 2,
}

/// Canonical error type for the core.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("record {index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: `{field}` must be a non-negative integer, got {value}")]
    InvalidCount {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("duplicate category `{0}`")]
    DuplicateCategory(String),

    #[error("primary category `{0}` is not present in the records")]
    UnknownPrimary(String),

    #[error("system accuracy {0} is outside [0, 1]")]
    AccuracyOutOfRange(f64),

    #[error("internal error: {0}")]
    Internal(&'static str),
}

/// Result alias used throughout the crate.
pub type BoardResult<T> = Result<T, BoardError>;

impl BoardError {
    /// Machine parsable code for this error.
    pub fn code(&self) -> BoardCode {
        match self {
            BoardError::Internal(_) => BoardCode::Internal,
            _ => BoardCode::InvalidInput,
        }
    }

    /// Validation helper.
    pub fn malformed(msg: impl Into<String>) -> Self {
        BoardError::Malformed(msg.into())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Malformed(err.to_string())
    }
}

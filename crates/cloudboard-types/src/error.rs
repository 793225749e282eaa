use std::fmt;

/// Result type for cloudboard-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// Month label is not a zero-padded `YYYY-MM`
    InvalidMonth(String),

    /// A feed record could not be turned into a typed row
    InvalidRecord { index: usize, reason: String },

    /// Feed document is not valid JSON for the expected record shape
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMonth(value) => {
                write!(f, "Invalid month '{}': expected YYYY-MM", value)
            }
            Error::InvalidRecord { index, reason } => {
                write!(f, "Invalid record at index {}: {}", index, reason)
            }
            Error::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::InvalidMonth(_) | Error::InvalidRecord { .. } => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

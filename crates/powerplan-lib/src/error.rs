use thiserror::Error;

/// Convenient result alias for the powerplan library.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`] values.
///
/// Callers (the HTTP service in particular) switch on this instead of
/// parsing error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request or configuration violated an input constraint.
    Validation,
    /// The units cannot produce enough power to cover the load.
    InfeasibleLowCapacity,
    /// Forced minimum output could not be trimmed back down to the load.
    InfeasibleHighMinimum,
    /// Reading or decoding an input source failed.
    Io,
}

impl ErrorKind {
    /// Stable snake_case label, used for metric labels and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::InfeasibleLowCapacity => "insufficient_capacity",
            ErrorKind::InfeasibleHighMinimum => "excess_minimum_output",
            ErrorKind::Io => "io_error",
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a request or configuration field is out of range.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Raised when two units in one request share a name.
    #[error("duplicate unit name encountered: {name}")]
    DuplicateUnitName { name: String },

    /// Raised when a unit catalog file is malformed.
    #[error("invalid unit catalog: {message}")]
    UnitCatalog { message: String },

    /// Every unit runs at its maximum and the load is still not met.
    #[error("load of {load} MW exceeds total available capacity of {capacity} MW")]
    InfeasibleLowCapacity { load: f64, capacity: f64 },

    /// The reverse correction walk ran out of units to trim.
    #[error(
        "cannot meet load of {load} MW: {excess} MW of forced minimum output could not be absorbed"
    )]
    InfeasibleHighMinimum { load: f64, excess: f64 },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON payload decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput { .. }
            | Error::DuplicateUnitName { .. }
            | Error::UnitCatalog { .. } => ErrorKind::Validation,
            Error::InfeasibleLowCapacity { .. } => ErrorKind::InfeasibleLowCapacity,
            Error::InfeasibleHighMinimum { .. } => ErrorKind::InfeasibleHighMinimum,
            Error::Io(_) | Error::Json(_) | Error::Csv(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }
}

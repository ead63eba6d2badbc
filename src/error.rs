use thiserror::Error;

/// Errors that end a chart calculation. None of them leaves a partial result behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),
}

impl ChartError {
    /// Stable code used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            ChartError::InvalidDate(_) => "INVALID_DATE",
            ChartError::InvalidTimezone(_) => "INVALID_TIMEZONE",
            ChartError::EphemerisUnavailable(_) => "EPHEMERIS_UNAVAILABLE",
        }
    }

    /// Whether the caller sent something unusable, as opposed to a server-side failure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ChartError::EphemerisUnavailable(_))
    }
}

pub type CalculationResult<T> = Result<T, ChartError>;

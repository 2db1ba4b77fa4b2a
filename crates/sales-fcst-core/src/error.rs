//! Error types for the sales forecasting engine.

use thiserror::Error;

/// Result type for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Error types for forecasting engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Invalid horizon {horizon}: months_ahead must be between {min} and {max}")]
    InvalidHorizon { horizon: i64, min: usize, max: usize },

    #[error("Insufficient data: need at least {needed} monthly observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse classification callers use to decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was malformed (horizon out of range).
    Validation,
    /// Too few historical months to fit the model.
    InsufficientData,
    /// Anything that went wrong while building features, fitting or predicting.
    Computation,
}

impl ForecastError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastError::InvalidHorizon { .. } => ErrorKind::Validation,
            ForecastError::InsufficientData { .. } => ErrorKind::InsufficientData,
            ForecastError::InvalidInput(_)
            | ForecastError::ComputationError(_)
            | ForecastError::InternalError(_) => ErrorKind::Computation,
        }
    }

    /// HTTP status a hosting service should answer with.
    ///
    /// Request problems (bad horizon, not enough history) are client errors,
    /// everything else is a server-side failure.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::InsufficientData => 400,
            ErrorKind::Computation => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_classification() {
        let err = ForecastError::InvalidHorizon {
            horizon: 13,
            min: 1,
            max: 12,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = ForecastError::InsufficientData { needed: 6, got: 5 };
        assert_eq!(err.kind(), ErrorKind::InsufficientData);

        assert_eq!(
            ForecastError::InvalidInput("month 13".into()).kind(),
            ErrorKind::Computation
        );
        assert_eq!(
            ForecastError::ComputationError("singular".into()).kind(),
            ErrorKind::Computation
        );
        assert_eq!(
            ForecastError::InternalError("oops".into()).kind(),
            ErrorKind::Computation
        );
    }

    #[test]
    fn test_status_codes() {
        let err = ForecastError::InvalidHorizon {
            horizon: -1,
            min: 1,
            max: 12,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            ForecastError::InsufficientData { needed: 6, got: 0 }.status_code(),
            400
        );
        assert_eq!(ForecastError::InvalidInput("nan".into()).status_code(), 500);
    }

    #[test]
    fn test_error_display() {
        let err = ForecastError::InvalidHorizon {
            horizon: 13,
            min: 1,
            max: 12,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid horizon 13: months_ahead must be between 1 and 12"
        );

        let err = ForecastError::InsufficientData { needed: 6, got: 5 };
        assert_eq!(
            format!("{}", err),
            "Insufficient data: need at least 6 monthly observations, got 5"
        );

        let err = ForecastError::ComputationError("OLS fit failed".into());
        assert_eq!(format!("{}", err), "Computation error: OLS fit failed");
    }
}

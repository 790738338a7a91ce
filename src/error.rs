//! Error types for lattice construction, site access, and estimation.
//!
//! Every error is surfaced to the caller synchronously. A failed call
//! leaves the lattice or estimator exactly as it was.

use thiserror::Error;

/// Top-level error type for all fallible operations in the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Grid size must be at least 1 and small enough that `n² + 2` fits
    /// in `usize`.
    #[error("grid size must be positive and n² + 2 must fit in usize, got {n}")]
    InvalidGridSize { n: usize },

    /// Trial count must be at least 1.
    #[error("trial count must be positive, got {trials}")]
    InvalidTrialCount { trials: usize },

    /// Row or column outside `[1, n]`.
    #[error("site ({row}, {col}) is outside the {n}x{n} grid (valid range is 1..={n})")]
    SiteOutOfRange { row: usize, col: usize, n: usize },

    /// Confidence level outside the open interval `(0, 1)`.
    #[error("confidence level must lie in (0, 1), got {level}")]
    InvalidConfidenceLevel { level: f64 },
}

impl Error {
    /// Returns `true` for errors raised while configuring a lattice or
    /// estimator, as opposed to errors from individual site accesses.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidGridSize { .. } | Error::InvalidTrialCount { .. }
        )
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::SiteOutOfRange { row: 0, col: 3, n: 5 };
        assert_eq!(
            err.to_string(),
            "site (0, 3) is outside the 5x5 grid (valid range is 1..=5)"
        );
        assert_eq!(
            Error::InvalidGridSize { n: 0 }.to_string(),
            "grid size must be positive and n² + 2 must fit in usize, got 0"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(Error::InvalidGridSize { n: 0 }.is_configuration());
        assert!(Error::InvalidTrialCount { trials: 0 }.is_configuration());
        assert!(!Error::SiteOutOfRange { row: 9, col: 1, n: 2 }.is_configuration());
        assert!(!Error::InvalidConfidenceLevel { level: 1.5 }.is_configuration());
    }
}

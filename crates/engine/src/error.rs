//! Error types for the simulation engine.
//!
//! Provides typed errors for input validation failures raised before any
//! sampling work begins.

use thiserror::Error;

/// Errors that can occur when configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The requested number of simulations is zero.
    #[error("number of simulations must be positive, got {count}")]
    InvalidSimulationCount {
        /// The rejected simulation count.
        count: u64,
    },

    /// Decimal odds at or below 1.0 cannot pay out a profit.
    #[error("decimal odds must be greater than 1.0, got {odds}")]
    InvalidOdds {
        /// The rejected odds value.
        odds: f64,
    },

    /// Worker count of zero leaves no one to run batches.
    #[error("worker count must be positive, got {workers}")]
    InvalidWorkerCount {
        /// The rejected worker count.
        workers: usize,
    },
}

impl SimulationError {
    /// Creates an invalid simulation count error.
    #[must_use]
    pub fn invalid_simulation_count(count: u64) -> Self {
        Self::InvalidSimulationCount { count }
    }

    /// Creates an invalid odds error.
    #[must_use]
    pub fn invalid_odds(odds: f64) -> Self {
        Self::InvalidOdds { odds }
    }

    /// Creates an invalid worker count error.
    #[must_use]
    pub fn invalid_worker_count(workers: usize) -> Self {
        Self::InvalidWorkerCount { workers }
    }
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Error Display Tests ====================

    #[test]
    fn test_invalid_simulation_count_display() {
        let err = SimulationError::invalid_simulation_count(0);
        let display = err.to_string();
        assert!(display.contains("must be positive"));
        assert!(display.contains('0'));
    }

    #[test]
    fn test_invalid_odds_display() {
        let err = SimulationError::invalid_odds(1.0);
        let display = err.to_string();
        assert!(display.contains("greater than 1.0"));
        assert!(display.contains('1'));
    }

    #[test]
    fn test_invalid_odds_below_one_display() {
        let err = SimulationError::invalid_odds(0.5);
        assert!(err.to_string().contains("0.5"));
    }

    #[test]
    fn test_invalid_worker_count_display() {
        let err = SimulationError::invalid_worker_count(0);
        assert!(err.to_string().contains("worker count"));
    }

    #[test]
    fn test_error_matches_variant() {
        let err = SimulationError::invalid_simulation_count(0);
        assert!(matches!(
            err,
            SimulationError::InvalidSimulationCount { count: 0 }
        ));
    }
}

//! Error types for the data pipeline.

use thiserror::Error;

/// Errors raised while fetching, blending, or adjusting team data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Recency weight outside the valid [0, 1] range.
    #[error("recency_weight must be between 0 and 1, got {weight}")]
    InvalidRecencyWeight {
        /// The rejected weight.
        weight: f64,
    },

    /// The fetcher has no data for the requested team.
    #[error("no data available for team '{name}'")]
    UnknownTeam {
        /// The team name that could not be resolved.
        name: String,
    },

    /// A matchup document could not be read from disk.
    #[error("failed to read matchup document: {0}")]
    Io(#[from] std::io::Error),

    /// A matchup document could not be parsed.
    #[error("failed to parse matchup document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DataError {
    /// Creates an invalid recency weight error.
    #[must_use]
    pub fn invalid_recency_weight(weight: f64) -> Self {
        Self::InvalidRecencyWeight { weight }
    }

    /// Creates an unknown team error.
    #[must_use]
    pub fn unknown_team(name: impl Into<String>) -> Self {
        Self::UnknownTeam { name: name.into() }
    }
}

/// Result type alias for data pipeline operations.
pub type Result<T> = std::result::Result<T, DataError>;

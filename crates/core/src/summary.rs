//! Aggregated simulation results and the betting decision derived from
//! them.

use serde::{Deserialize, Serialize};

/// Aggregate statistics over a full batch of simulated games.
///
/// Percentages are derived exactly from their counts, so
/// `home_covers_count + push_count` never exceeds `games_simulated` and
/// the corresponding percentages never exceed 100. The confidence
/// interval bounds the *mean* margin via the standard error; it is not a
/// predictive interval for individual game margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub games_simulated: u64,
    pub home_covers_count: u64,
    pub home_covers_percentage: f64,
    pub push_count: u64,
    pub push_percentage: f64,
    pub home_wins_count: u64,
    pub home_win_percentage: f64,
    pub average_home_score: f64,
    pub average_away_score: f64,
    pub average_margin: f64,
    pub margin_std_dev: f64,
    /// 95% confidence interval for the mean margin as (lower, upper).
    pub confidence_interval_95: (f64, f64),
}

impl SimulationSummary {
    /// Average combined points implied by the average scores.
    #[must_use]
    pub fn average_total(&self) -> f64 {
        self.average_home_score + self.average_away_score
    }
}

/// Verdict on whether the simulated probabilities justify a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetCall {
    /// Simulated edge clears the threshold; the home spread is +EV.
    PositiveEv,
    /// The posted line is efficient; no bet.
    NoBet,
}

impl BetCall {
    /// Human-readable description of this verdict.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PositiveEv => "POSITIVE EV BET on home spread",
            Self::NoBet => "NO BET - LINE IS EFFICIENT.",
        }
    }

    /// True when the verdict recommends placing the bet.
    #[must_use]
    pub const fn is_bet(&self) -> bool {
        matches!(self, Self::PositiveEv)
    }
}

/// Probability and value analysis of a home spread ticket at given odds.
///
/// Probabilities always satisfy `win + push + loss == 1.0`; the loss side
/// is derived from the other two and clamped at zero. Expected value is
/// per unit stake, and `edge_percentage` is that value expressed as a
/// percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BettingDecision {
    pub win_probability: f64,
    pub push_probability: f64,
    pub loss_probability: f64,
    /// Probability the sportsbook's odds imply (1 / decimal odds).
    pub implied_probability: f64,
    /// Win rate needed to break even, counting pushes as refunds.
    pub breakeven_probability: f64,
    /// Win probability minus the break-even probability.
    pub probability_difference: f64,
    /// Expected profit or loss per unit staked.
    pub expected_value: f64,
    /// Expected value expressed as a percentage of stake.
    pub edge_percentage: f64,
    pub call: BetCall,
}

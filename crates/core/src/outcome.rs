//! Single-game outcomes and spread settlement.
//!
//! One [`GameOutcome`] is produced per simulated game and folded into the
//! running aggregates immediately. Outcomes are never retained in bulk, so
//! simulation memory stays constant in the number of games.

use serde::{Deserialize, Serialize};

/// Absolute tolerance for detecting a push on the spread.
///
/// Margins are integers and spreads are quoted in half-point increments,
/// so exact equality would suffice in practice. The tolerance is kept
/// because downstream settlement depends on this exact comparison.
pub const PUSH_TOLERANCE: f64 = 1e-9;

/// Minimum final score a simulated team can post.
pub const MIN_TEAM_SCORE: u32 = 70;

/// Result of one simulated game.
///
/// `home_covers` and `is_push` are mutually exclusive: a margin that lands
/// exactly on the line refunds the ticket and is never counted as a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub home_score: u32,
    pub away_score: u32,
    /// Positive when the home team wins.
    pub home_margin: i32,
    pub total_points: u32,
    /// True when the home spread ticket wins.
    pub home_covers: bool,
    /// True when the margin lands exactly on the line (stake refunded).
    pub is_push: bool,
}

impl GameOutcome {
    /// Settles a pair of final scores against the posted spread.
    ///
    /// Spread convention is home-perspective: negative means the home team
    /// is favored. A favorite covers only by winning by more than the
    /// absolute line; an underdog covers by losing by less than the line
    /// (or winning outright). The push check runs first and compares the
    /// margin to `-spread` only: a home ticket refunds when the favorite
    /// wins by exactly the line, never when the margin happens to equal
    /// `+spread` on the other side.
    #[must_use]
    pub fn settle(home_score: u32, away_score: u32, spread: f64) -> Self {
        let home_margin = home_score as i32 - away_score as i32;
        let is_push = (f64::from(home_margin) + spread).abs() <= PUSH_TOLERANCE;
        let covers_line = if spread < 0.0 {
            f64::from(home_margin) > spread.abs()
        } else {
            f64::from(home_margin) > -spread
        };

        Self {
            home_score,
            away_score,
            home_margin,
            total_points: home_score + away_score,
            home_covers: !is_push && covers_line,
            is_push,
        }
    }

    /// True when the home team won outright, regardless of the spread.
    #[must_use]
    pub const fn home_wins(&self) -> bool {
        self.home_margin > 0
    }
}

//! Betting edge and expected value analysis.
//!
//! Converts simulated outcome frequencies and sportsbook decimal odds
//! into the numbers a bettor actually acts on: win/push/loss
//! probabilities, expected value per unit staked, and a threshold-based
//! verdict. The simulated probability plays the role of the "true"
//! probability and is compared against what the posted odds imply.

use courtsim_core::{BetCall, BettingDecision, SimulationSummary};

use crate::error::{Result, SimulationError};

/// Minimum edge percentage required before a bet is recommended.
///
/// Anything below this stays a no-bet: simulation error and line
/// movement eat thin edges.
pub const EDGE_THRESHOLD: f64 = 2.0;

/// Derives the betting decision for a home spread ticket.
///
/// Expected value is computed per unit staked:
/// `win_prob * (odds - 1) - loss_prob`. A push refunds the stake, so it
/// contributes to neither side, and the break-even rate is taken
/// relative to non-push outcomes only.
///
/// # Errors
/// Returns [`SimulationError::InvalidOdds`] when the decimal odds are at
/// or below 1.0, where no profitable payout exists.
pub fn calculate_edge(summary: &SimulationSummary, decimal_odds: f64) -> Result<BettingDecision> {
    if decimal_odds <= 1.0 {
        return Err(SimulationError::invalid_odds(decimal_odds));
    }

    let win_probability = summary.home_covers_percentage / 100.0;
    let push_probability = summary.push_percentage / 100.0;
    let loss_probability = (1.0 - win_probability - push_probability).max(0.0);

    let profit_if_win = decimal_odds - 1.0;
    let expected_value = win_probability * profit_if_win - loss_probability;
    let edge_percentage = expected_value * 100.0;

    let implied_probability = 1.0 / decimal_odds;
    let breakeven_probability = (1.0 - push_probability) / decimal_odds;
    let probability_difference = win_probability - breakeven_probability;

    let call = if edge_percentage > EDGE_THRESHOLD {
        BetCall::PositiveEv
    } else {
        BetCall::NoBet
    };

    Ok(BettingDecision {
        win_probability,
        push_probability,
        loss_probability,
        implied_probability,
        breakeven_probability,
        probability_difference,
        expected_value,
        edge_percentage,
        call,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Summary with the given cover and push percentages; the remaining
    /// fields do not feed the edge math.
    fn summary_with(covers_pct: f64, push_pct: f64) -> SimulationSummary {
        let games = 100_000u64;
        SimulationSummary {
            games_simulated: games,
            home_covers_count: (covers_pct / 100.0 * games as f64) as u64,
            home_covers_percentage: covers_pct,
            push_count: (push_pct / 100.0 * games as f64) as u64,
            push_percentage: push_pct,
            home_wins_count: games / 2,
            home_win_percentage: 50.0,
            average_home_score: 110.0,
            average_away_score: 107.0,
            average_margin: 3.0,
            margin_std_dev: 12.0,
            confidence_interval_95: (2.9, 3.1),
        }
    }

    // ============================================================
    // Expected Value Tests
    // ============================================================

    #[test]
    fn positive_edge_scenario_matches_hand_calculation() {
        // 55% win rate at 1.91: EV = 0.55 * 0.91 - 0.45 = 0.0505.
        let decision = calculate_edge(&summary_with(55.0, 0.0), 1.91).unwrap();

        assert!((decision.expected_value - 0.0505).abs() < 1e-9);
        assert!((decision.edge_percentage - 5.05).abs() < 1e-9);
        assert_eq!(decision.call, BetCall::PositiveEv);
        assert!(decision.call.is_bet());
    }

    #[test]
    fn coin_flip_at_standard_juice_is_a_no_bet() {
        // 50% at 1.91 loses the vig: EV = 0.5 * 0.91 - 0.5 = -0.045.
        let decision = calculate_edge(&summary_with(50.0, 0.0), 1.91).unwrap();

        assert!(decision.expected_value < 0.0);
        assert_eq!(decision.call, BetCall::NoBet);
        assert!(!decision.call.is_bet());
    }

    #[test]
    fn thin_positive_edge_stays_below_the_threshold() {
        // 53.5% at 1.91: EV = 0.535 * 0.91 - 0.465 = 0.02185, edge 2.185%
        // clears the bar. 53% gives 1.23%, which does not.
        let over = calculate_edge(&summary_with(53.5, 0.0), 1.91).unwrap();
        assert_eq!(over.call, BetCall::PositiveEv);

        let under = calculate_edge(&summary_with(53.0, 0.0), 1.91).unwrap();
        assert!(under.edge_percentage > 0.0);
        assert_eq!(under.call, BetCall::NoBet);
    }

    // ============================================================
    // Probability Identity Tests
    // ============================================================

    #[test]
    fn probabilities_sum_to_one() {
        for (covers, push) in [(55.0, 0.0), (48.2, 2.4), (33.3, 0.1), (60.0, 5.0)] {
            let decision = calculate_edge(&summary_with(covers, push), 1.91).unwrap();
            let total =
                decision.win_probability + decision.push_probability + decision.loss_probability;
            assert!((total - 1.0).abs() < 1e-9, "sum was {total}");
        }
    }

    #[test]
    fn loss_probability_clamps_at_zero() {
        // Degenerate summary where covers and pushes overshoot 100%.
        let decision = calculate_edge(&summary_with(99.5, 1.0), 2.0).unwrap();
        assert!(decision.loss_probability.abs() < 1e-12);
    }

    #[test]
    fn implied_probability_comes_from_the_odds() {
        let decision = calculate_edge(&summary_with(50.0, 0.0), 2.50).unwrap();
        assert!((decision.implied_probability - 0.4).abs() < 1e-12);
    }

    #[test]
    fn breakeven_accounts_for_pushes() {
        // With no pushes, break-even equals the implied probability.
        let no_push = calculate_edge(&summary_with(52.0, 0.0), 1.91).unwrap();
        assert!((no_push.breakeven_probability - no_push.implied_probability).abs() < 1e-12);

        // Pushes refund the stake, so the required win rate drops.
        let with_push = calculate_edge(&summary_with(52.0, 4.0), 1.91).unwrap();
        assert!(with_push.breakeven_probability < with_push.implied_probability);
        assert!((with_push.breakeven_probability - 0.96 / 1.91).abs() < 1e-12);
    }

    #[test]
    fn probability_difference_is_win_minus_breakeven() {
        let decision = calculate_edge(&summary_with(55.0, 2.0), 1.91).unwrap();
        let expected = decision.win_probability - decision.breakeven_probability;
        assert!((decision.probability_difference - expected).abs() < 1e-12);
    }

    // ============================================================
    // Validation Tests
    // ============================================================

    #[test]
    fn even_odds_are_rejected() {
        let err = calculate_edge(&summary_with(55.0, 0.0), 1.0).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidOdds { .. }));
    }

    #[test]
    fn sub_unit_odds_are_rejected() {
        let err = calculate_edge(&summary_with(55.0, 0.0), 0.5).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidOdds { .. }));
    }

    #[test]
    fn odds_just_above_one_are_accepted() {
        let decision = calculate_edge(&summary_with(99.0, 0.0), 1.01).unwrap();
        // Near-certain win at terrible odds still loses to the 1% miss.
        assert!(decision.expected_value < 0.0);
    }
}

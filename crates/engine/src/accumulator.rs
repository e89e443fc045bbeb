//! Streaming aggregation of simulated game outcomes.
//!
//! Outcomes fold into running counts and a Welford mean/variance pair, so
//! a million-game run holds the same few words of state as a ten-game
//! run. Accumulators from independent workers combine with the standard
//! parallel-variance merge, which keeps the combined moments identical to
//! a serial pass over the same games.

use courtsim_core::{GameOutcome, SimulationSummary};
use serde::{Deserialize, Serialize};

/// Z-score bounding the central 95% of a normal distribution.
const Z_95: f64 = 1.96;

/// Running aggregates over a stream of [`GameOutcome`] values.
///
/// A push takes precedence over a cover: a game that lands on the line
/// counts once, as a push. Margin statistics update with Welford's
/// algorithm, avoiding the catastrophic cancellation a naive
/// sum-of-squares pass suffers at large game counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OutcomeAccumulator {
    count: u64,
    covers: u64,
    pushes: u64,
    home_wins: u64,
    home_score_sum: u64,
    away_score_sum: u64,
    margin_mean: f64,
    margin_m2: f64,
}

impl OutcomeAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one game outcome into the running aggregates.
    pub fn record(&mut self, outcome: &GameOutcome) {
        if outcome.is_push {
            self.pushes += 1;
        } else if outcome.home_covers {
            self.covers += 1;
        }
        if outcome.home_wins() {
            self.home_wins += 1;
        }
        self.home_score_sum += u64::from(outcome.home_score);
        self.away_score_sum += u64::from(outcome.away_score);

        self.count += 1;
        let margin = f64::from(outcome.home_margin);
        let delta = margin - self.margin_mean;
        self.margin_mean += delta / self.count as f64;
        let delta2 = margin - self.margin_mean;
        self.margin_m2 += delta * delta2;
    }

    /// Combines another accumulator into this one.
    ///
    /// Counts and score sums add directly; the margin moments combine
    /// with the pairwise merge of Chan et al., so the result matches a
    /// single accumulator that saw both streams in sequence.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let total = n_a + n_b;
        let delta = other.margin_mean - self.margin_mean;

        self.margin_mean += delta * n_b / total;
        self.margin_m2 += other.margin_m2 + delta * delta * n_a * n_b / total;

        self.count += other.count;
        self.covers += other.covers;
        self.pushes += other.pushes;
        self.home_wins += other.home_wins;
        self.home_score_sum += other.home_score_sum;
        self.away_score_sum += other.away_score_sum;
    }

    /// Number of games folded in so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean of the home margin.
    #[must_use]
    pub fn margin_mean(&self) -> f64 {
        self.margin_mean
    }

    /// Population variance of the home margin.
    #[must_use]
    pub fn margin_variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.margin_m2 / self.count as f64
        }
    }

    /// Standard deviation of the home margin.
    #[must_use]
    pub fn margin_std_dev(&self) -> f64 {
        self.margin_variance().sqrt()
    }

    /// Standard error of the mean margin.
    #[must_use]
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.margin_std_dev() / (self.count as f64).sqrt()
        }
    }

    /// Builds the final summary from the accumulated state.
    ///
    /// Percentages derive exactly from their counts. Zero margin variance
    /// collapses the confidence interval to a point rather than erroring.
    #[must_use]
    pub fn summarize(&self) -> SimulationSummary {
        if self.count == 0 {
            return SimulationSummary {
                games_simulated: 0,
                home_covers_count: 0,
                home_covers_percentage: 0.0,
                push_count: 0,
                push_percentage: 0.0,
                home_wins_count: 0,
                home_win_percentage: 0.0,
                average_home_score: 0.0,
                average_away_score: 0.0,
                average_margin: 0.0,
                margin_std_dev: 0.0,
                confidence_interval_95: (0.0, 0.0),
            };
        }

        let n = self.count as f64;
        let standard_error = self.standard_error();

        SimulationSummary {
            games_simulated: self.count,
            home_covers_count: self.covers,
            home_covers_percentage: self.covers as f64 / n * 100.0,
            push_count: self.pushes,
            push_percentage: self.pushes as f64 / n * 100.0,
            home_wins_count: self.home_wins,
            home_win_percentage: self.home_wins as f64 / n * 100.0,
            average_home_score: self.home_score_sum as f64 / n,
            average_away_score: self.away_score_sum as f64 / n,
            average_margin: self.margin_mean,
            margin_std_dev: self.margin_std_dev(),
            confidence_interval_95: (
                self.margin_mean - Z_95 * standard_error,
                self.margin_mean + Z_95 * standard_error,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic margin sequence with a realistic spread of values.
    fn test_margins(n: usize) -> Vec<i32> {
        (0..n).map(|i| ((i * 7919) % 41) as i32 - 20).collect()
    }

    fn outcome_with_margin(margin: i32) -> GameOutcome {
        let (home, away) = if margin >= 0 {
            (100 + margin as u32, 100)
        } else {
            (100, 100 + margin.unsigned_abs())
        };
        // Half-point line keeps pushes out of the way.
        GameOutcome::settle(home, away, 0.5)
    }

    fn accumulate(margins: &[i32]) -> OutcomeAccumulator {
        let mut acc = OutcomeAccumulator::new();
        for &m in margins {
            acc.record(&outcome_with_margin(m));
        }
        acc
    }

    // ============================================================
    // Welford Tests
    // ============================================================

    #[test]
    fn welford_matches_two_pass_computation() {
        let margins = test_margins(1000);
        let acc = accumulate(&margins);

        let n = margins.len() as f64;
        let naive_mean = margins.iter().map(|&m| f64::from(m)).sum::<f64>() / n;
        let naive_var = margins
            .iter()
            .map(|&m| (f64::from(m) - naive_mean).powi(2))
            .sum::<f64>()
            / n;

        let mean_err = (acc.margin_mean() - naive_mean).abs() / naive_mean.abs().max(1.0);
        let var_err = (acc.margin_variance() - naive_var).abs() / naive_var.abs().max(1.0);
        assert!(mean_err < 1e-6, "mean relative error was {mean_err}");
        assert!(var_err < 1e-6, "variance relative error was {var_err}");
    }

    #[test]
    fn single_value_stream_has_zero_variance() {
        let acc = accumulate(&[7; 50]);
        assert!((acc.margin_mean() - 7.0).abs() < 1e-12);
        assert!(acc.margin_variance().abs() < 1e-12);
        assert!(acc.standard_error().abs() < 1e-12);
    }

    #[test]
    fn empty_accumulator_reports_zero_statistics() {
        let acc = OutcomeAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert!(acc.margin_variance().abs() < 1e-12);
        assert!(acc.standard_error().abs() < 1e-12);

        let summary = acc.summarize();
        assert_eq!(summary.games_simulated, 0);
        assert!(summary.average_margin.abs() < 1e-12);
        assert!(summary.confidence_interval_95.0.abs() < 1e-12);
    }

    // ============================================================
    // Merge Tests
    // ============================================================

    #[test]
    fn merge_matches_serial_accumulation() {
        let margins = test_margins(1000);
        let serial = accumulate(&margins);

        let (left, right) = margins.split_at(333);
        let mut merged = accumulate(left);
        merged.merge(&accumulate(right));

        assert_eq!(merged.count(), serial.count());
        assert!((merged.margin_mean() - serial.margin_mean()).abs() < 1e-9);
        assert!((merged.margin_variance() - serial.margin_variance()).abs() < 1e-9);
    }

    #[test]
    fn merge_into_empty_copies_the_other_side() {
        let full = accumulate(&test_margins(100));
        let mut empty = OutcomeAccumulator::new();
        empty.merge(&full);

        assert_eq!(empty.count(), full.count());
        assert!((empty.margin_mean() - full.margin_mean()).abs() < 1e-12);
        assert!((empty.margin_variance() - full.margin_variance()).abs() < 1e-12);
    }

    #[test]
    fn merge_with_empty_is_a_no_op() {
        let mut full = accumulate(&test_margins(100));
        let before = full.summarize();
        full.merge(&OutcomeAccumulator::new());
        assert_eq!(full.summarize(), before);
    }

    #[test]
    fn merge_across_many_batches_stays_stable() {
        let margins = test_margins(1200);
        let serial = accumulate(&margins);

        let mut merged = OutcomeAccumulator::new();
        for chunk in margins.chunks(97) {
            merged.merge(&accumulate(chunk));
        }

        assert_eq!(merged.count(), serial.count());
        assert!((merged.margin_variance() - serial.margin_variance()).abs() < 1e-9);
    }

    // ============================================================
    // Classification Tests
    // ============================================================

    #[test]
    fn push_takes_precedence_over_cover() {
        let mut acc = OutcomeAccumulator::new();
        // Home -3, wins by exactly 3. Push, not a cover.
        acc.record(&GameOutcome::settle(103, 100, -3.0));

        let summary = acc.summarize();
        assert_eq!(summary.push_count, 1);
        assert_eq!(summary.home_covers_count, 0);
        assert_eq!(summary.home_wins_count, 1);
    }

    #[test]
    fn covers_and_pushes_never_exceed_game_count() {
        let mut acc = OutcomeAccumulator::new();
        for margin in -15i32..=15 {
            acc.record(&outcome_with_margin(margin));
            acc.record(&GameOutcome::settle(100 + margin.unsigned_abs(), 100, -3.0));
        }

        let summary = acc.summarize();
        assert!(summary.home_covers_count + summary.push_count <= summary.games_simulated);
        assert!(summary.home_covers_percentage + summary.push_percentage <= 100.0 + 1e-9);
    }

    // ============================================================
    // Summary Tests
    // ============================================================

    #[test]
    fn percentages_derive_exactly_from_counts() {
        let mut acc = OutcomeAccumulator::new();
        // 4 covers (margin 10 vs -3.5), 1 push (margin 3 vs -3), 3 losses.
        for _ in 0..4 {
            acc.record(&GameOutcome::settle(110, 100, -3.5));
        }
        acc.record(&GameOutcome::settle(103, 100, -3.0));
        for _ in 0..3 {
            acc.record(&GameOutcome::settle(100, 110, -3.5));
        }

        let summary = acc.summarize();
        assert_eq!(summary.games_simulated, 8);
        assert!((summary.home_covers_percentage - 50.0).abs() < 1e-12);
        assert!((summary.push_percentage - 12.5).abs() < 1e-12);
        assert!((summary.home_win_percentage - 62.5).abs() < 1e-12);
    }

    #[test]
    fn confidence_interval_centers_on_the_mean() {
        let acc = accumulate(&test_margins(500));
        let summary = acc.summarize();

        let (lower, upper) = summary.confidence_interval_95;
        let center = (lower + upper) / 2.0;
        let half_width = (upper - lower) / 2.0;

        assert!((center - summary.average_margin).abs() < 1e-9);
        assert!((half_width - Z_95 * acc.standard_error()).abs() < 1e-9);
    }

    #[test]
    fn average_scores_derive_from_sums() {
        let mut acc = OutcomeAccumulator::new();
        acc.record(&GameOutcome::settle(110, 100, 0.5));
        acc.record(&GameOutcome::settle(120, 90, 0.5));

        let summary = acc.summarize();
        assert!((summary.average_home_score - 115.0).abs() < 1e-12);
        assert!((summary.average_away_score - 95.0).abs() < 1e-12);
        assert!((summary.average_total() - 210.0).abs() < 1e-12);
    }
}

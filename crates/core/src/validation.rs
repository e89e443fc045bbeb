//! Statistical validation for simulated cover rates.
//!
//! A cover rate out of N simulated games is a binomial proportion, so the
//! usual proportion machinery applies: Wilson score intervals for
//! sampling uncertainty and a binomial test against the coin-flip null.

use serde::{Deserialize, Serialize};

/// Sampling uncertainty around a simulated cover rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverValidation {
    /// Proportion of simulated games the home side covered.
    pub cover_rate: f64,
    /// Wilson score confidence interval (lower bound)
    pub wilson_ci_lower: f64,
    /// Wilson score confidence interval (upper bound)
    pub wilson_ci_upper: f64,
    /// p-value from binomial test (H0: p = 0.5)
    pub p_value: f64,
    /// Number of simulated games
    pub sample_size: u64,
    /// Whether the cover rate differs from a coin flip at alpha = 0.05
    pub is_significant: bool,
}

impl CoverValidation {
    /// Builds a validation result from cover counts.
    ///
    /// # Arguments
    /// * `covers` - Number of simulated games the home side covered
    /// * `total` - Total number of simulated games
    #[must_use]
    pub fn from_counts(covers: u64, total: u64) -> Self {
        let cover_rate = if total == 0 {
            0.0
        } else {
            covers as f64 / total as f64
        };

        let (wilson_ci_lower, wilson_ci_upper) = wilson_ci(covers, total, 1.96);
        let p_value = binomial_test(covers, total, 0.5);

        Self {
            cover_rate,
            wilson_ci_lower,
            wilson_ci_upper,
            p_value,
            sample_size: total,
            is_significant: p_value < 0.05,
        }
    }

    /// Returns true if the interval's lower bound clears the coin flip.
    #[must_use]
    pub fn clears_coin_flip(&self) -> bool {
        self.wilson_ci_lower > 0.5
    }
}

/// Calculates the Wilson score confidence interval for a proportion.
///
/// The Wilson score interval is preferred over the normal approximation
/// because it has better coverage properties, especially for proportions
/// near 0 or 1, and for small sample sizes.
///
/// # Formula
/// ```text
/// CI = (p + z^2/(2n) +/- z * sqrt(p(1-p)/n + z^2/(4n^2))) / (1 + z^2/n)
/// ```
///
/// # Arguments
/// * `covers` - Number of successes
/// * `n` - Total number of trials
/// * `z` - Z-score for confidence level (1.96 for 95%)
///
/// # Returns
/// Tuple of (lower_bound, upper_bound)
///
/// # Examples
/// ```
/// use courtsim_core::validation::wilson_ci;
///
/// let (lower, upper) = wilson_ci(50, 100, 1.96);
/// assert!(lower > 0.39 && lower < 0.41);
/// assert!(upper > 0.59 && upper < 0.61);
/// ```
#[must_use]
pub fn wilson_ci(covers: u64, n: u64, z: f64) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }

    let n_f = n as f64;
    let p = covers as f64 / n_f;
    let z_sq = z * z;

    let denominator = 1.0 + z_sq / n_f;
    let center = p + z_sq / (2.0 * n_f);

    // Under the square root: p(1-p)/n + z^2/(4n^2)
    let variance_term = p * (1.0 - p) / n_f;
    let correction_term = z_sq / (4.0 * n_f * n_f);
    let spread = z * (variance_term + correction_term).sqrt();

    let lower = (center - spread) / denominator;
    let upper = (center + spread) / denominator;

    // Clamp to [0, 1]
    (lower.max(0.0), upper.min(1.0))
}

/// Performs a two-tailed binomial test.
///
/// Tests the null hypothesis that the true probability equals `p0`,
/// using the normal approximation with continuity correction.
///
/// # Arguments
/// * `successes` - Number of observed successes
/// * `n` - Total number of trials
/// * `p0` - Hypothesized probability under null hypothesis
///
/// # Returns
/// Two-tailed p-value
///
/// # Examples
/// ```
/// use courtsim_core::validation::binomial_test;
///
/// // 55 out of 100 is not significantly different from 50%
/// let p = binomial_test(55, 100, 0.5);
/// assert!(p > 0.05);
///
/// // 65 out of 100 is significantly different from 50%
/// let p = binomial_test(65, 100, 0.5);
/// assert!(p < 0.05);
/// ```
#[must_use]
pub fn binomial_test(successes: u64, n: u64, p0: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }

    let n_f = n as f64;
    let k = successes as f64;

    // Expected value and standard deviation under H0
    let expected = n_f * p0;
    let std_dev = (n_f * p0 * (1.0 - p0)).sqrt();

    if std_dev < f64::EPSILON {
        // Edge case: p0 = 0 or p0 = 1
        if (p0 < f64::EPSILON && successes == 0) || (p0 > 1.0 - f64::EPSILON && successes == n) {
            return 1.0;
        }
        return 0.0;
    }

    // Normal approximation with continuity correction
    let z = (k - expected).abs() - 0.5;
    if z < 0.0 {
        return 1.0;
    }
    let z_score = z / std_dev;

    // Two-tailed p-value using standard normal CDF approximation
    2.0 * (1.0 - standard_normal_cdf(z_score))
}

/// Approximation of the standard normal CDF using the Abramowitz and Stegun formula.
/// Accurate to about 10^-5.
fn standard_normal_cdf(x: f64) -> f64 {
    if x < 0.0 {
        return 1.0 - standard_normal_cdf(-x);
    }

    // Constants for Abramowitz and Stegun approximation (formula 26.2.17)
    let b1 = 0.319_381_530;
    let b2 = -0.356_563_782;
    let b3 = 1.781_477_937;
    let b4 = -1.821_255_978;
    let b5 = 1.330_274_429;
    let p = 0.231_641_9;

    let t = 1.0 / (1.0 + p * x);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let pdf = (-x * x / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt();
    1.0 - pdf * (b1 * t + b2 * t2 + b3 * t3 + b4 * t4 + b5 * t5)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================
    // wilson_ci Tests
    // ============================================

    #[test]
    fn wilson_ci_50_percent_approximately_40_60() {
        let (lower, upper) = wilson_ci(50, 100, 1.96);
        // Expected: approximately (0.40, 0.60) for 95% CI
        assert!(lower > 0.39 && lower < 0.42, "lower was {lower}");
        assert!(upper > 0.58 && upper < 0.61, "upper was {upper}");
    }

    #[test]
    fn wilson_ci_70_percent() {
        let (lower, upper) = wilson_ci(70, 100, 1.96);
        // 70% cover rate should have CI above 0.5
        assert!(lower > 0.59, "lower was {lower}");
        assert!(upper < 0.80, "upper was {upper}");
    }

    #[test]
    fn wilson_ci_zero_covers() {
        let (lower, upper) = wilson_ci(0, 10, 1.96);
        assert!(lower >= 0.0, "lower was {lower}");
        assert!(lower < 0.01, "lower was {lower}");
        assert!(upper > 0.0, "upper was {upper}");
        assert!(upper < 0.35, "upper was {upper}");
    }

    #[test]
    fn wilson_ci_all_covers() {
        let (lower, upper) = wilson_ci(10, 10, 1.96);
        assert!(lower > 0.65, "lower was {lower}");
        assert!((upper - 1.0).abs() < 0.01, "upper was {upper}");
    }

    #[test]
    fn wilson_ci_zero_samples() {
        let (lower, upper) = wilson_ci(0, 0, 1.96);
        assert!((lower - 0.0).abs() < f64::EPSILON);
        assert!((upper - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wilson_ci_interval_brackets_point_estimate() {
        let (lower, upper) = wilson_ci(5_500, 10_000, 1.96);
        assert!(lower < 0.55 && 0.55 < upper);
        // n = 10k keeps the interval tight around the estimate.
        assert!(upper - lower < 0.02, "width was {}", upper - lower);
    }

    #[test]
    fn wilson_ci_large_simulation_count() {
        let (lower, upper) = wilson_ci(55_000, 100_000, 1.96);
        let width = upper - lower;
        assert!(width < 0.007, "width was {width}");
        assert!(lower > 0.546, "lower was {lower}");
        assert!(upper < 0.554, "upper was {upper}");
    }

    // ============================================
    // binomial_test Tests
    // ============================================

    #[test]
    fn binomial_test_55_of_100_not_significant() {
        let p = binomial_test(55, 100, 0.5);
        assert!(p > 0.05, "p-value was {p}");
    }

    #[test]
    fn binomial_test_65_of_100_significant() {
        let p = binomial_test(65, 100, 0.5);
        assert!(p < 0.05, "p-value was {p}");
    }

    #[test]
    fn binomial_test_50_of_100_not_significant() {
        let p = binomial_test(50, 100, 0.5);
        assert!(p > 0.9, "p-value was {p}");
    }

    #[test]
    fn binomial_test_zero_samples() {
        let p = binomial_test(0, 0, 0.5);
        assert!((p - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn binomial_test_all_covers_small_n() {
        let p = binomial_test(10, 10, 0.5);
        assert!(p < 0.01, "p-value was {p}");
    }

    #[test]
    fn binomial_test_custom_p0() {
        // 55% is close to a 60% null, not significant
        let p = binomial_test(55, 100, 0.6);
        assert!(p > 0.05, "p-value was {p}");
    }

    // ============================================
    // CoverValidation Tests
    // ============================================

    #[test]
    fn cover_validation_from_counts_calculates_correctly() {
        let validation = CoverValidation::from_counts(6_500, 10_000);

        assert!((validation.cover_rate - 0.65).abs() < 0.001);
        assert!(validation.wilson_ci_lower > 0.5);
        assert!(validation.p_value < 0.05);
        assert!(validation.is_significant);
        assert_eq!(validation.sample_size, 10_000);
    }

    #[test]
    fn cover_validation_near_coin_flip_not_significant() {
        let validation = CoverValidation::from_counts(52, 100);

        assert!(!validation.is_significant);
        assert!(validation.p_value > 0.05);
    }

    #[test]
    fn cover_validation_clears_coin_flip() {
        let strong = CoverValidation::from_counts(70, 100);
        assert!(strong.clears_coin_flip());

        let weak = CoverValidation::from_counts(45, 100);
        assert!(!weak.clears_coin_flip());
    }

    #[test]
    fn cover_validation_zero_total() {
        let validation = CoverValidation::from_counts(0, 0);
        assert!((validation.cover_rate - 0.0).abs() < f64::EPSILON);
        assert!(!validation.is_significant);
    }

    #[test]
    fn cover_validation_compares_by_value() {
        let validation = CoverValidation::from_counts(6_500, 10_000);
        assert_eq!(validation, validation.clone());
        assert_ne!(validation, CoverValidation::from_counts(6_400, 10_000));
    }

    // ============================================
    // standard_normal_cdf Tests
    // ============================================

    #[test]
    fn normal_cdf_at_zero_is_half() {
        let cdf = standard_normal_cdf(0.0);
        assert!((cdf - 0.5).abs() < 0.001, "cdf(0) was {cdf}");
    }

    #[test]
    fn normal_cdf_at_196_is_about_975() {
        let cdf = standard_normal_cdf(1.96);
        assert!((cdf - 0.975).abs() < 0.01, "cdf(1.96) was {cdf}");
    }

    #[test]
    fn normal_cdf_symmetry() {
        let cdf_pos = standard_normal_cdf(1.5);
        let cdf_neg = standard_normal_cdf(-1.5);
        assert!((cdf_pos + cdf_neg - 1.0).abs() < 0.001);
    }
}

//! Single-game outcome sampler.
//!
//! Draws one randomized game from a pair of team profiles using layered
//! sampling: per-team pace and ratings first, then a four-factors
//! efficiency multiplier, then unstructured score noise. The layers
//! separate macro variance (how strong each team shows up) from
//! game-level randomness (everything the box score cannot predict).
//!
//! # Example
//! ```ignore
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let home = TeamProfile::league_average(100.0, 115.0, 108.0);
//! let away = TeamProfile::league_average(98.0, 110.0, 112.0);
//! let outcome = sample_game(&home, &away, 110.0, -3.5, 2.0, &mut rng);
//! ```

use courtsim_core::league;
use courtsim_core::{GameOutcome, StatSpread, TeamProfile, MIN_TEAM_SCORE};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Sampled pace never drops below this floor.
const PACE_FLOOR: f64 = 85.0;
/// Sampled offensive rating never drops below this floor.
const ORTG_FLOOR: f64 = 90.0;
/// Sampled defensive rating never drops below this floor.
const DRTG_FLOOR: f64 = 95.0;

/// Standard deviation of the shared game-flow pace jitter.
const PACE_JITTER_STD: f64 = 2.0;
/// Combined game pace is clamped to this range.
const GAME_PACE_BOUNDS: (f64, f64) = (85.0, 110.0);

/// Standard deviation of the final per-side score noise.
const SCORE_NOISE_STD: f64 = 8.0;

/// Realistic per-game bounds for each sampled rate stat.
const EFG_PCT_BOUNDS: (f64, f64) = (0.45, 0.65);
const FTA_RATE_BOUNDS: (f64, f64) = (0.15, 0.35);
const TOV_PCT_BOUNDS: (f64, f64) = (0.08, 0.22);
const OREB_PCT_BOUNDS: (f64, f64) = (0.18, 0.36);
const PTS_OFF_TOV_BOUNDS: (f64, f64) = (8.0, 26.0);
const PTS_2ND_CHANCE_BOUNDS: (f64, f64) = (6.0, 22.0);

/// Simulates one game between two teams and settles it against the spread.
///
/// The draw order is fixed: paces, offensive ratings, defensive ratings,
/// pace jitter, home then away efficiency multipliers, home then away
/// score noise. Callers that seed the generator rely on this order for
/// reproducible sequences.
///
/// # Arguments
/// * `home` - Home team profile
/// * `away` - Away team profile
/// * `league_avg_ortg` - League-wide offensive rating used to normalize defense
/// * `spread` - Posted line, home perspective (negative = home favored)
/// * `home_court_advantage` - Points added to the home side before noise
/// * `rng` - Random number generator owned by the caller
#[must_use]
pub fn sample_game(
    home: &TeamProfile,
    away: &TeamProfile,
    league_avg_ortg: f64,
    spread: f64,
    home_court_advantage: f64,
    rng: &mut ChaCha8Rng,
) -> GameOutcome {
    let home_pace = draw(rng, home.pace).max(PACE_FLOOR);
    let away_pace = draw(rng, away.pace).max(PACE_FLOOR);

    let home_ortg = draw(rng, home.ortg).max(ORTG_FLOOR);
    let away_ortg = draw(rng, away.ortg).max(ORTG_FLOOR);

    let home_drtg = draw(rng, home.drtg).max(DRTG_FLOOR);
    let away_drtg = draw(rng, away.drtg).max(DRTG_FLOOR);

    // Game flow affects pace beyond either team's own tendency.
    let mut game_pace = (home_pace + away_pace) / 2.0;
    game_pace += PACE_JITTER_STD * standard_normal(rng);
    let game_pace = game_pace.clamp(GAME_PACE_BOUNDS.0, GAME_PACE_BOUNDS.1);

    let home_multiplier = efficiency_multiplier(rng, home, away);
    let away_multiplier = efficiency_multiplier(rng, away, home);

    // Offense meets opponent defense, normalized by the league average.
    let home_adj_ppp = (home_ortg / 100.0) * (away_drtg / league_avg_ortg) * home_multiplier;
    let away_adj_ppp = (away_ortg / 100.0) * (home_drtg / league_avg_ortg) * away_multiplier;

    let home_expected = game_pace * home_adj_ppp + home_court_advantage;
    let away_expected = game_pace * away_adj_ppp;

    // Final unstructured noise: foul trouble, hot streaks, whistle luck.
    let home_score = clamp_score(home_expected + SCORE_NOISE_STD * standard_normal(rng));
    let away_score = clamp_score(away_expected + SCORE_NOISE_STD * standard_normal(rng));

    GameOutcome::settle(home_score, away_score, spread)
}

/// Draws one value from a stat's normal distribution.
fn draw(rng: &mut ChaCha8Rng, stat: StatSpread) -> f64 {
    stat.mean + stat.std_dev * standard_normal(rng)
}

/// Draws one value and clamps it to a realistic per-game range.
fn sample_stat(rng: &mut ChaCha8Rng, stat: StatSpread, bounds: (f64, f64)) -> f64 {
    draw(rng, stat).clamp(bounds.0, bounds.1)
}

/// Generates a standard normal random variable using Box-Muller transform.
fn standard_normal(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-10);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Rounds a raw score and applies the minimum realistic final score.
fn clamp_score(raw: f64) -> u32 {
    raw.round().max(f64::from(MIN_TEAM_SCORE)) as u32
}

/// Normalized deviation from the league average, oriented so that a
/// positive value always helps the offense.
fn normalized_diff(value: f64, league_avg: f64, higher_is_better: bool) -> f64 {
    if higher_is_better {
        (value - league_avg) / league_avg
    } else {
        (league_avg - value) / league_avg
    }
}

/// Weighted contribution of a single factor to the efficiency multiplier.
///
/// The offense's deviation is netted against the mirrored deviation of
/// what the defense allows, then halved so neither side dominates.
fn factor_component(
    off_value: f64,
    def_value: f64,
    league_avg: f64,
    weight: f64,
    higher_is_better: bool,
) -> f64 {
    let off_dev = normalized_diff(off_value, league_avg, higher_is_better);
    let def_dev = normalized_diff(def_value, league_avg, !higher_is_better);
    weight * (off_dev - def_dev) / 2.0
}

/// Samples both sides of the four-factors matchup and folds them into a
/// bounded multiplicative efficiency adjustment for the offense.
fn efficiency_multiplier(
    rng: &mut ChaCha8Rng,
    offense: &TeamProfile,
    defense: &TeamProfile,
) -> f64 {
    let off_efg = sample_stat(rng, offense.efg_pct, EFG_PCT_BOUNDS);
    let off_fta = sample_stat(rng, offense.fta_rate, FTA_RATE_BOUNDS);
    let off_tov = sample_stat(rng, offense.tov_pct, TOV_PCT_BOUNDS);
    let off_oreb = sample_stat(rng, offense.oreb_pct, OREB_PCT_BOUNDS);
    let off_pts_off_tov = sample_stat(rng, offense.pts_off_tov, PTS_OFF_TOV_BOUNDS);
    let off_pts_2nd = sample_stat(rng, offense.pts_2nd_chance, PTS_2ND_CHANCE_BOUNDS);

    let def_efg = sample_stat(rng, defense.opp_efg_pct, EFG_PCT_BOUNDS);
    let def_fta = sample_stat(rng, defense.opp_fta_rate, FTA_RATE_BOUNDS);
    let def_tov = sample_stat(rng, defense.opp_tov_pct, TOV_PCT_BOUNDS);
    let def_oreb = sample_stat(rng, defense.opp_oreb_pct, OREB_PCT_BOUNDS);
    let def_pts_off_tov = sample_stat(rng, defense.opp_pts_off_tov, PTS_OFF_TOV_BOUNDS);
    let def_pts_2nd = sample_stat(rng, defense.opp_pts_2nd_chance, PTS_2ND_CHANCE_BOUNDS);

    let mut multiplier = 1.0;

    multiplier += factor_component(
        off_efg,
        def_efg,
        league::LEAGUE_AVG_EFG_PCT,
        league::WEIGHT_EFG_PCT,
        true,
    );
    multiplier += factor_component(
        off_fta,
        def_fta,
        league::LEAGUE_AVG_FTA_RATE,
        league::WEIGHT_FTA_RATE,
        true,
    );
    // Lower turnover rate is better for the offense, so the sign flips.
    multiplier += factor_component(
        off_tov,
        def_tov,
        league::LEAGUE_AVG_TOV_PCT,
        league::WEIGHT_TOV_PCT,
        false,
    );
    multiplier += factor_component(
        off_oreb,
        def_oreb,
        league::LEAGUE_AVG_OREB_PCT,
        league::WEIGHT_OREB_PCT,
        true,
    );
    multiplier += factor_component(
        off_pts_off_tov,
        def_pts_off_tov,
        league::LEAGUE_AVG_PTS_OFF_TOV,
        league::WEIGHT_PTS_OFF_TOV,
        true,
    );
    multiplier += factor_component(
        off_pts_2nd,
        def_pts_2nd,
        league::LEAGUE_AVG_PTS_2ND_CHANCE,
        league::WEIGHT_PTS_2ND_CHANCE,
        true,
    );

    multiplier.clamp(league::MULTIPLIER_FLOOR, league::MULTIPLIER_CEIL)
}

//! Recency-weighted blending of season and last-10 statistics.
//!
//! The blended value is `season * (1 - w) + last10 * w`, so a weight of
//! zero is pure season-long form and a weight of one is pure last-10
//! form. Miscellaneous stats blend NaN-safely: a missing or non-finite
//! split falls back to the other split, and when both are missing the
//! league average stands in.

use courtsim_core::league;
use courtsim_core::{FourFactors, MiscScoring};
use serde::{Deserialize, Serialize};

use crate::bundle::{CoreStats, MiscStats, TeamDataBundle};
use crate::error::{DataError, Result};

/// Blended statistical profile for one team, ready for adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedStats {
    pub core: CoreStats,
    pub four_factors: FourFactors,
    pub misc: MiscScoring,
}

fn weighted_average(season: f64, last10: f64, weight: f64) -> f64 {
    season * (1.0 - weight) + last10 * weight
}

/// Drops missing and non-finite provider values.
fn clean_misc_value(raw: Option<f64>) -> Option<f64> {
    raw.filter(|v| v.is_finite())
}

/// Blends one misc stat with the fallback hierarchy: both present →
/// weighted average; one present → that split; neither → league average.
fn blend_misc_stat(season: Option<f64>, last10: Option<f64>, weight: f64, league_avg: f64) -> f64 {
    match (clean_misc_value(season), clean_misc_value(last10)) {
        (Some(s), Some(l)) => weighted_average(s, l, weight),
        (Some(s), None) => s,
        (None, Some(l)) => l,
        (None, None) => league_avg,
    }
}

fn blend_misc(season: &MiscStats, last10: &MiscStats, weight: f64) -> MiscScoring {
    MiscScoring {
        pts_off_tov: blend_misc_stat(
            season.pts_off_tov,
            last10.pts_off_tov,
            weight,
            league::LEAGUE_AVG_PTS_OFF_TOV,
        ),
        pts_2nd_chance: blend_misc_stat(
            season.pts_2nd_chance,
            last10.pts_2nd_chance,
            weight,
            league::LEAGUE_AVG_PTS_2ND_CHANCE,
        ),
        opp_pts_off_tov: blend_misc_stat(
            season.opp_pts_off_tov,
            last10.opp_pts_off_tov,
            weight,
            league::LEAGUE_AVG_PTS_OFF_TOV,
        ),
        opp_pts_2nd_chance: blend_misc_stat(
            season.opp_pts_2nd_chance,
            last10.opp_pts_2nd_chance,
            weight,
            league::LEAGUE_AVG_PTS_2ND_CHANCE,
        ),
    }
}

/// Blends season and last-10 data into a weighted profile.
///
/// # Errors
/// Returns [`DataError::InvalidRecencyWeight`] when the weight falls
/// outside [0, 1]. Validation runs before any blending work.
pub fn compute_weighted_stats(bundle: &TeamDataBundle, recency_weight: f64) -> Result<WeightedStats> {
    if !(0.0..=1.0).contains(&recency_weight) {
        return Err(DataError::invalid_recency_weight(recency_weight));
    }

    let core = CoreStats {
        pace: weighted_average(bundle.season.pace, bundle.last_10.pace, recency_weight),
        ortg: weighted_average(bundle.season.ortg, bundle.last_10.ortg, recency_weight),
        drtg: weighted_average(bundle.season.drtg, bundle.last_10.drtg, recency_weight),
    };

    let ffs = &bundle.four_factors_season;
    let ffl = &bundle.four_factors_last10;
    let four_factors = FourFactors {
        efg_pct: weighted_average(ffs.efg_pct, ffl.efg_pct, recency_weight),
        fta_rate: weighted_average(ffs.fta_rate, ffl.fta_rate, recency_weight),
        tov_pct: weighted_average(ffs.tov_pct, ffl.tov_pct, recency_weight),
        oreb_pct: weighted_average(ffs.oreb_pct, ffl.oreb_pct, recency_weight),
        opp_efg_pct: weighted_average(ffs.opp_efg_pct, ffl.opp_efg_pct, recency_weight),
        opp_fta_rate: weighted_average(ffs.opp_fta_rate, ffl.opp_fta_rate, recency_weight),
        opp_tov_pct: weighted_average(ffs.opp_tov_pct, ffl.opp_tov_pct, recency_weight),
        opp_oreb_pct: weighted_average(ffs.opp_oreb_pct, ffl.opp_oreb_pct, recency_weight),
    };

    let misc = blend_misc(&bundle.misc_season, &bundle.misc_last10, recency_weight);

    Ok(WeightedStats {
        core,
        four_factors,
        misc,
    })
}

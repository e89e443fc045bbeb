//! Team statistical profiles consumed by the game sampler.
//!
//! A profile pairs each statistic's central estimate with the standard
//! deviation used to model game-to-game variance. The deviations are
//! fixed calibration constants derived from historical analysis of how
//! much teams fluctuate from their averages in individual games, not
//! per-request estimates.

use serde::{Deserialize, Serialize};

use crate::league;

/// Pace varies roughly ±4 possessions per game.
pub const PACE_STD: f64 = 4.0;
/// Offensive rating varies roughly ±6 points per 100 possessions.
pub const ORTG_STD: f64 = 6.0;
/// Defensive rating varies roughly ±5 points per 100 possessions.
pub const DRTG_STD: f64 = 5.0;
/// eFG% varies roughly ±4 percentage points per game.
pub const EFG_PCT_STD: f64 = 0.04;
/// FTA rate varies roughly ±3 percentage points per game.
pub const FTA_RATE_STD: f64 = 0.03;
/// Turnover% varies roughly ±2 percentage points per game.
pub const TOV_PCT_STD: f64 = 0.02;
/// OREB% varies roughly ±3 percentage points per game.
pub const OREB_PCT_STD: f64 = 0.03;
/// Points off turnovers vary roughly ±3 points per game.
pub const PTS_OFF_TOV_STD: f64 = 3.0;
/// Second chance points vary roughly ±2.5 points per game.
pub const PTS_2ND_CHANCE_STD: f64 = 2.5;

/// A central estimate paired with the standard deviation the sampler
/// draws with. Means must be finite; deviations must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSpread {
    pub mean: f64,
    pub std_dev: f64,
}

impl StatSpread {
    #[must_use]
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// Core pace and rating inputs for a team, already blended and adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreRatings {
    /// Possessions per 48 minutes.
    pub pace: f64,
    /// Points scored per 100 possessions.
    pub ortg: f64,
    /// Points allowed per 100 possessions.
    pub drtg: f64,
}

/// Four-factor rates for a team's offense and the mirrored rates its
/// defense allows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourFactors {
    pub efg_pct: f64,
    pub fta_rate: f64,
    pub tov_pct: f64,
    pub oreb_pct: f64,
    pub opp_efg_pct: f64,
    pub opp_fta_rate: f64,
    pub opp_tov_pct: f64,
    pub opp_oreb_pct: f64,
}

impl FourFactors {
    /// Four factors pinned to the league averages, used when a caller has
    /// no team-specific data.
    #[must_use]
    pub const fn league_average() -> Self {
        Self {
            efg_pct: league::LEAGUE_AVG_EFG_PCT,
            fta_rate: league::LEAGUE_AVG_FTA_RATE,
            tov_pct: league::LEAGUE_AVG_TOV_PCT,
            oreb_pct: league::LEAGUE_AVG_OREB_PCT,
            opp_efg_pct: league::LEAGUE_AVG_EFG_PCT,
            opp_fta_rate: league::LEAGUE_AVG_FTA_RATE,
            opp_tov_pct: league::LEAGUE_AVG_TOV_PCT,
            opp_oreb_pct: league::LEAGUE_AVG_OREB_PCT,
        }
    }
}

/// Extra-possession scoring stats and their opponent-allowed mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiscScoring {
    pub pts_off_tov: f64,
    pub pts_2nd_chance: f64,
    pub opp_pts_off_tov: f64,
    pub opp_pts_2nd_chance: f64,
}

impl MiscScoring {
    /// Misc scoring pinned to the league averages.
    #[must_use]
    pub const fn league_average() -> Self {
        Self {
            pts_off_tov: league::LEAGUE_AVG_PTS_OFF_TOV,
            pts_2nd_chance: league::LEAGUE_AVG_PTS_2ND_CHANCE,
            opp_pts_off_tov: league::LEAGUE_AVG_PTS_OFF_TOV,
            opp_pts_2nd_chance: league::LEAGUE_AVG_PTS_2ND_CHANCE,
        }
    }
}

/// Immutable per-matchup statistical profile for one team.
///
/// Each field carries the mean the sampler centers on and the calibration
/// standard deviation it draws with. Profiles are constructed once per
/// matchup through [`TeamProfile::from_parts`] and consumed read-only by
/// the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub pace: StatSpread,
    pub ortg: StatSpread,
    pub drtg: StatSpread,

    pub efg_pct: StatSpread,
    pub fta_rate: StatSpread,
    pub tov_pct: StatSpread,
    pub oreb_pct: StatSpread,

    pub opp_efg_pct: StatSpread,
    pub opp_fta_rate: StatSpread,
    pub opp_tov_pct: StatSpread,
    pub opp_oreb_pct: StatSpread,

    pub pts_off_tov: StatSpread,
    pub pts_2nd_chance: StatSpread,
    pub opp_pts_off_tov: StatSpread,
    pub opp_pts_2nd_chance: StatSpread,
}

impl TeamProfile {
    /// Builds a profile from blended ratings, attaching the fixed
    /// calibration deviations to every stat.
    ///
    /// Omitted four-factor or misc groups fall back to the league
    /// averages, so a caller with only pace/ortg/drtg still gets a
    /// complete, simulatable profile.
    #[must_use]
    pub fn from_parts(
        core: CoreRatings,
        four_factors: Option<FourFactors>,
        misc: Option<MiscScoring>,
    ) -> Self {
        let ff = four_factors.unwrap_or_else(FourFactors::league_average);
        let misc = misc.unwrap_or_else(MiscScoring::league_average);

        Self {
            pace: StatSpread::new(core.pace, PACE_STD),
            ortg: StatSpread::new(core.ortg, ORTG_STD),
            drtg: StatSpread::new(core.drtg, DRTG_STD),

            efg_pct: StatSpread::new(ff.efg_pct, EFG_PCT_STD),
            fta_rate: StatSpread::new(ff.fta_rate, FTA_RATE_STD),
            tov_pct: StatSpread::new(ff.tov_pct, TOV_PCT_STD),
            oreb_pct: StatSpread::new(ff.oreb_pct, OREB_PCT_STD),

            opp_efg_pct: StatSpread::new(ff.opp_efg_pct, EFG_PCT_STD),
            opp_fta_rate: StatSpread::new(ff.opp_fta_rate, FTA_RATE_STD),
            opp_tov_pct: StatSpread::new(ff.opp_tov_pct, TOV_PCT_STD),
            opp_oreb_pct: StatSpread::new(ff.opp_oreb_pct, OREB_PCT_STD),

            pts_off_tov: StatSpread::new(misc.pts_off_tov, PTS_OFF_TOV_STD),
            pts_2nd_chance: StatSpread::new(misc.pts_2nd_chance, PTS_2ND_CHANCE_STD),
            opp_pts_off_tov: StatSpread::new(misc.opp_pts_off_tov, PTS_OFF_TOV_STD),
            opp_pts_2nd_chance: StatSpread::new(misc.opp_pts_2nd_chance, PTS_2ND_CHANCE_STD),
        }
    }

    /// Profile with every stat pinned to its league average. Useful as a
    /// neutral baseline in tests and symmetric-matchup checks.
    #[must_use]
    pub fn league_average(pace: f64, ortg: f64, drtg: f64) -> Self {
        Self::from_parts(CoreRatings { pace, ortg, drtg }, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // Factory Tests
    // ============================================================

    #[test]
    fn from_parts_attaches_calibration_deviations() {
        let profile = TeamProfile::from_parts(
            CoreRatings {
                pace: 100.0,
                ortg: 115.0,
                drtg: 108.0,
            },
            None,
            None,
        );

        assert!((profile.pace.mean - 100.0).abs() < f64::EPSILON);
        assert!((profile.pace.std_dev - 4.0).abs() < f64::EPSILON);
        assert!((profile.ortg.std_dev - 6.0).abs() < f64::EPSILON);
        assert!((profile.drtg.std_dev - 5.0).abs() < f64::EPSILON);
        assert!((profile.efg_pct.std_dev - 0.04).abs() < f64::EPSILON);
        assert!((profile.tov_pct.std_dev - 0.02).abs() < f64::EPSILON);
        assert!((profile.pts_off_tov.std_dev - 3.0).abs() < f64::EPSILON);
        assert!((profile.pts_2nd_chance.std_dev - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_four_factors_default_to_league_average() {
        let profile = TeamProfile::league_average(100.0, 110.0, 110.0);

        assert!((profile.efg_pct.mean - 0.540).abs() < f64::EPSILON);
        assert!((profile.fta_rate.mean - 0.250).abs() < f64::EPSILON);
        assert!((profile.tov_pct.mean - 0.140).abs() < f64::EPSILON);
        assert!((profile.oreb_pct.mean - 0.280).abs() < f64::EPSILON);
        assert!((profile.opp_efg_pct.mean - 0.540).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_misc_defaults_to_league_average() {
        let profile = TeamProfile::league_average(100.0, 110.0, 110.0);

        assert!((profile.pts_off_tov.mean - 15.0).abs() < f64::EPSILON);
        assert!((profile.pts_2nd_chance.mean - 12.0).abs() < f64::EPSILON);
        assert!((profile.opp_pts_off_tov.mean - 15.0).abs() < f64::EPSILON);
        assert!((profile.opp_pts_2nd_chance.mean - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn explicit_groups_override_defaults() {
        let ff = FourFactors {
            efg_pct: 0.56,
            fta_rate: 0.27,
            tov_pct: 0.12,
            oreb_pct: 0.30,
            opp_efg_pct: 0.52,
            opp_fta_rate: 0.24,
            opp_tov_pct: 0.15,
            opp_oreb_pct: 0.26,
        };
        let misc = MiscScoring {
            pts_off_tov: 17.5,
            pts_2nd_chance: 13.0,
            opp_pts_off_tov: 13.5,
            opp_pts_2nd_chance: 11.0,
        };
        let profile = TeamProfile::from_parts(
            CoreRatings {
                pace: 99.0,
                ortg: 117.0,
                drtg: 109.0,
            },
            Some(ff),
            Some(misc),
        );

        assert!((profile.efg_pct.mean - 0.56).abs() < f64::EPSILON);
        assert!((profile.opp_tov_pct.mean - 0.15).abs() < f64::EPSILON);
        assert!((profile.pts_off_tov.mean - 17.5).abs() < f64::EPSILON);
        assert!((profile.opp_pts_2nd_chance.mean - 11.0).abs() < f64::EPSILON);
    }

    // ============================================================
    // Serialization Tests
    // ============================================================

    #[test]
    fn profile_serialization_roundtrip() {
        let profile = TeamProfile::league_average(98.5, 112.0, 111.0);
        let json = serde_json::to_string(&profile).unwrap();
        let back: TeamProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}

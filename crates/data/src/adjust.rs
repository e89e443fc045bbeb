//! Contextual adjustments layered onto blended team statistics.
//!
//! Each adjuster mutates the working core ratings and misc scoring in
//! place and returns human-readable notes describing what it did (or why
//! it skipped), which the analysis report carries verbatim. The
//! constants are fixed calibration data.

use courtsim_core::MiscScoring;
use serde::{Deserialize, Serialize};

use crate::bundle::{CoreStats, HeadToHeadRecord, HustleProfile, RestProfile, VenueSplits};

/// Which side of the matchup a team plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Home,
    Away,
}

/// Notes from every adjuster, in application order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentLog {
    pub fatigue: Vec<String>,
    pub venue: Vec<String>,
    pub hustle: Vec<String>,
    pub head_to_head: Vec<String>,
}

/// Modifies statistics based on rest before the upcoming game.
///
/// Back-to-backs sap pace and offense and loosen the defense; extended
/// rest does the opposite. Unknown rest skips the adjustment entirely.
pub fn apply_fatigue(
    core: &mut CoreStats,
    misc: &mut MiscScoring,
    rest: &RestProfile,
) -> Vec<String> {
    let Some(rest_days) = rest.rest_days_until_next_game else {
        return vec!["Upcoming game date unavailable - skipping fatigue adjustment.".to_string()];
    };

    if rest_days <= 1 {
        core.pace *= 0.97;
        core.ortg *= 0.98;
        core.drtg *= 1.015;
        misc.pts_off_tov *= 0.97;
        misc.pts_2nd_chance *= 0.97;
        vec!["Back-to-back fatigue penalty applied (-3% pace, -2% ORtg, +1.5% DRtg).".to_string()]
    } else if rest_days == 2 {
        core.pace *= 0.99;
        core.ortg *= 0.99;
        vec!["Two days rest - slight normalization (-1% pace/ORtg).".to_string()]
    } else if rest_days >= 4 {
        core.pace *= 1.01;
        core.ortg *= 1.015;
        core.drtg *= 0.985;
        misc.pts_off_tov *= 1.03;
        misc.pts_2nd_chance *= 1.02;
        vec!["Extended rest boost applied (+1% pace, +1.5% ORtg, -1.5% DRtg).".to_string()]
    } else {
        vec!["Standard rest window - no fatigue adjustment required.".to_string()]
    }
}

/// Shifts ratings toward the team's venue-specific performance, at half
/// the raw delta against the season baseline.
pub fn apply_venue(
    core: &mut CoreStats,
    venue: &VenueSplits,
    season_baseline: &CoreStats,
    location: Location,
) -> Vec<String> {
    let performance = match location {
        Location::Home => venue.home_performance,
        Location::Away => venue.away_performance,
    };
    let Some(performance) = performance else {
        return vec!["Venue splits unavailable - no adjustment applied.".to_string()];
    };

    let mut notes = Vec::new();
    let mut shifted = false;

    if let Some(venue_ortg) = performance.offensive_rating {
        let raw_delta = venue_ortg - season_baseline.ortg;
        let weighted_delta = raw_delta * 0.5;
        core.ortg += weighted_delta;
        shifted = true;
        notes.push(format!(
            "Venue offensive tilt adds {weighted_delta:+.2} ORtg (50% of {raw_delta:+.2})."
        ));
    }

    if let Some(venue_drtg) = performance.defensive_rating {
        let raw_delta = venue_drtg - season_baseline.drtg;
        let weighted_delta = raw_delta * 0.5;
        core.drtg += weighted_delta;
        shifted = true;
        notes.push(format!(
            "Venue defensive tilt adds {weighted_delta:+.2} DRtg (50% of {raw_delta:+.2})."
        ));
    }

    if !shifted {
        notes.push("Venue ratings aligned with season averages - no shift applied.".to_string());
    }
    notes
}

/// Adjusts defensive and extra-chance stats based on effort signals.
///
/// The relative effort differential is clamped to ±20% and ignored below
/// 2%; the defensive shift caps at ±3% and the turnover shift at ±8%.
pub fn apply_hustle(
    core: &mut CoreStats,
    misc: &mut MiscScoring,
    hustle: Option<&HustleProfile>,
) -> Vec<String> {
    let Some(hustle) = hustle else {
        return vec!["No hustle data - skipping effort adjustment.".to_string()];
    };
    let Some(league_avg) = hustle.league_average_effort.filter(|avg| *avg != 0.0) else {
        return vec!["No league hustle baseline - skipping effort adjustment.".to_string()];
    };
    if league_avg.is_nan() || hustle.team_effort_score.is_nan() {
        return vec!["Invalid hustle metrics - skipping effort adjustment.".to_string()];
    }

    let relative = ((hustle.team_effort_score - league_avg) / league_avg).clamp(-0.2, 0.2);
    if relative.abs() < 0.02 {
        return vec!["Effort score near league average - no adjustment applied.".to_string()];
    }

    let defensive_shift = (relative * 0.5).clamp(-0.03, 0.03);
    if defensive_shift.abs() > 1e-6 {
        core.drtg *= 1.0 - defensive_shift;
    }

    let turnover_shift = (relative * 0.6).clamp(-0.08, 0.08);
    if turnover_shift.abs() > 1e-6 {
        misc.pts_off_tov *= 1.0 + turnover_shift;
        misc.pts_2nd_chance *= 1.0 + turnover_shift * 0.4;
        misc.opp_pts_off_tov *= 1.0 - turnover_shift * 0.6;
        misc.opp_pts_2nd_chance *= 1.0 - turnover_shift * 0.4;
    }

    vec![format!(
        "Hustle differential ({:+.1}%) applied to defense and extra-chance stats.",
        relative * 100.0
    )]
}

/// Nudges the offensive rating toward historical results against this
/// opponent. The shift is a tenth of the average margin, capped at ±1.5.
pub fn apply_head_to_head(core: &mut CoreStats, record: Option<&HeadToHeadRecord>) -> Vec<String> {
    let Some(record) = record else {
        return vec!["Head-to-head data unavailable.".to_string()];
    };
    if record.total_games == 0 {
        return vec!["No recent meetings to inform adjustments.".to_string()];
    }

    let margin_shift = (record.avg_margin * 0.1).clamp(-1.5, 1.5);
    if margin_shift.abs() < 0.05 {
        return vec!["Historical results balanced - no rating shift applied.".to_string()];
    }

    core.ortg += margin_shift;
    vec![format!(
        "Head-to-head margin ({:+.2}) nudges ORtg by {margin_shift:+.2}.",
        record.avg_margin
    )]
}

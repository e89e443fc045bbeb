//! Raw per-team data documents consumed by the profile pipeline.
//!
//! A [`TeamDataBundle`] mirrors what a stats provider hands back for one
//! team: season-long and last-10 splits of the core ratings, four
//! factors, and miscellaneous scoring, plus the contextual profiles
//! (rest, venue, hustle) the adjusters read. Misc stats arrive
//! optional because providers frequently omit them mid-season.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Core pace and rating averages for one split (season or last 10).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreStats {
    /// Possessions per 48 minutes.
    pub pace: f64,
    /// Points scored per 100 possessions.
    pub ortg: f64,
    /// Points allowed per 100 possessions.
    pub drtg: f64,
}

/// Four-factor rates for one split, offense and the defensive mirror.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourFactorStats {
    pub efg_pct: f64,
    pub fta_rate: f64,
    pub tov_pct: f64,
    pub oreb_pct: f64,
    pub opp_efg_pct: f64,
    pub opp_fta_rate: f64,
    pub opp_tov_pct: f64,
    pub opp_oreb_pct: f64,
}

/// Miscellaneous scoring stats for one split. Providers often report
/// these late in a season or not at all, so every field is optional and
/// blending falls back to league averages when both splits are missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MiscStats {
    #[serde(default)]
    pub pts_off_tov: Option<f64>,
    #[serde(default)]
    pub pts_2nd_chance: Option<f64>,
    #[serde(default)]
    pub opp_pts_off_tov: Option<f64>,
    #[serde(default)]
    pub opp_pts_2nd_chance: Option<f64>,
}

/// Rest and schedule context around the upcoming game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestProfile {
    /// Date of the team's most recent game, when known.
    #[serde(default)]
    pub last_game_date: Option<NaiveDate>,
    /// Days off before the team's last game.
    #[serde(default)]
    pub rest_days_before_last_game: Option<i64>,
    /// Days off before the upcoming game. Drives the fatigue adjusters;
    /// unknown rest skips them entirely.
    #[serde(default)]
    pub rest_days_until_next_game: Option<i64>,
    /// Qualitative fatigue flag for the last game ("normal",
    /// "back_to_back", ...).
    #[serde(default)]
    pub fatigue_flag: Option<String>,
}

/// Ratings a team posts at one venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VenuePerformance {
    #[serde(default)]
    pub offensive_rating: Option<f64>,
    #[serde(default)]
    pub defensive_rating: Option<f64>,
}

/// How much better the team plays at home than on the road. Carried for
/// reporting only; the venue adjuster works from the raw performances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueDifferentials {
    #[serde(default)]
    pub points_advantage: Option<f64>,
    #[serde(default)]
    pub win_pct_advantage: Option<f64>,
    #[serde(default)]
    pub ortg_advantage: Option<f64>,
}

/// Home/away performance splits for a team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueSplits {
    #[serde(default)]
    pub home_performance: Option<VenuePerformance>,
    #[serde(default)]
    pub away_performance: Option<VenuePerformance>,
    #[serde(default)]
    pub differentials: Option<VenueDifferentials>,
}

/// Effort signals derived from hustle tracking data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HustleProfile {
    /// Composite effort score for the team.
    pub team_effort_score: f64,
    /// League-wide effort baseline. Missing or zero skips the hustle
    /// adjuster.
    #[serde(default)]
    pub league_average_effort: Option<f64>,
    /// Where the team's effort ranks league-wide, in [0, 1].
    #[serde(default)]
    pub effort_percentile: Option<f64>,
}

/// One team's record against a specific opponent over recent seasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadRecord {
    pub total_games: u32,
    pub team_wins: u32,
    pub opponent_wins: u32,
    pub win_pct: f64,
    /// Average scoring margin from this team's perspective.
    pub avg_margin: f64,
}

/// Everything a stats provider supplies for one team ahead of a matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDataBundle {
    pub team_name: String,
    pub season: CoreStats,
    pub last_10: CoreStats,
    pub four_factors_season: FourFactorStats,
    pub four_factors_last10: FourFactorStats,
    #[serde(default)]
    pub misc_season: MiscStats,
    #[serde(default)]
    pub misc_last10: MiscStats,
    #[serde(default)]
    pub rest: RestProfile,
    #[serde(default)]
    pub venue: VenueSplits,
    #[serde(default)]
    pub hustle: Option<HustleProfile>,
}

/// League-wide context shared by both sides of a matchup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueContext {
    /// League-average offensive rating for the season, the normalization
    /// constant the sampler divides defensive ratings by.
    pub league_avg_ortg: f64,
    /// Head-to-head records keyed by team name, each from that team's
    /// perspective.
    #[serde(default)]
    pub head_to_head: HashMap<String, HeadToHeadRecord>,
}

/// A complete matchup document as stored on disk: both bundles plus the
/// league context, which is all the pipeline needs to build profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupDocument {
    pub home: TeamDataBundle,
    pub away: TeamDataBundle,
    pub league: LeagueContext,
    /// Scheduled date of the game, when known.
    #[serde(default)]
    pub game_date: Option<NaiveDate>,
}

//! Data pipeline for the courtsim NBA spread model.
//!
//! This crate provides:
//! - Raw per-team data documents and league context
//! - An injectable [`StatsFetcher`] seam (file-backed and in-memory)
//! - Recency-weighted blending of season and last-10 splits
//! - Contextual adjustments (fatigue, venue, hustle, head-to-head)
//! - The profile builder and end-to-end matchup analyzer

pub mod adjust;
pub mod blend;
pub mod builder;
pub mod bundle;
pub mod error;
pub mod fetcher;

pub use adjust::{AdjustmentLog, Location};
pub use blend::{compute_weighted_stats, WeightedStats};
pub use bundle::{
    CoreStats, FourFactorStats, HeadToHeadRecord, HustleProfile, LeagueContext, MatchupDocument,
    MiscStats, RestProfile, TeamDataBundle, VenuePerformance, VenueSplits,
};
pub use builder::{MatchupAnalyzer, MatchupReport, PreparedTeam, ProfileBuilder};
pub use error::{DataError, Result};
pub use fetcher::{FileStatsFetcher, StaticStatsFetcher, StatsFetcher};

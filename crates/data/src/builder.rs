//! Profile construction and end-to-end matchup analysis.
//!
//! [`ProfileBuilder`] turns one raw [`TeamDataBundle`] into a
//! simulatable [`TeamProfile`]: blend the splits, layer on the
//! contextual adjusters in order (fatigue, venue, hustle,
//! head-to-head), then hand the adjusted numbers to the core factory.
//! [`MatchupAnalyzer`] drives the full path for a matchup: fetch both
//! bundles, build both profiles, simulate, and price the edge.

use anyhow::Context;
use courtsim_core::{
    BettingDecision, CoreRatings, CoverValidation, MiscScoring, SimulationSummary, TeamProfile,
};
use courtsim_engine::{calculate_edge, SimulationConfig, Simulator, HIGH_PRECISION_SIMULATIONS};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adjust::{
    apply_fatigue, apply_head_to_head, apply_hustle, apply_venue, AdjustmentLog, Location,
};
use crate::blend::{compute_weighted_stats, WeightedStats};
use crate::bundle::{CoreStats, HeadToHeadRecord, TeamDataBundle};
use crate::error::{DataError, Result};
use crate::fetcher::StatsFetcher;

/// One team's data at every pipeline stage: raw bundle, blended stats,
/// context-adjusted stats, and the notes the adjusters left behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedTeam {
    pub bundle: TeamDataBundle,
    pub weighted: WeightedStats,
    pub adjusted_core: CoreStats,
    pub adjusted_misc: MiscScoring,
    pub notes: AdjustmentLog,
}

impl PreparedTeam {
    /// Builds the simulatable profile from the adjusted statistics.
    ///
    /// Core ratings and misc scoring carry the contextual adjustments;
    /// four factors stay at their blended values, matching the model's
    /// calibration.
    #[must_use]
    pub fn profile(&self) -> TeamProfile {
        TeamProfile::from_parts(
            CoreRatings {
                pace: self.adjusted_core.pace,
                ortg: self.adjusted_core.ortg,
                drtg: self.adjusted_core.drtg,
            },
            Some(self.weighted.four_factors),
            Some(self.adjusted_misc),
        )
    }
}

/// Builds team profiles from raw bundles with a fixed recency weight.
#[derive(Debug, Clone, Copy)]
pub struct ProfileBuilder {
    recency_weight: f64,
}

impl ProfileBuilder {
    /// Creates a builder blending last-10 form at the given weight.
    ///
    /// # Errors
    /// Returns [`DataError::InvalidRecencyWeight`] when the weight falls
    /// outside [0, 1].
    pub fn new(recency_weight: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&recency_weight) {
            return Err(DataError::invalid_recency_weight(recency_weight));
        }
        Ok(Self { recency_weight })
    }

    /// The configured recency weight.
    #[must_use]
    pub fn recency_weight(&self) -> f64 {
        self.recency_weight
    }

    /// Blends and contextually adjusts one team's bundle.
    ///
    /// Adjusters run in the model's fixed order: fatigue, venue, hustle,
    /// head-to-head. The venue adjuster compares against the raw season
    /// baseline, not the blended numbers.
    ///
    /// # Errors
    /// Propagates blending validation failures.
    pub fn prepare(
        &self,
        bundle: TeamDataBundle,
        head_to_head: Option<&HeadToHeadRecord>,
        location: Location,
    ) -> Result<PreparedTeam> {
        let weighted = compute_weighted_stats(&bundle, self.recency_weight)?;

        let mut adjusted_core = weighted.core;
        let mut adjusted_misc = weighted.misc;

        let notes = AdjustmentLog {
            fatigue: apply_fatigue(&mut adjusted_core, &mut adjusted_misc, &bundle.rest),
            venue: apply_venue(&mut adjusted_core, &bundle.venue, &bundle.season, location),
            hustle: apply_hustle(&mut adjusted_core, &mut adjusted_misc, bundle.hustle.as_ref()),
            head_to_head: apply_head_to_head(&mut adjusted_core, head_to_head),
        };

        Ok(PreparedTeam {
            bundle,
            weighted,
            adjusted_core,
            adjusted_misc,
            notes,
        })
    }
}

/// Complete output of a matchup analysis, ready for reporting or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupReport {
    pub home_team: String,
    pub away_team: String,
    pub league_avg_ortg: f64,
    pub spread: f64,
    pub decimal_odds: f64,
    pub recency_weight: f64,
    pub home: PreparedTeam,
    pub away: PreparedTeam,
    pub simulation: SimulationConfig,
    pub summary: SimulationSummary,
    pub decision: BettingDecision,
    pub cover_validation: CoverValidation,
}

impl MatchupReport {
    /// True when the run used the high-precision simulation depth.
    #[must_use]
    pub fn is_high_precision(&self) -> bool {
        self.simulation.num_simulations >= HIGH_PRECISION_SIMULATIONS
    }
}

/// Drives the full analysis path: fetch, build, simulate, price.
pub struct MatchupAnalyzer<F: StatsFetcher> {
    fetcher: F,
    builder: ProfileBuilder,
}

impl<F: StatsFetcher> MatchupAnalyzer<F> {
    /// Creates an analyzer over the given data source.
    #[must_use]
    pub fn new(fetcher: F, builder: ProfileBuilder) -> Self {
        Self { fetcher, builder }
    }

    /// Analyzes a home spread ticket end to end.
    ///
    /// # Errors
    /// Fails when either team cannot be fetched, the inputs fail
    /// validation, or the odds cannot be priced.
    pub async fn analyze(
        &self,
        home_team: &str,
        away_team: &str,
        spread: f64,
        decimal_odds: f64,
        simulation: SimulationConfig,
    ) -> anyhow::Result<MatchupReport> {
        info!(home_team, away_team, spread, "Starting matchup analysis");

        let league = self
            .fetcher
            .league_context()
            .await
            .context("failed to fetch league context")?;
        let home_bundle = self
            .fetcher
            .team_bundle(home_team)
            .await
            .with_context(|| format!("failed to fetch data for {home_team}"))?;
        let away_bundle = self
            .fetcher
            .team_bundle(away_team)
            .await
            .with_context(|| format!("failed to fetch data for {away_team}"))?;

        let home = self.builder.prepare(
            home_bundle,
            league.head_to_head.get(home_team),
            Location::Home,
        )?;
        let away = self.builder.prepare(
            away_bundle,
            league.head_to_head.get(away_team),
            Location::Away,
        )?;

        let summary = Simulator::new(simulation.clone()).run(
            &home.profile(),
            &away.profile(),
            league.league_avg_ortg,
            spread,
        )?;
        let decision = calculate_edge(&summary, decimal_odds)?;
        let cover_validation =
            CoverValidation::from_counts(summary.home_covers_count, summary.games_simulated);

        info!(
            cover_pct = summary.home_covers_percentage,
            edge_pct = decision.edge_percentage,
            call = ?decision.call,
            "Matchup analysis complete"
        );

        Ok(MatchupReport {
            home_team: home.bundle.team_name.clone(),
            away_team: away.bundle.team_name.clone(),
            league_avg_ortg: league.league_avg_ortg,
            spread,
            decimal_odds,
            recency_weight: self.builder.recency_weight(),
            home,
            away,
            simulation,
            summary,
            decision,
            cover_validation,
        })
    }
}

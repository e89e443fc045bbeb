//! The injectable data-source seam for the profile pipeline.
//!
//! Everything downstream of fetching is pure computation, so the only
//! seam the pipeline needs is a [`StatsFetcher`] implementation passed
//! in explicitly. Production callers use [`FileStatsFetcher`] over a
//! matchup document on disk; tests and embedders use
//! [`StaticStatsFetcher`] over in-memory bundles.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::bundle::{LeagueContext, MatchupDocument, TeamDataBundle};
use crate::error::{DataError, Result};

/// Source of team bundles and league context for a matchup.
#[async_trait]
pub trait StatsFetcher: Send + Sync {
    /// Returns the full data bundle for one team.
    async fn team_bundle(&self, team: &str) -> Result<TeamDataBundle>;

    /// Returns the league-wide context shared by both sides.
    async fn league_context(&self) -> Result<LeagueContext>;
}

/// Fetcher serving bundles from in-memory maps. The supported test
/// double, and a convenient source for embedders that already hold the
/// data.
#[derive(Debug, Clone, Default)]
pub struct StaticStatsFetcher {
    bundles: HashMap<String, TeamDataBundle>,
    league: LeagueContext,
}

impl StaticStatsFetcher {
    /// Creates an empty fetcher with the given league context.
    #[must_use]
    pub fn new(league: LeagueContext) -> Self {
        Self {
            bundles: HashMap::new(),
            league,
        }
    }

    /// Adds a team bundle, keyed by its own team name.
    #[must_use]
    pub fn with_bundle(mut self, bundle: TeamDataBundle) -> Self {
        self.bundles.insert(bundle.team_name.clone(), bundle);
        self
    }
}

#[async_trait]
impl StatsFetcher for StaticStatsFetcher {
    async fn team_bundle(&self, team: &str) -> Result<TeamDataBundle> {
        self.bundles
            .get(team)
            .cloned()
            .ok_or_else(|| DataError::unknown_team(team))
    }

    async fn league_context(&self) -> Result<LeagueContext> {
        Ok(self.league.clone())
    }
}

/// Fetcher backed by a matchup JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileStatsFetcher {
    document: MatchupDocument,
}

impl FileStatsFetcher {
    /// Loads and parses a matchup document.
    ///
    /// # Errors
    /// Returns [`DataError::Io`] when the file cannot be read and
    /// [`DataError::Parse`] when it is not a valid matchup document.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let document: MatchupDocument = serde_json::from_str(&contents)?;
        debug!(
            path = %path.display(),
            home = %document.home.team_name,
            away = %document.away.team_name,
            "Loaded matchup document"
        );
        Ok(Self { document })
    }

    /// Wraps an already-parsed matchup document.
    #[must_use]
    pub fn from_document(document: MatchupDocument) -> Self {
        Self { document }
    }

    /// The underlying matchup document.
    #[must_use]
    pub fn document(&self) -> &MatchupDocument {
        &self.document
    }
}

#[async_trait]
impl StatsFetcher for FileStatsFetcher {
    async fn team_bundle(&self, team: &str) -> Result<TeamDataBundle> {
        if self.document.home.team_name.eq_ignore_ascii_case(team) {
            Ok(self.document.home.clone())
        } else if self.document.away.team_name.eq_ignore_ascii_case(team) {
            Ok(self.document.away.clone())
        } else {
            Err(DataError::unknown_team(team))
        }
    }

    async fn league_context(&self) -> Result<LeagueContext> {
        Ok(self.document.league.clone())
    }
}

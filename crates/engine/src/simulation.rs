//! Monte Carlo simulation orchestration.
//!
//! Repeatedly samples games between two profiles, folds every outcome
//! into a streaming accumulator, and returns the aggregate summary. One
//! worker runs the classic serial loop; more than one splits the games
//! into independent batches that merge at the end.
//!
//! # Example
//! ```ignore
//! use courtsim_engine::{SimulationConfig, Simulator};
//!
//! let config = SimulationConfig::new(100_000).with_seed(42);
//! let simulator = Simulator::new(config);
//! let summary = simulator.run(&home, &away, 112.0, -3.5)?;
//! println!("Home covers {:.1}% of the time", summary.home_covers_percentage);
//! ```

use courtsim_core::{SimulationSummary, TeamProfile};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::accumulator::OutcomeAccumulator;
use crate::error::{Result, SimulationError};
use crate::parallel;
use crate::sampler::sample_game;

/// Standard simulation depth for everyday edge checks.
pub const DEFAULT_NUM_SIMULATIONS: u64 = 100_000;
/// Deeper run used when a line deserves a closer look.
pub const HIGH_PRECISION_SIMULATIONS: u64 = 1_000_000;
/// Default points added to the home side before score noise.
pub const DEFAULT_HOME_COURT_ADVANTAGE: f64 = 2.0;

/// Fractions of the run at which progress is logged.
const PROGRESS_CHECKPOINTS: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 0.9];

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of games to simulate.
    pub num_simulations: u64,
    /// Points added to the home team's expected score.
    pub home_court_advantage: f64,
    /// Optional seed for reproducible results.
    pub seed: Option<u64>,
    /// Number of independent batches to run. One means a serial loop.
    pub workers: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            home_court_advantage: DEFAULT_HOME_COURT_ADVANTAGE,
            seed: None,
            workers: 1,
        }
    }
}

impl SimulationConfig {
    /// Creates a configuration running the given number of games.
    #[must_use]
    pub fn new(num_simulations: u64) -> Self {
        Self {
            num_simulations,
            ..Default::default()
        }
    }

    /// Creates the high-precision configuration.
    #[must_use]
    pub fn high_precision() -> Self {
        Self::new(HIGH_PRECISION_SIMULATIONS)
    }

    /// Sets a seed for reproducible simulations.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the home-court advantage in points.
    #[must_use]
    pub fn with_home_court_advantage(mut self, points: f64) -> Self {
        self.home_court_advantage = points;
        self
    }

    /// Sets the number of parallel batches.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Monte Carlo simulator for a spread matchup.
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a new simulator with the given configuration.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Creates a simulator with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SimulationConfig::default())
    }

    /// Returns a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the configured number of simulations and summarizes them.
    ///
    /// Validation happens before any sampling: a zero game count or zero
    /// worker count is rejected immediately. With a seed set, repeated
    /// runs over the same inputs produce bit-identical summaries.
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidSimulationCount`] when the
    /// configured game count is zero, and
    /// [`SimulationError::InvalidWorkerCount`] when the worker count is.
    pub fn run(
        &self,
        home: &TeamProfile,
        away: &TeamProfile,
        league_avg_ortg: f64,
        spread: f64,
    ) -> Result<SimulationSummary> {
        if self.config.num_simulations == 0 {
            return Err(SimulationError::invalid_simulation_count(
                self.config.num_simulations,
            ));
        }
        if self.config.workers == 0 {
            return Err(SimulationError::invalid_worker_count(self.config.workers));
        }

        info!(
            num_simulations = self.config.num_simulations,
            workers = self.config.workers,
            spread,
            "Starting Monte Carlo simulation"
        );

        let accumulator = if self.config.workers > 1 {
            parallel::run_batches(&self.config, home, away, league_avg_ortg, spread)
        } else {
            self.run_serial(home, away, league_avg_ortg, spread)
        };

        let summary = accumulator.summarize();
        info!(
            home_covers = summary.home_covers_count,
            games = summary.games_simulated,
            cover_pct = summary.home_covers_percentage,
            "Simulation complete"
        );

        Ok(summary)
    }

    /// Classic single-threaded loop with milestone progress logging.
    fn run_serial(
        &self,
        home: &TeamProfile,
        away: &TeamProfile,
        league_avg_ortg: f64,
        spread: f64,
    ) -> OutcomeAccumulator {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let total = self.config.num_simulations;
        let milestones = progress_milestones(total);
        let mut next_milestone = 0;

        let mut accumulator = OutcomeAccumulator::new();
        for i in 0..total {
            let outcome = sample_game(
                home,
                away,
                league_avg_ortg,
                spread,
                self.config.home_court_advantage,
                &mut rng,
            );
            accumulator.record(&outcome);

            if milestones.get(next_milestone) == Some(&(i + 1)) {
                debug!(
                    games = i + 1,
                    progress_pct = (i + 1) as f64 / total as f64 * 100.0,
                    "Simulation progress"
                );
                next_milestone += 1;
            }
        }

        accumulator
    }
}

/// Game counts at which a long run reports progress.
fn progress_milestones(total: u64) -> Vec<u64> {
    let mut milestones: Vec<u64> = PROGRESS_CHECKPOINTS
        .iter()
        .map(|pct| (total as f64 * pct) as u64)
        .filter(|&m| m > 0 && m < total)
        .collect();
    milestones.sort_unstable();
    milestones.dedup();
    milestones
}

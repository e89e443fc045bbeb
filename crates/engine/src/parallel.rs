//! Parallel batch execution.
//!
//! Every game draw is independent of every other, so a run splits
//! cleanly into per-worker batches. Each batch owns its random stream
//! and its own accumulator; no state is shared while games run, and the
//! batch accumulators merge once at the end. A seeded run derives worker
//! streams as seed plus worker index, so results reproduce exactly for a
//! given seed and worker count.

use courtsim_core::TeamProfile;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::accumulator::OutcomeAccumulator;
use crate::sampler::sample_game;
use crate::simulation::SimulationConfig;

/// Runs the configured games across independent worker batches and
/// merges the per-batch aggregates.
pub(crate) fn run_batches(
    config: &SimulationConfig,
    home: &TeamProfile,
    away: &TeamProfile,
    league_avg_ortg: f64,
    spread: f64,
) -> OutcomeAccumulator {
    let batches = split_games(config.num_simulations, config.workers);

    let accumulators: Vec<OutcomeAccumulator> = batches
        .par_iter()
        .enumerate()
        .map(|(worker_index, &games)| {
            run_batch(
                worker_index,
                games,
                config,
                home,
                away,
                league_avg_ortg,
                spread,
            )
        })
        .collect();

    let mut combined = OutcomeAccumulator::new();
    for batch in &accumulators {
        combined.merge(batch);
    }
    combined
}

/// Runs one worker's share of the games on its own random stream.
fn run_batch(
    worker_index: usize,
    games: u64,
    config: &SimulationConfig,
    home: &TeamProfile,
    away: &TeamProfile,
    league_avg_ortg: f64,
    spread: f64,
) -> OutcomeAccumulator {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(worker_index as u64)),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut accumulator = OutcomeAccumulator::new();
    for _ in 0..games {
        let outcome = sample_game(
            home,
            away,
            league_avg_ortg,
            spread,
            config.home_court_advantage,
            &mut rng,
        );
        accumulator.record(&outcome);
    }

    debug!(worker = worker_index, games, "Batch complete");
    accumulator
}

/// Splits a total game count into per-worker batch sizes.
///
/// The first `total % workers` batches carry one extra game, so the
/// sizes always sum back to the total.
fn split_games(total: u64, workers: usize) -> Vec<u64> {
    let workers = workers.max(1);
    let base = total / workers as u64;
    let remainder = (total % workers as u64) as usize;

    (0..workers)
        .map(|i| base + u64::from(i < remainder))
        .collect()
}

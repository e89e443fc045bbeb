pub mod accumulator;
pub mod edge;
pub mod error;
mod parallel;
pub mod sampler;
pub mod simulation;

pub use accumulator::OutcomeAccumulator;
pub use edge::{calculate_edge, EDGE_THRESHOLD};
pub use error::{Result, SimulationError};
pub use sampler::sample_game;
pub use simulation::{
    SimulationConfig, Simulator, DEFAULT_HOME_COURT_ADVANTAGE, DEFAULT_NUM_SIMULATIONS,
    HIGH_PRECISION_SIMULATIONS,
};

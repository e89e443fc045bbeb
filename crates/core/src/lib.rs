pub mod config;
pub mod config_loader;
pub mod league;
pub mod outcome;
pub mod profile;
pub mod summary;
pub mod validation;

pub use config::{AnalysisSettings, AppConfig, SimulationSettings};
pub use config_loader::ConfigLoader;
pub use outcome::{GameOutcome, MIN_TEAM_SCORE, PUSH_TOLERANCE};
pub use profile::{CoreRatings, FourFactors, MiscScoring, StatSpread, TeamProfile};
pub use summary::{BetCall, BettingDecision, SimulationSummary};
pub use validation::{binomial_test, wilson_ci, CoverValidation};

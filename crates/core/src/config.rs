use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub simulation: SimulationSettings,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Number of virtual games per run. 100k is the standard mode; 1M is
    /// the high-precision mode.
    pub num_simulations: u64,
    /// Points added to the home side's expected score.
    pub home_court_advantage: f64,
    /// Worker count for the simulation loop. 1 runs serially.
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Weight of last-10 form against season-long averages, in [0, 1].
    pub recency_weight: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationSettings {
                num_simulations: 100_000,
                home_court_advantage: 2.0,
                workers: 1,
            },
            analysis: AnalysisSettings {
                recency_weight: 0.4,
            },
        }
    }
}

//! League-wide calibration constants.
//!
//! These values anchor every normalized differential the game sampler
//! computes. They are empirically chosen configuration data, reproduced
//! exactly, and are not exposed as tunable parameters.

/// League-average effective field goal percentage.
pub const LEAGUE_AVG_EFG_PCT: f64 = 0.540;
/// League-average free-throw attempt rate (FTA/FGA).
pub const LEAGUE_AVG_FTA_RATE: f64 = 0.250;
/// League-average turnover percentage.
pub const LEAGUE_AVG_TOV_PCT: f64 = 0.140;
/// League-average offensive rebound percentage.
pub const LEAGUE_AVG_OREB_PCT: f64 = 0.280;

/// League-average points off turnovers per game.
pub const LEAGUE_AVG_PTS_OFF_TOV: f64 = 15.0;
/// League-average second chance points per game.
pub const LEAGUE_AVG_PTS_2ND_CHANCE: f64 = 12.0;

/// Weight of the eFG% differential in the efficiency multiplier.
pub const WEIGHT_EFG_PCT: f64 = 0.40;
/// Weight of the FTA-rate differential in the efficiency multiplier.
pub const WEIGHT_FTA_RATE: f64 = 0.15;
/// Weight of the turnover differential (lower is better on offense).
pub const WEIGHT_TOV_PCT: f64 = 0.25;
/// Weight of the offensive-rebound differential.
pub const WEIGHT_OREB_PCT: f64 = 0.20;
/// Weight of the points-off-turnovers differential.
pub const WEIGHT_PTS_OFF_TOV: f64 = 0.10;
/// Weight of the second-chance-points differential.
pub const WEIGHT_PTS_2ND_CHANCE: f64 = 0.10;

/// Lower bound on the per-side efficiency multiplier.
pub const MULTIPLIER_FLOOR: f64 = 0.85;
/// Upper bound on the per-side efficiency multiplier.
pub const MULTIPLIER_CEIL: f64 = 1.15;

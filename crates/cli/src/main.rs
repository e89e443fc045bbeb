use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

mod report;

use courtsim_core::{BettingDecision, ConfigLoader, CoverValidation, SimulationSummary, TeamProfile};
use courtsim_data::{FileStatsFetcher, MatchupAnalyzer, ProfileBuilder};
use courtsim_engine::{calculate_edge, SimulationConfig, Simulator};
use report::ReportFormatter;

#[derive(Parser)]
#[command(name = "courtsim")]
#[command(about = "Monte Carlo NBA spread betting analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a matchup from ready-made team profiles
    Simulate {
        /// Profiles JSON file (both teams' finished profiles)
        #[arg(short, long)]
        matchup: String,
        /// Posted spread, home perspective (negative = home favored)
        #[arg(short, long, allow_hyphen_values = true)]
        spread: f64,
        /// Decimal odds on the home spread
        #[arg(short, long)]
        odds: f64,
        /// Number of games to simulate (default from config)
        #[arg(long)]
        simulations: Option<u64>,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Parallel worker count, 1 runs serially (default from config)
        #[arg(long)]
        workers: Option<usize>,
        /// Home-court advantage in points (default from config)
        #[arg(long)]
        hca: Option<f64>,
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Emit the JSON document instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Run the full pipeline from a raw matchup document
    Analyze {
        /// Matchup JSON document (raw bundles + league context)
        #[arg(short, long)]
        matchup: String,
        /// Posted spread, home perspective (negative = home favored)
        #[arg(short, long, allow_hyphen_values = true)]
        spread: f64,
        /// Decimal odds on the home spread
        #[arg(short, long)]
        odds: f64,
        /// Weight of last-10 form in [0, 1] (default from config)
        #[arg(long)]
        recency_weight: Option<f64>,
        /// Number of games to simulate (default from config)
        #[arg(long)]
        simulations: Option<u64>,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Parallel worker count, 1 runs serially (default from config)
        #[arg(long)]
        workers: Option<usize>,
        /// Home-court advantage in points (default from config)
        #[arg(long)]
        hca: Option<f64>,
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Emit the JSON document instead of the text report
        #[arg(long)]
        json: bool,
    },
}

/// Ready-made profiles document consumed by `simulate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfilesDocument {
    home_team: String,
    away_team: String,
    league_avg_ortg: f64,
    home: TeamProfile,
    away: TeamProfile,
}

/// Output of a bare `simulate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub home_team: String,
    pub away_team: String,
    pub league_avg_ortg: f64,
    pub spread: f64,
    pub decimal_odds: f64,
    pub simulation: SimulationConfig,
    pub summary: SimulationSummary,
    pub decision: BettingDecision,
    pub cover_validation: CoverValidation,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Simulate {
            matchup,
            spread,
            odds,
            simulations,
            seed,
            workers,
            hca,
            config,
            json,
        } => {
            run_simulate(
                &matchup,
                spread,
                odds,
                simulation_config(&config, simulations, seed, workers, hca)?,
                json,
            )
            .await
        }
        Commands::Analyze {
            matchup,
            spread,
            odds,
            recency_weight,
            simulations,
            seed,
            workers,
            hca,
            config,
            json,
        } => {
            let app_config = ConfigLoader::load_from(&config)?;
            let weight = recency_weight.unwrap_or(app_config.analysis.recency_weight);
            let sim_config = override_config(&app_config, simulations, seed, workers, hca);
            run_analyze(&matchup, spread, odds, weight, sim_config, json).await
        }
    }
}

/// Builds the simulation config from the config file plus flag overrides.
fn simulation_config(
    config_path: &str,
    simulations: Option<u64>,
    seed: Option<u64>,
    workers: Option<usize>,
    hca: Option<f64>,
) -> anyhow::Result<SimulationConfig> {
    let app_config = ConfigLoader::load_from(config_path)?;
    Ok(override_config(&app_config, simulations, seed, workers, hca))
}

fn override_config(
    app_config: &courtsim_core::AppConfig,
    simulations: Option<u64>,
    seed: Option<u64>,
    workers: Option<usize>,
    hca: Option<f64>,
) -> SimulationConfig {
    let mut config = SimulationConfig::new(
        simulations.unwrap_or(app_config.simulation.num_simulations),
    )
    .with_home_court_advantage(hca.unwrap_or(app_config.simulation.home_court_advantage))
    .with_workers(workers.unwrap_or(app_config.simulation.workers));
    config.seed = seed;
    config
}

async fn run_simulate(
    matchup_path: &str,
    spread: f64,
    odds: f64,
    config: SimulationConfig,
    json: bool,
) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(matchup_path)
        .await
        .with_context(|| format!("failed to read profiles document {matchup_path}"))?;
    let document: ProfilesDocument =
        serde_json::from_str(&contents).context("failed to parse profiles document")?;

    let summary = Simulator::new(config.clone()).run(
        &document.home,
        &document.away,
        document.league_avg_ortg,
        spread,
    )?;
    let decision = calculate_edge(&summary, odds)?;
    let cover_validation =
        CoverValidation::from_counts(summary.home_covers_count, summary.games_simulated);

    let report = SimulationReport {
        home_team: document.home_team,
        away_team: document.away_team,
        league_avg_ortg: document.league_avg_ortg,
        spread,
        decimal_odds: odds,
        simulation: config,
        summary,
        decision,
        cover_validation,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", ReportFormatter::format_simulation(&report));
    }
    Ok(())
}

async fn run_analyze(
    matchup_path: &str,
    spread: f64,
    odds: f64,
    recency_weight: f64,
    config: SimulationConfig,
    json: bool,
) -> anyhow::Result<()> {
    let fetcher = FileStatsFetcher::load(matchup_path)
        .await
        .with_context(|| format!("failed to load matchup document {matchup_path}"))?;
    let home_team = fetcher.document().home.team_name.clone();
    let away_team = fetcher.document().away.team_name.clone();

    let analyzer = MatchupAnalyzer::new(fetcher, ProfileBuilder::new(recency_weight)?);
    let report = analyzer
        .analyze(&home_team, &away_team, spread, odds, config)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", ReportFormatter::format_analysis(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_args_parse() {
        let cli = Cli::try_parse_from([
            "courtsim",
            "simulate",
            "--matchup",
            "profiles.json",
            "--spread",
            "-3.5",
            "--odds",
            "1.91",
            "--simulations",
            "50000",
            "--seed",
            "42",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Simulate {
                spread,
                odds,
                simulations,
                seed,
                json,
                ..
            } => {
                assert!((spread - -3.5).abs() < f64::EPSILON);
                assert!((odds - 1.91).abs() < f64::EPSILON);
                assert_eq!(simulations, Some(50_000));
                assert_eq!(seed, Some(42));
                assert!(json);
            }
            Commands::Analyze { .. } => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn analyze_args_parse_with_defaults() {
        let cli = Cli::try_parse_from([
            "courtsim", "analyze", "--matchup", "m.json", "--spread", "2.5", "--odds", "2.05",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze {
                recency_weight,
                simulations,
                workers,
                config,
                json,
                ..
            } => {
                assert!(recency_weight.is_none());
                assert!(simulations.is_none());
                assert!(workers.is_none());
                assert_eq!(config, "config/Config.toml");
                assert!(!json);
            }
            Commands::Simulate { .. } => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn missing_required_args_fail_to_parse() {
        assert!(Cli::try_parse_from(["courtsim", "simulate", "--spread", "-3.5"]).is_err());
        assert!(Cli::try_parse_from(["courtsim", "analyze", "--matchup", "m.json"]).is_err());
    }

    #[test]
    fn flag_overrides_beat_config_defaults() {
        let app_config = courtsim_core::AppConfig::default();
        let config = override_config(&app_config, Some(1_000_000), Some(7), Some(4), Some(0.0));

        assert_eq!(config.num_simulations, 1_000_000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.workers, 4);
        assert!(config.home_court_advantage.abs() < f64::EPSILON);
    }

    #[test]
    fn absent_flags_fall_back_to_config() {
        let app_config = courtsim_core::AppConfig::default();
        let config = override_config(&app_config, None, None, None, None);

        assert_eq!(config.num_simulations, 100_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.workers, 1);
        assert!((config.home_court_advantage - 2.0).abs() < f64::EPSILON);
    }
}

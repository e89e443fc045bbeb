#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use courtsim_core::BetCall;
use courtsim_data::{MatchupReport, PreparedTeam};
use courtsim_engine::HIGH_PRECISION_SIMULATIONS;

use crate::SimulationReport;

const BANNER: &str = "═══════════════════════════════════════════════════════════════\n";
const RULE: &str = "───────────────────────────────────────────────────────────────\n";

pub struct ReportFormatter;

impl ReportFormatter {
    /// Formats a bare simulation run over ready-made profiles.
    #[must_use]
    pub fn format_simulation(report: &SimulationReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(BANNER);
        output.push_str("              MONTE CARLO SPREAD SIMULATION                    \n");
        output.push_str(BANNER);
        output.push('\n');

        output.push_str("Matchup\n");
        output.push_str(RULE);
        output.push_str(&format!("Home Team:             {}\n", report.home_team));
        output.push_str(&format!("Away Team:             {}\n", report.away_team));
        output.push_str(&format!(
            "League Average ORtg:   {:.2}\n",
            report.league_avg_ortg
        ));
        output.push('\n');

        Self::push_simulation_results(&mut output, report_stats(report));
        Self::push_betting_analysis(&mut output, report_bets(report));

        output.push_str(BANNER);
        output
    }

    /// Formats a full pipeline analysis, including the blended stats and
    /// every adjuster's notes.
    #[must_use]
    pub fn format_analysis(report: &MatchupReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(BANNER);
        output.push_str("             MONTE CARLO NBA BETTING ANALYSIS                  \n");
        output.push_str(BANNER);
        output.push('\n');

        output.push_str("Matchup\n");
        output.push_str(RULE);
        output.push_str(&format!("Home Team:             {}\n", report.home_team));
        output.push_str(&format!("Away Team:             {}\n", report.away_team));
        output.push_str(&format!(
            "League Average ORtg:   {:.2}\n",
            report.league_avg_ortg
        ));
        output.push_str(&format!(
            "Recency Weight:        {:.0}%\n",
            report.recency_weight * 100.0
        ));
        output.push('\n');

        output.push_str("Team Ratings (season | last 10 | weighted | adjusted)\n");
        output.push_str(RULE);
        Self::push_team_ratings(&mut output, &report.home_team, &report.home);
        Self::push_team_ratings(&mut output, &report.away_team, &report.away);
        output.push('\n');

        output.push_str("Four Factors (weighted)\n");
        output.push_str(RULE);
        Self::push_four_factors(&mut output, &report.home_team, &report.home);
        Self::push_four_factors(&mut output, &report.away_team, &report.away);
        output.push('\n');

        output.push_str("Miscellaneous Scoring (adjusted)\n");
        output.push_str(RULE);
        Self::push_misc(&mut output, &report.home_team, &report.home);
        Self::push_misc(&mut output, &report.away_team, &report.away);
        output.push('\n');

        output.push_str("Contextual Adjustments\n");
        output.push_str(RULE);
        Self::push_notes(&mut output, &report.home_team, &report.home);
        Self::push_notes(&mut output, &report.away_team, &report.away);
        output.push('\n');

        Self::push_simulation_results(&mut output, analysis_stats(report));
        Self::push_betting_analysis(&mut output, analysis_bets(report));

        output.push_str(BANNER);
        output
    }

    fn push_team_ratings(output: &mut String, name: &str, team: &PreparedTeam) {
        output.push_str(&format!("{}\n", name));
        output.push_str(&format!(
            "  Pace:  {:6.1} | {:6.1} | {:6.1} | {:6.1}\n",
            team.bundle.season.pace,
            team.bundle.last_10.pace,
            team.weighted.core.pace,
            team.adjusted_core.pace,
        ));
        output.push_str(&format!(
            "  ORtg:  {:6.1} | {:6.1} | {:6.1} | {:6.1}\n",
            team.bundle.season.ortg,
            team.bundle.last_10.ortg,
            team.weighted.core.ortg,
            team.adjusted_core.ortg,
        ));
        output.push_str(&format!(
            "  DRtg:  {:6.1} | {:6.1} | {:6.1} | {:6.1}\n",
            team.bundle.season.drtg,
            team.bundle.last_10.drtg,
            team.weighted.core.drtg,
            team.adjusted_core.drtg,
        ));
    }

    fn push_four_factors(output: &mut String, name: &str, team: &PreparedTeam) {
        let ff = &team.weighted.four_factors;
        output.push_str(&format!("{}\n", name));
        output.push_str(&format!(
            "  Offense:  eFG% {:.3} | FTA Rate {:.3} | TOV% {:.3} | OREB% {:.3}\n",
            ff.efg_pct, ff.fta_rate, ff.tov_pct, ff.oreb_pct
        ));
        output.push_str(&format!(
            "  Defense:  eFG% {:.3} | FTA Rate {:.3} | TOV% {:.3} | OREB% {:.3}\n",
            ff.opp_efg_pct, ff.opp_fta_rate, ff.opp_tov_pct, ff.opp_oreb_pct
        ));
    }

    fn push_misc(output: &mut String, name: &str, team: &PreparedTeam) {
        let misc = &team.adjusted_misc;
        output.push_str(&format!("{}\n", name));
        output.push_str(&format!(
            "  Pts off TO:  {:5.1} (allow {:5.1}) | 2nd Chance: {:5.1} (allow {:5.1})\n",
            misc.pts_off_tov, misc.opp_pts_off_tov, misc.pts_2nd_chance, misc.opp_pts_2nd_chance
        ));
    }

    fn push_notes(output: &mut String, name: &str, team: &PreparedTeam) {
        output.push_str(&format!("{}\n", name));
        let sections = [
            ("Fatigue", &team.notes.fatigue),
            ("Venue", &team.notes.venue),
            ("Hustle", &team.notes.hustle),
            ("Head-to-Head", &team.notes.head_to_head),
        ];
        for (label, notes) in sections {
            for note in notes {
                output.push_str(&format!("  {:13} {}\n", format!("{label}:"), note));
            }
        }
    }

    fn push_simulation_results(output: &mut String, stats: SimulationStats<'_>) {
        output.push_str("Simulation Results\n");
        output.push_str(RULE);
        output.push_str(&format!("Mode:                  {}\n", stats.mode));
        output.push_str(&format!(
            "Games Simulated:       {}\n",
            stats.summary.games_simulated
        ));
        output.push_str(&format!(
            "Home Covers Spread:    {} times ({:.1}%)\n",
            stats.summary.home_covers_count, stats.summary.home_covers_percentage
        ));
        output.push_str(&format!(
            "Push Outcomes:         {} times ({:.1}%)\n",
            stats.summary.push_count, stats.summary.push_percentage
        ));
        output.push_str(&format!(
            "Home Wins Outright:    {} times ({:.1}%)\n",
            stats.summary.home_wins_count, stats.summary.home_win_percentage
        ));
        output.push_str(&format!(
            "Average Final Scores:  {:.1} - {:.1}\n",
            stats.summary.average_home_score, stats.summary.average_away_score
        ));
        output.push_str(&format!(
            "Average Margin:        {:.1} ± {:.1} points\n",
            stats.summary.average_margin, stats.summary.margin_std_dev
        ));
        output.push_str(&format!(
            "95% CI (Mean Margin):  {:.2} to {:.2}\n",
            stats.summary.confidence_interval_95.0, stats.summary.confidence_interval_95.1
        ));
        output.push_str(&format!(
            "Cover Rate Wilson CI:  {:.1}% to {:.1}%\n",
            stats.validation.wilson_ci_lower * 100.0,
            stats.validation.wilson_ci_upper * 100.0
        ));
        output.push('\n');
    }

    fn push_betting_analysis(output: &mut String, bets: BettingLines<'_>) {
        output.push_str("Betting Analysis\n");
        output.push_str(RULE);
        output.push_str(&format!("Sportsbook Line:       {:+.1}\n", bets.spread));
        output.push_str(&format!("Decimal Odds:          {:.2}\n", bets.odds));
        output.push_str(&format!(
            "Win Probability:       {:.1}%\n",
            bets.decision.win_probability * 100.0
        ));
        output.push_str(&format!(
            "Push Probability:      {:.1}%\n",
            bets.decision.push_probability * 100.0
        ));
        output.push_str(&format!(
            "Loss Probability:      {:.1}%\n",
            bets.decision.loss_probability * 100.0
        ));
        output.push_str(&format!(
            "Implied Probability:   {:.1}%\n",
            bets.decision.implied_probability * 100.0
        ));
        output.push_str(&format!(
            "Breakeven Probability: {:.1}%\n",
            bets.decision.breakeven_probability * 100.0
        ));
        output.push_str(&format!(
            "Expected Value:        {:+.4}\n",
            bets.decision.expected_value
        ));
        output.push_str(&format!(
            "Edge Percentage:       {:+.2}%\n",
            bets.decision.edge_percentage
        ));
        output.push('\n');
        output.push_str(&format!(
            "Recommendation:        {}\n",
            recommendation(bets.decision.call, bets.home_team)
        ));
        output.push('\n');
    }
}

struct SimulationStats<'a> {
    mode: &'a str,
    summary: &'a courtsim_core::SimulationSummary,
    validation: &'a courtsim_core::CoverValidation,
}

struct BettingLines<'a> {
    spread: f64,
    odds: f64,
    decision: &'a courtsim_core::BettingDecision,
    home_team: &'a str,
}

fn mode_label(num_simulations: u64) -> &'static str {
    if num_simulations >= HIGH_PRECISION_SIMULATIONS {
        "High Precision"
    } else {
        "Standard"
    }
}

fn report_stats(report: &SimulationReport) -> SimulationStats<'_> {
    SimulationStats {
        mode: mode_label(report.simulation.num_simulations),
        summary: &report.summary,
        validation: &report.cover_validation,
    }
}

fn report_bets(report: &SimulationReport) -> BettingLines<'_> {
    BettingLines {
        spread: report.spread,
        odds: report.decimal_odds,
        decision: &report.decision,
        home_team: &report.home_team,
    }
}

fn analysis_stats(report: &MatchupReport) -> SimulationStats<'_> {
    SimulationStats {
        mode: mode_label(report.simulation.num_simulations),
        summary: &report.summary,
        validation: &report.cover_validation,
    }
}

fn analysis_bets(report: &MatchupReport) -> BettingLines<'_> {
    BettingLines {
        spread: report.spread,
        odds: report.decimal_odds,
        decision: &report.decision,
        home_team: &report.home_team,
    }
}

fn recommendation(call: BetCall, home_team: &str) -> String {
    match call {
        BetCall::PositiveEv => format!("POSITIVE EV BET on {home_team} spread"),
        BetCall::NoBet => "NO BET - LINE IS EFFICIENT.".to_string(),
    }
}

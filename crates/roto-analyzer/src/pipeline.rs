// End-to-end analysis: league data in, report values and output files out.
//
// Each stage takes the previous stage's output explicitly:
// 1. Aggregate team totals from rosters + projections
// 2. Rank every category and build standings
// 3. Analyze the designated team and generate recommendations
// 4. Rank free agents
// 5. Build chart data

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::free_agents::{find_free_agents, rank_free_agents, FreeAgentRankings};
use crate::analysis::{
    analyze_team, generate_recommendations, AnalysisError, Recommendation, TeamAnalysis,
};
use crate::charts::{radar_chart, rank_matrix, RadarChart, RankMatrix};
use crate::config::Config;
use crate::league::LeagueData;
use crate::report;
use crate::stats::aggregate::{compute_league_totals, LeagueTotals};
use crate::stats::ranking::{rank_league, RankingError, Standings};

/// Analysis of the designated team plus the advice derived from it.
#[derive(Debug, Clone)]
pub struct TeamReport {
    pub analysis: TeamAnalysis,
    pub recommendations: Vec<Recommendation>,
}

/// Everything one run produces, before it is written anywhere.
#[derive(Debug, Clone)]
pub struct LeagueReport {
    pub league_name: String,
    pub my_team: String,
    pub generated_on: NaiveDate,
    pub totals: LeagueTotals,
    pub standings: Standings,
    /// `Err` when the designated team is not in the league. League-wide
    /// sections are still produced.
    pub team: Result<TeamReport, AnalysisError>,
    pub free_agents: FreeAgentRankings,
    pub heatmap: RankMatrix,
    pub radar: Option<RadarChart>,
}

/// Run the full analysis for `config.league.my_team`.
pub fn run(
    data: &LeagueData,
    config: &Config,
    generated_on: NaiveDate,
) -> Result<LeagueReport, RankingError> {
    let my_team = config.league.my_team.as_str();
    info!("Starting analysis of {} teams", data.rosters.len());

    let totals = compute_league_totals(&data.rosters, &data.projections);
    if !totals.missing.is_empty() {
        warn!(
            "{} rostered players have no projection and were skipped",
            totals.missing.len()
        );
    }

    let standings = rank_league(&totals)?;

    let team = analyze_team(my_team, &data.rosters, &data.projections, &totals, &standings).map(
        |analysis| {
            let recommendations = generate_recommendations(&analysis);
            TeamReport {
                analysis,
                recommendations,
            }
        },
    );
    if let Err(e) = &team {
        warn!("Skipping team analysis: {}", e);
    }

    let pool = find_free_agents(&data.rosters, &data.projections);
    let free_agents = rank_free_agents(
        &pool,
        &config.free_agents.batter_weights,
        &config.free_agents.pitcher_weights,
    );

    let heatmap = rank_matrix(&standings);
    let radar = radar_chart(&totals, my_team);

    Ok(LeagueReport {
        league_name: config.league.name.clone(),
        my_team: my_team.to_string(),
        generated_on,
        totals,
        standings,
        team,
        free_agents,
        heatmap,
        radar,
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Paths of the files written by [`write_outputs`].
#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub report: PathBuf,
    pub free_agent_report: PathBuf,
    pub heatmap: PathBuf,
    pub radar: Option<PathBuf>,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Write the markdown reports and chart data into the configured directories.
pub fn write_outputs(report: &LeagueReport, config: &Config) -> anyhow::Result<OutputFiles> {
    let reports_dir = Path::new(&config.output.reports_dir);
    let visuals_dir = Path::new(&config.output.visuals_dir);
    std::fs::create_dir_all(reports_dir)
        .with_context(|| format!("failed to create {}", reports_dir.display()))?;
    std::fs::create_dir_all(visuals_dir)
        .with_context(|| format!("failed to create {}", visuals_dir.display()))?;

    let stamp = report.generated_on.format("%Y%m%d").to_string();

    let report_path = reports_dir.join(format!("roto_report_{stamp}.md"));
    write_text(&report_path, &report::render_league_report(report))?;
    info!("Report generated: {}", report_path.display());

    let fa_path = reports_dir.join(format!("free_agents_{stamp}.md"));
    write_text(
        &fa_path,
        &report::render_free_agent_report(
            &report.free_agents,
            config.free_agents.num_players,
            &config.free_agents.batter_weights,
            &config.free_agents.pitcher_weights,
            report.generated_on,
        ),
    )?;
    info!("Free agent report generated: {}", fa_path.display());

    let heatmap_path = visuals_dir.join(format!("team_ranks_heatmap_{stamp}.json"));
    write_json(&heatmap_path, &report.heatmap)?;

    let radar_path = match &report.radar {
        Some(radar) => {
            let path = visuals_dir.join(format!("team_strengths_radar_{stamp}.json"));
            write_json(&path, radar)?;
            Some(path)
        }
        None => None,
    };
    info!("Chart data written to {}", visuals_dir.display());

    Ok(OutputFiles {
        report: report_path,
        free_agent_report: fa_path,
        heatmap: heatmap_path,
        radar: radar_path,
    })
}

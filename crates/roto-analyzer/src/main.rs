// Roto analyzer entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr)
// 2. Load config, apply command-line overrides
// 3. Load league data (files or built-in fallback)
// 4. Run the analysis pipeline
// 5. Write reports and chart data

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use roto_analyzer::config::{self, Config};
use roto_analyzer::league;
use roto_analyzer::pipeline;

#[derive(Parser, Debug)]
#[command(name = "roto")]
#[command(about = "Rotisserie fantasy baseball standings, team analysis and free-agent rankings")]
#[command(version)]
struct Args {
    /// Directory holding config/ and defaults/ (default: current directory)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// League identifier
    #[arg(long)]
    league_id: Option<String>,

    /// Team to analyze
    #[arg(long)]
    your_team: Option<String>,

    /// Roster CSV (team_name, player_name, position)
    #[arg(long)]
    teams_file: Option<String>,

    /// Batter projection CSV
    #[arg(long)]
    batter_file: Option<String>,

    /// Pitcher projection CSV
    #[arg(long)]
    pitcher_file: Option<String>,

    /// Output directory for markdown reports
    #[arg(long)]
    reports_dir: Option<String>,

    /// Output directory for chart data
    #[arg(long)]
    visuals_dir: Option<String>,

    /// Rows per table in the free-agent report
    #[arg(long)]
    num_free_agents: Option<usize>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(id) = self.league_id {
            config.league.id = id;
        }
        if let Some(team) = self.your_team {
            config.league.my_team = team;
        }
        if self.teams_file.is_some() {
            config.data_paths.teams = self.teams_file;
        }
        if self.batter_file.is_some() {
            config.data_paths.batters = self.batter_file;
        }
        if self.pitcher_file.is_some() {
            config.data_paths.pitchers = self.pitcher_file;
        }
        if let Some(dir) = self.reports_dir {
            config.output.reports_dir = dir;
        }
        if let Some(dir) = self.visuals_dir {
            config.output.visuals_dir = dir;
        }
        if let Some(n) = self.num_free_agents {
            config.free_agents.num_players = n;
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;

    let mut args = Args::parse();

    // 2. Load config
    let base_dir = match args.config_dir.take() {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let mut config = config::load_config_at(&base_dir).context("failed to load configuration")?;
    args.apply(&mut config);
    config::validate(&config).context("invalid command-line override")?;
    info!(
        "Config loaded: league={} ({}), analyzing {}",
        config.league.name, config.league.id, config.league.my_team
    );

    // 3. Load league data
    let data = league::load_league(&config.data_paths);

    // 4. Run the analysis
    let today = chrono::Local::now().date_naive();
    let report = pipeline::run(&data, &config, today).context("failed to rank league")?;

    // 5. Write outputs
    let files = pipeline::write_outputs(&report, &config).context("failed to write outputs")?;

    println!("Analysis complete!");
    println!("Report saved to: {}", files.report.display());
    println!("Free agent report saved to: {}", files.free_agent_report.display());
    match &files.radar {
        Some(radar) => println!(
            "Chart data saved to: {} and {}",
            files.heatmap.display(),
            radar.display()
        ),
        None => println!("Chart data saved to: {}", files.heatmap.display()),
    }

    Ok(())
}

/// Initialize tracing to stderr; stdout carries only the final summary.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roto_analyzer=info,roto=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

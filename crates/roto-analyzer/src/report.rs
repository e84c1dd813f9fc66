// Markdown rendering for the league report and the free-agent report.

use chrono::NaiveDate;

use crate::analysis::free_agents::{BatterWeights, FreeAgentRankings, PitcherWeights, Scored};
use crate::analysis::{TeamAnalysis, TradePartner};
use crate::league::projections::{BatterProjection, PitcherProjection};
use crate::pipeline::{LeagueReport, TeamReport};
use crate::stats::aggregate::TeamTotals;
use crate::stats::category::Category;

/// Rank at or above which R/HR/RBI/SV strengths get a descriptor.
const ELITE_RANK: usize = 3;
/// Saves above which a pitcher is named as a closer in the strengths list.
const CLOSER_SV: u32 = 20;
/// Strengths/weaknesses compared when describing a potential deal.
const DEAL_DEPTH: usize = 2;
/// Names per line in the waiver-wire target summary.
const WAIVER_TARGETS: usize = 5;

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// A pipe-delimited markdown table.
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut s = String::new();
    s.push_str(&format!("| {} |\n", headers.join(" | ")));
    s.push_str(&format!(
        "|{}|\n",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        s.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    s
}

/// Category value with the precision the category is reported at.
pub fn format_value(category: Category, value: f64) -> String {
    match category {
        Category::Avg | Category::Ops => format!("{value:.3}"),
        Category::Era | Category::Whip => format!("{value:.2}"),
        Category::K9 => format!("{value:.1}"),
        _ => format!("{value:.0}"),
    }
}

fn team_value(totals: &TeamTotals, category: Category) -> String {
    format_value(category, totals.value(category))
}

fn join_codes(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.code())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Team section descriptors
// ---------------------------------------------------------------------------

fn strength_note(analysis: &TeamAnalysis, category: Category, rank: usize) -> Option<String> {
    match category {
        Category::StolenBases if rank == 1 => Some("League-leading stolen base total".into()),
        Category::Runs if rank <= ELITE_RANK => Some("Elite run production".into()),
        Category::HomeRuns if rank <= ELITE_RANK => Some("Top power production".into()),
        Category::Rbi if rank <= ELITE_RANK => Some("Excellent RBI production".into()),
        Category::Saves if rank <= ELITE_RANK => {
            let closers: Vec<&str> = analysis
                .pitchers
                .iter()
                .filter(|p| p.sv > CLOSER_SV)
                .map(|p| p.name.as_str())
                .collect();
            (!closers.is_empty()).then(|| format!("Strong in saves with {}", closers.join(", ")))
        }
        _ => None,
    }
}

fn weakness_note(category: Category, rank: usize, num_teams: usize) -> Option<&'static str> {
    if rank == num_teams {
        Some("Worst in the league")
    } else if rank >= num_teams.saturating_sub(2) {
        Some("Near bottom of the league")
    } else if category == Category::QualityStarts && rank * 2 > num_teams {
        Some("Below average in quality starts")
    } else {
        None
    }
}

/// "Trade from your X surplus for Y help" when both sides line up.
fn potential_deal(analysis: &TeamAnalysis, partner: &TradePartner) -> Option<String> {
    let their_strengths = &partner.their_strengths[..partner.their_strengths.len().min(DEAL_DEPTH)];
    let their_weaknesses =
        &partner.their_weaknesses[..partner.their_weaknesses.len().min(DEAL_DEPTH)];

    let surplus: Vec<Category> = analysis
        .strength_categories()
        .take(DEAL_DEPTH)
        .filter(|c| their_weaknesses.contains(c))
        .collect();
    let help: Vec<Category> = analysis
        .weakness_categories()
        .take(DEAL_DEPTH)
        .filter(|c| their_strengths.contains(c))
        .collect();

    if surplus.is_empty() || help.is_empty() {
        return None;
    }
    Some(format!(
        "Trade from your {} surplus for {} help",
        join_codes(&surplus),
        join_codes(&help)
    ))
}

fn category_lines(
    out: &mut String,
    analysis: &TeamAnalysis,
    list: &[(Category, usize)],
    note: impl Fn(Category, usize) -> Option<String>,
) {
    let totals = TeamTotals {
        batting: analysis.batting.clone(),
        pitching: analysis.pitching.clone(),
    };
    for (i, (category, rank)) in list.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}**: Rank {} ({})",
            i + 1,
            category.code(),
            rank,
            team_value(&totals, *category)
        ));
        if let Some(text) = note(*category, *rank) {
            out.push_str(&format!(" - {text}"));
        }
        out.push('\n');
    }
    out.push('\n');
}

fn batter_row(b: &BatterProjection) -> Vec<String> {
    vec![
        b.name.clone(),
        b.ab.to_string(),
        b.r.to_string(),
        b.hr.to_string(),
        b.rbi.to_string(),
        b.sb.to_string(),
        format!("{:.3}", b.avg),
        format!("{:.3}", b.ops),
    ]
}

fn pitcher_row(p: &PitcherProjection) -> Vec<String> {
    vec![
        p.name.clone(),
        format!("{:.1}", p.ip),
        format!("{:.2}", p.era),
        format!("{:.2}", p.whip),
        format!("{:.1}", p.k9),
        p.qs.to_string(),
        p.sv.to_string(),
    ]
}

const BATTER_HEADERS: [&str; 8] = ["Player", "AB", "R", "HR", "RBI", "SB", "AVG", "OPS"];
const PITCHER_HEADERS: [&str; 7] = ["Player", "IP", "ERA", "WHIP", "K/9", "QS", "SV"];

fn render_team_section(out: &mut String, team: &TeamReport) {
    let analysis = &team.analysis;
    let n = analysis.num_teams;

    out.push_str(&format!("## Your Team Analysis ({})\n\n", analysis.team_name));
    out.push_str(&format!(
        "Overall rank: **{}** of {} with {} total points.\n\n",
        analysis.overall_rank, n, analysis.total_points
    ));

    out.push_str(&format!(
        "### Team Strengths (Top {} Categories):\n",
        analysis.strengths.len()
    ));
    category_lines(out, analysis, &analysis.strengths, |c, r| {
        strength_note(analysis, c, r)
    });

    out.push_str(&format!(
        "### Team Weaknesses (Bottom {} Categories):\n",
        analysis.weaknesses.len()
    ));
    category_lines(out, analysis, &analysis.weaknesses, |c, r| {
        weakness_note(c, r, n).map(str::to_string)
    });

    out.push_str("### Potential Trade Targets:\n\n");
    if analysis.trade_partners.is_empty() {
        out.push_str("No complementary trade partners found.\n\n");
    }
    for (i, partner) in analysis.trade_partners.iter().enumerate() {
        out.push_str(&format!("{}. **{}**\n", i + 1, partner.team));
        out.push_str(&format!(
            "   - Strong in: {}\n",
            join_codes(&partner.their_strengths)
        ));
        out.push_str(&format!(
            "   - They are weak in: {}\n",
            join_codes(&partner.their_weaknesses)
        ));
        if let Some(deal) = potential_deal(analysis, partner) {
            out.push_str(&format!("   - Potential deal: {deal}\n"));
        }
        if !partner.notable_players.is_empty() {
            out.push_str(&format!(
                "   - Players to target: {}\n",
                partner.notable_players.join(", ")
            ));
        }
        out.push('\n');
    }

    out.push_str("## Player Projections for Your Team\n\n");
    out.push_str("### Batters\n");
    let batters: Vec<Vec<String>> = analysis.batters.iter().map(batter_row).collect();
    out.push_str(&markdown_table(&BATTER_HEADERS, &batters));
    out.push('\n');
    out.push_str("### Pitchers\n");
    let pitchers: Vec<Vec<String>> = analysis.pitchers.iter().map(pitcher_row).collect();
    out.push_str(&markdown_table(&PITCHER_HEADERS, &pitchers));
    out.push('\n');

    out.push_str("## Strategy Recommendations\n\n");
    for (i, rec) in team.recommendations.iter().enumerate() {
        out.push_str(&format!("{}. **{}**: {}\n\n", i + 1, rec.title, rec.body));
    }
}

// ---------------------------------------------------------------------------
// League report
// ---------------------------------------------------------------------------

pub fn render_league_report(report: &LeagueReport) -> String {
    let mut out = String::new();

    out.push_str("# Fantasy Baseball League Analysis\n\n");
    if !report.league_name.is_empty() {
        out.push_str(&format!("**League:** {}\n\n", report.league_name));
    }
    out.push_str(&format!(
        "*Generated on {}*\n\n",
        report.generated_on.format("%Y-%m-%d")
    ));

    out.push_str("## Projected Team Statistics\n\n");
    out.push_str("### Batting Statistics\n");
    let batting: Vec<Vec<String>> = report
        .totals
        .teams
        .iter()
        .map(|(team, t)| {
            let b = &t.batting;
            vec![
                team.clone(),
                b.r.to_string(),
                b.hr.to_string(),
                b.rbi.to_string(),
                b.sb.to_string(),
                format!("{:.3}", b.avg),
                format!("{:.3}", b.ops),
            ]
        })
        .collect();
    out.push_str(&markdown_table(
        &["Team", "R", "HR", "RBI", "SB", "AVG", "OPS"],
        &batting,
    ));
    out.push('\n');

    out.push_str("### Pitching Statistics\n");
    let pitching: Vec<Vec<String>> = report
        .totals
        .teams
        .iter()
        .map(|(team, t)| {
            let p = &t.pitching;
            vec![
                team.clone(),
                format!("{:.1}", p.ip),
                format!("{:.2}", p.era),
                format!("{:.2}", p.whip),
                format!("{:.1}", p.k9),
                p.qs.to_string(),
                p.sv.to_string(),
            ]
        })
        .collect();
    out.push_str(&markdown_table(
        &["Team", "IP", "ERA", "WHIP", "K/9", "QS", "SV"],
        &pitching,
    ));
    out.push('\n');

    out.push_str("## Overall Team Rankings\n");
    let standings: Vec<Vec<String>> = report
        .standings
        .table
        .iter()
        .map(|s| {
            vec![
                s.rank.to_string(),
                s.team.clone(),
                s.batting_points.to_string(),
                s.pitching_points.to_string(),
                s.total_points.to_string(),
            ]
        })
        .collect();
    out.push_str(&markdown_table(
        &["Rank", "Team", "Batting Points", "Pitching Points", "Total Points"],
        &standings,
    ));
    out.push('\n');

    out.push_str("## Detailed Category Rankings\n");
    let mut headers = vec!["Team"];
    headers.extend(Category::ALL.iter().map(|c| c.code()));
    headers.push("Total");
    let detailed: Vec<Vec<String>> = report
        .standings
        .table
        .iter()
        .map(|s| {
            let mut row = vec![s.team.clone()];
            let ranks = report.standings.team_ranks(&s.team);
            for category in Category::ALL {
                row.push(
                    ranks
                        .and_then(|r| r.rank(category))
                        .map_or_else(|| "-".to_string(), |r| r.to_string()),
                );
            }
            row.push(s.total_points.to_string());
            row
        })
        .collect();
    out.push_str(&markdown_table(&headers, &detailed));
    out.push('\n');

    match &report.team {
        Ok(team) => render_team_section(&mut out, team),
        Err(e) => {
            out.push_str(&format!("## Your Team Analysis ({})\n\n", report.my_team));
            out.push_str(&format!("_Team analysis unavailable: {e}._\n"));
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Free-agent report
// ---------------------------------------------------------------------------

fn ranked_batter_rows(list: &[Scored<BatterProjection>], limit: usize) -> Vec<Vec<String>> {
    list.iter()
        .take(limit)
        .enumerate()
        .map(|(i, s)| {
            let mut row = vec![(i + 1).to_string()];
            row.extend(batter_row(&s.player));
            row.push(format!("{:.1}", s.score));
            row
        })
        .collect()
}

fn ranked_pitcher_rows(list: &[Scored<PitcherProjection>], limit: usize) -> Vec<Vec<String>> {
    list.iter()
        .take(limit)
        .enumerate()
        .map(|(i, s)| {
            let mut row = vec![(i + 1).to_string()];
            row.extend(pitcher_row(&s.player));
            row.push(format!("{:.1}", s.score));
            row
        })
        .collect()
}

fn names<T>(list: &[Scored<T>], limit: usize, name: impl Fn(&T) -> &str) -> String {
    list.iter()
        .take(limit)
        .map(|s| name(&s.player))
        .collect::<Vec<_>>()
        .join(", ")
}

fn leader_line<T>(out: &mut String, label: &str, list: &[T], describe: impl Fn(&T) -> String) {
    out.push_str(&format!("**{label}:** "));
    if list.is_empty() {
        out.push_str("none qualified");
    } else {
        out.push_str(&list.iter().map(describe).collect::<Vec<_>>().join(", "));
    }
    out.push_str("\n\n");
}

fn weights_line(named: &[(&str, f64)]) -> String {
    named
        .iter()
        .map(|(name, w)| format!("{name} {w:.1}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_free_agent_report(
    rankings: &FreeAgentRankings,
    num_players: usize,
    batter_weights: &BatterWeights,
    pitcher_weights: &PitcherWeights,
    generated_on: NaiveDate,
) -> String {
    let mut out = String::new();

    out.push_str("# Fantasy Baseball Free Agent Rankings\n\n");
    out.push_str(&format!("*Generated on {}*\n\n", generated_on.format("%Y-%m-%d")));
    out.push_str(&format!(
        "Batter weights: {}\n\nPitcher weights: {}\n\n",
        weights_line(&batter_weights.named()),
        weights_line(&pitcher_weights.named())
    ));

    let mut batter_headers = vec!["Rank"];
    batter_headers.extend(BATTER_HEADERS);
    batter_headers.push("Score");
    let mut pitcher_headers = vec!["Rank"];
    pitcher_headers.extend(PITCHER_HEADERS);
    pitcher_headers.push("Score");

    out.push_str("## Top Free Agent Batters\n\n");
    out.push_str(&markdown_table(
        &batter_headers,
        &ranked_batter_rows(&rankings.batters, num_players),
    ));
    out.push('\n');

    out.push_str("## Top Free Agent Pitchers\n\n");
    out.push_str("### Starting Pitchers\n\n");
    out.push_str(&markdown_table(
        &pitcher_headers,
        &ranked_pitcher_rows(&rankings.starters, num_players),
    ));
    out.push('\n');
    out.push_str("### Relief Pitchers\n\n");
    out.push_str(&markdown_table(
        &pitcher_headers,
        &ranked_pitcher_rows(&rankings.relievers, num_players),
    ));
    out.push('\n');

    out.push_str("## Free Agent Pickup Recommendations\n\n");
    out.push_str("### Top Waiver Wire Targets\n\n");
    let groups = [
        ("Batters", names(&rankings.batters, WAIVER_TARGETS, |p| p.name.as_str())),
        ("Starting Pitchers", names(&rankings.starters, WAIVER_TARGETS, |p| p.name.as_str())),
        ("Relief Pitchers", names(&rankings.relievers, WAIVER_TARGETS, |p| p.name.as_str())),
    ];
    for (label, list) in groups {
        if !list.is_empty() {
            out.push_str(&format!("**{label}:** {list}\n\n"));
        }
    }

    out.push_str("### Category-Specific Free Agent Targets\n\n");
    let l = &rankings.leaders;
    leader_line(&mut out, "Power (HR/RBI)", &l.power, |b| {
        format!("{} ({} HR, {} RBI)", b.name, b.hr, b.rbi)
    });
    leader_line(&mut out, "Speed (SB)", &l.speed, |b| format!("{} ({} SB)", b.name, b.sb));
    leader_line(&mut out, "Batting Average", &l.avg, |b| format!("{} ({:.3})", b.name, b.avg));
    leader_line(&mut out, "OPS", &l.ops, |b| format!("{} ({:.3})", b.name, b.ops));
    leader_line(&mut out, "ERA", &l.era, |p| format!("{} ({:.2})", p.name, p.era));
    leader_line(&mut out, "WHIP", &l.whip, |p| format!("{} ({:.2})", p.name, p.whip));
    leader_line(&mut out, "Strikeouts (K/9)", &l.k9, |p| format!("{} ({:.1})", p.name, p.k9));
    leader_line(&mut out, "Quality Starts", &l.qs, |p| format!("{} ({})", p.name, p.qs));
    leader_line(&mut out, "Saves", &l.sv, |p| format!("{} ({})", p.name, p.sv));

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::free_agents::{find_free_agents, rank_free_agents};
    use crate::config::{Config, DataPaths, FreeAgentConfig, LeagueConfig, OutputConfig};
    use crate::league::LeagueData;
    use crate::pipeline::run;
    use crate::stats::aggregate::{TeamBatting, TeamPitching};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn config_for(team: &str) -> Config {
        Config {
            league: LeagueConfig {
                id: "2874".into(),
                name: "Test League".into(),
                my_team: team.into(),
            },
            data_paths: DataPaths::default(),
            output: OutputConfig::default(),
            free_agents: FreeAgentConfig::default(),
        }
    }

    fn bare_analysis() -> TeamAnalysis {
        TeamAnalysis {
            team_name: "Mine".into(),
            num_teams: 12,
            overall_rank: 1,
            total_points: 100,
            batting: TeamBatting::default(),
            pitching: TeamPitching::default(),
            strengths: vec![(Category::StolenBases, 1), (Category::Runs, 2)],
            weaknesses: vec![(Category::Ops, 12), (Category::Era, 11)],
            trade_partners: Vec::new(),
            batters: Vec::new(),
            pitchers: Vec::new(),
        }
    }

    #[test]
    fn table_has_header_separator_and_rows() {
        let t = markdown_table(&["A", "B"], &[vec!["1".into(), "2".into()]]);
        assert_eq!(t, "| A | B |\n|---|---|\n| 1 | 2 |\n");
    }

    #[test]
    fn values_use_category_precision() {
        assert_eq!(format_value(Category::Avg, 0.2666), "0.267");
        assert_eq!(format_value(Category::Era, 3.5), "3.50");
        assert_eq!(format_value(Category::K9, 9.04), "9.0");
        assert_eq!(format_value(Category::HomeRuns, 250.0), "250");
    }

    #[test]
    fn weakness_notes_follow_rank() {
        assert_eq!(weakness_note(Category::Runs, 12, 12), Some("Worst in the league"));
        assert_eq!(weakness_note(Category::Runs, 10, 12), Some("Near bottom of the league"));
        assert_eq!(
            weakness_note(Category::QualityStarts, 7, 12),
            Some("Below average in quality starts")
        );
        assert_eq!(weakness_note(Category::Runs, 7, 12), None);
    }

    #[test]
    fn strength_notes() {
        let mut a = bare_analysis();
        assert_eq!(
            strength_note(&a, Category::StolenBases, 1).as_deref(),
            Some("League-leading stolen base total")
        );
        assert_eq!(strength_note(&a, Category::StolenBases, 2), None);
        assert_eq!(strength_note(&a, Category::Saves, 1), None);

        a.pitchers.push(PitcherProjection {
            name: "Closer".into(),
            ip: 65.0,
            era: 2.5,
            whip: 1.0,
            k9: 11.0,
            qs: 0,
            sv: 35,
        });
        assert_eq!(
            strength_note(&a, Category::Saves, 2).as_deref(),
            Some("Strong in saves with Closer")
        );
    }

    #[test]
    fn potential_deal_needs_both_sides() {
        let a = bare_analysis();
        let mut partner = TradePartner {
            team: "Them".into(),
            their_strengths: vec![Category::Ops, Category::HomeRuns, Category::Saves],
            their_weaknesses: vec![Category::Avg, Category::StolenBases, Category::K9],
            notable_players: vec!["Bat".into()],
        };
        assert_eq!(
            potential_deal(&a, &partner).as_deref(),
            Some("Trade from your SB surplus for OPS help")
        );

        partner.their_weaknesses = vec![Category::Avg, Category::K9];
        assert_eq!(potential_deal(&a, &partner), None);
    }

    #[test]
    fn league_report_contains_all_sections() {
        let report = run(&LeagueData::builtin(), &config_for("Kenny Kawaguchis"), date()).unwrap();
        let text = render_league_report(&report);

        let sections = [
            "### Batting Statistics",
            "### Pitching Statistics",
            "## Overall Team Rankings",
            "## Detailed Category Rankings",
            "## Your Team Analysis (Kenny Kawaguchis)",
            "### Team Strengths",
            "### Team Weaknesses",
            "### Potential Trade Targets",
            "## Player Projections for Your Team",
            "## Strategy Recommendations",
        ];
        let mut last = 0;
        for section in sections {
            let pos = text[last..]
                .find(section)
                .unwrap_or_else(|| panic!("missing or out of order: {section}"));
            last += pos;
        }
        assert!(text.contains("*Generated on 2025-03-20*"));
    }

    #[test]
    fn unknown_team_report_skips_team_sections() {
        let report = run(&LeagueData::builtin(), &config_for("Nobody"), date()).unwrap();
        let text = render_league_report(&report);
        assert!(text.contains("## Overall Team Rankings"));
        assert!(text.contains("team 'Nobody' not found in the league"));
        assert!(!text.contains("### Team Strengths"));
    }

    #[test]
    fn free_agent_report_respects_row_limit() {
        let data = LeagueData::builtin();
        let pool = find_free_agents(&data.rosters, &data.projections);
        let bw = BatterWeights::default();
        let pw = PitcherWeights::default();
        let rankings = rank_free_agents(&pool, &bw, &pw);
        let text = render_free_agent_report(&rankings, 3, &bw, &pw, date());

        assert!(text.starts_with("# Fantasy Baseball Free Agent Rankings"));
        assert!(text.contains("### Relief Pitchers"));
        assert!(text.contains("**Power (HR/RBI):**"));
        // Rank column never goes past the limit.
        assert!(!text.contains("\n| 4 |"));
        assert!(text.contains("\n| 3 |"));
    }
}

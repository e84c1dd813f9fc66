// Team analysis: strengths, weaknesses, and complementary trade partners
// for one designated team.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::league::projections::{BatterProjection, PitcherProjection, ProjectionStore};
use crate::league::roster::{LeagueRosters, TeamRoster};
use crate::stats::aggregate::{LeagueTotals, TeamBatting, TeamPitching};
use crate::stats::category::Category;
use crate::stats::ranking::{Standings, TeamRanks};

// ---------------------------------------------------------------------------
// Tunables
// ---------------------------------------------------------------------------

/// Number of categories reported as strengths and as weaknesses.
pub const FOCUS_CATEGORIES: usize = 4;

/// How many of our best/worst categories a partner must complement.
pub const PARTNER_MATCH_DEPTH: usize = 2;

/// How many of a partner's own best/worst categories are reported.
pub const PARTNER_PROFILE_DEPTH: usize = 3;

/// A partner is weak in a category when its rank is worse than this.
pub const PARTNER_WEAK_RANK: usize = 8;
/// A partner is strong in a category when its rank is better than this.
pub const PARTNER_STRONG_RANK: usize = 5;

pub const MAX_NOTABLE_PLAYERS: usize = 3;
pub const MAX_TRADE_PARTNERS: usize = 3;

// A rostered player is "notable" for a category when their projection
// clears the matching threshold.
pub const NOTABLE_R: u32 = 90;
pub const NOTABLE_HR: u32 = 30;
pub const NOTABLE_RBI: u32 = 90;
pub const NOTABLE_SB: u32 = 20;
pub const NOTABLE_AVG: f64 = 0.280;
pub const NOTABLE_OPS: f64 = 0.850;
pub const NOTABLE_ERA: f64 = 3.20;
pub const NOTABLE_WHIP: f64 = 1.10;
pub const NOTABLE_K9: f64 = 10.5;
pub const NOTABLE_QS: u32 = 18;
pub const NOTABLE_SV: u32 = 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("team '{0}' not found in the league")]
    UnknownTeam(String),
}

/// Another team whose strengths cover our weaknesses and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradePartner {
    pub team: String,
    pub their_strengths: Vec<Category>,
    pub their_weaknesses: Vec<Category>,
    /// Their players who excel in one of our weak categories.
    pub notable_players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAnalysis {
    pub team_name: String,
    pub num_teams: usize,
    pub overall_rank: usize,
    pub total_points: usize,
    pub batting: TeamBatting,
    pub pitching: TeamPitching,
    /// Best categories first.
    pub strengths: Vec<(Category, usize)>,
    /// Worst categories first.
    pub weaknesses: Vec<(Category, usize)>,
    pub trade_partners: Vec<TradePartner>,
    /// Rostered batters with projections, in roster order.
    pub batters: Vec<BatterProjection>,
    /// Rostered pitchers with projections, in roster order.
    pub pitchers: Vec<PitcherProjection>,
}

impl TeamAnalysis {
    pub fn strength_categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.strengths.iter().map(|(c, _)| *c)
    }

    pub fn weakness_categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.weaknesses.iter().map(|(c, _)| *c)
    }

    pub fn is_strength(&self, category: Category) -> bool {
        self.strength_categories().any(|c| c == category)
    }

    pub fn is_weakness(&self, category: Category) -> bool {
        self.weakness_categories().any(|c| c == category)
    }
}

// ---------------------------------------------------------------------------
// Category ordering helpers
// ---------------------------------------------------------------------------

/// The `count` best-ranked categories, best first. Equal ranks keep
/// canonical category order.
pub fn best_categories(ranks: &TeamRanks, count: usize) -> Vec<(Category, usize)> {
    let mut ranked = ranks.ranked();
    ranked.sort_by_key(|(_, rank)| *rank);
    ranked.truncate(count);
    ranked
}

/// The `count` worst-ranked categories, worst first. Equal ranks keep
/// canonical category order.
pub fn worst_categories(ranks: &TeamRanks, count: usize) -> Vec<(Category, usize)> {
    let mut ranked = ranks.ranked();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(count);
    ranked
}

/// Fixed cutoff, independent of league size.
pub fn is_weak_rank(rank: usize) -> bool {
    rank > PARTNER_WEAK_RANK
}

pub fn is_strong_rank(rank: usize) -> bool {
    rank < PARTNER_STRONG_RANK
}

// ---------------------------------------------------------------------------
// Notable players
// ---------------------------------------------------------------------------

/// Whether a batter's projection clears the notable threshold for `category`.
/// Always false for pitching categories.
pub fn batter_excels_in(proj: &BatterProjection, category: Category) -> bool {
    match category {
        Category::Runs => proj.r > NOTABLE_R,
        Category::HomeRuns => proj.hr > NOTABLE_HR,
        Category::Rbi => proj.rbi > NOTABLE_RBI,
        Category::StolenBases => proj.sb > NOTABLE_SB,
        Category::Avg => proj.avg > NOTABLE_AVG,
        Category::Ops => proj.ops > NOTABLE_OPS,
        _ => false,
    }
}

/// Whether a pitcher's projection clears the notable threshold for `category`.
/// Always false for batting categories.
pub fn pitcher_excels_in(proj: &PitcherProjection, category: Category) -> bool {
    match category {
        Category::Era => proj.era < NOTABLE_ERA,
        Category::Whip => proj.whip < NOTABLE_WHIP,
        Category::K9 => proj.k9 > NOTABLE_K9,
        Category::QualityStarts => proj.qs > NOTABLE_QS,
        Category::Saves => proj.sv > NOTABLE_SV,
        _ => false,
    }
}

fn notable_players(
    roster: &TeamRoster,
    store: &ProjectionStore,
    their_strengths: &[Category],
    needs: &[Category],
) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |name: &String| {
        if !found.contains(name) {
            found.push(name.clone());
        }
    };

    if their_strengths.iter().any(Category::is_batting) {
        for name in &roster.batters {
            if let Some(proj) = store.batter(name) {
                if needs.iter().any(|c| batter_excels_in(proj, *c)) {
                    push(name);
                }
            }
        }
    }

    if their_strengths.iter().any(Category::is_pitching) {
        for name in &roster.pitchers {
            if let Some(proj) = store.pitcher(name) {
                if needs.iter().any(|c| pitcher_excels_in(proj, *c)) {
                    push(name);
                }
            }
        }
    }

    found.truncate(MAX_NOTABLE_PLAYERS);
    found
}

// ---------------------------------------------------------------------------
// Trade partners
// ---------------------------------------------------------------------------

fn find_trade_partners(
    team: &str,
    strengths: &[(Category, usize)],
    weaknesses: &[(Category, usize)],
    rosters: &LeagueRosters,
    store: &ProjectionStore,
    standings: &Standings,
) -> Vec<TradePartner> {
    let needs: Vec<Category> = weaknesses.iter().map(|(c, _)| *c).collect();
    let mut partners = Vec::new();

    for (other, roster) in rosters.iter() {
        if other == team {
            continue;
        }
        let Some(ranks) = standings.team_ranks(other) else {
            continue;
        };

        // They are weak where we are strong...
        let covers_strength = strengths
            .iter()
            .take(PARTNER_MATCH_DEPTH)
            .any(|(c, _)| ranks.rank(*c).is_some_and(is_weak_rank));
        // ...and strong where we are weak.
        let covers_weakness = weaknesses
            .iter()
            .take(PARTNER_MATCH_DEPTH)
            .any(|(c, _)| ranks.rank(*c).is_some_and(is_strong_rank));

        if !(covers_strength && covers_weakness) {
            continue;
        }

        let their_strengths: Vec<Category> = best_categories(ranks, PARTNER_PROFILE_DEPTH)
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        let their_weaknesses: Vec<Category> = worst_categories(ranks, PARTNER_PROFILE_DEPTH)
            .into_iter()
            .map(|(c, _)| c)
            .collect();

        let notable = notable_players(roster, store, &their_strengths, &needs);
        if notable.is_empty() {
            debug!("{} complements {} but has no notable players", other, team);
            continue;
        }

        partners.push(TradePartner {
            team: other.to_string(),
            their_strengths,
            their_weaknesses,
            notable_players: notable,
        });
        if partners.len() == MAX_TRADE_PARTNERS {
            break;
        }
    }

    partners
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Analyze one team against the rest of the league.
///
/// Fails with [`AnalysisError::UnknownTeam`] if the team has no roster or
/// no standings entry.
pub fn analyze_team(
    team: &str,
    rosters: &LeagueRosters,
    store: &ProjectionStore,
    totals: &LeagueTotals,
    standings: &Standings,
) -> Result<TeamAnalysis, AnalysisError> {
    let unknown = || AnalysisError::UnknownTeam(team.to_string());
    let roster = rosters.team(team).ok_or_else(unknown)?;
    let ranks = standings.team_ranks(team).ok_or_else(unknown)?;
    let standing = standings.standing(team).ok_or_else(unknown)?;
    let team_totals = totals.team(team).ok_or_else(unknown)?;

    let strengths = best_categories(ranks, FOCUS_CATEGORIES);
    let weaknesses = worst_categories(ranks, FOCUS_CATEGORIES);
    let trade_partners =
        find_trade_partners(team, &strengths, &weaknesses, rosters, store, standings);

    let batters = roster
        .batters
        .iter()
        .filter_map(|name| store.batter(name).cloned())
        .collect();
    let pitchers = roster
        .pitchers
        .iter()
        .filter_map(|name| store.pitcher(name).cloned())
        .collect();

    info!(
        "Team analysis completed for {} ({} trade partners)",
        team,
        trade_partners.len()
    );

    Ok(TeamAnalysis {
        team_name: team.to_string(),
        num_teams: standings.num_teams,
        overall_rank: standing.rank,
        total_points: standing.total_points,
        batting: team_totals.batting.clone(),
        pitching: team_totals.pitching.clone(),
        strengths,
        weaknesses,
        trade_partners,
        batters,
        pitchers,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

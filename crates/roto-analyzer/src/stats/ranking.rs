// Rotisserie category ranking and overall standings.
//
// For each category every team is ordered best-to-worst. With N teams, first
// place earns N points and last place earns 1. Ties in a category value are
// broken alphabetically by team name, so every category hands out exactly
// the points {1..N}. Overall standings order by total points descending,
// also tie-broken alphabetically.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::stats::aggregate::LeagueTotals;
use crate::stats::category::Category;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("cannot rank an empty league")]
    EmptyLeague,
}

/// A team's placement in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryRank {
    /// 1 = best.
    pub rank: usize,
    /// num_teams - rank + 1.
    pub points: usize,
}

/// Per-category placements for one team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamRanks {
    pub categories: BTreeMap<Category, CategoryRank>,
}

impl TeamRanks {
    pub fn rank(&self, category: Category) -> Option<usize> {
        self.categories.get(&category).map(|c| c.rank)
    }

    pub fn points(&self, category: Category) -> Option<usize> {
        self.categories.get(&category).map(|c| c.points)
    }

    /// Categories with their rank, in canonical category order.
    pub fn ranked(&self) -> Vec<(Category, usize)> {
        self.categories.iter().map(|(c, r)| (*c, r.rank)).collect()
    }

    fn points_over(&self, categories: &[Category]) -> usize {
        categories.iter().filter_map(|c| self.points(*c)).sum()
    }
}

/// One row of the overall standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub team: String,
    pub batting_points: usize,
    pub pitching_points: usize,
    pub total_points: usize,
}

/// Category placements for every team plus the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings {
    pub num_teams: usize,
    pub category_ranks: BTreeMap<String, TeamRanks>,
    /// Sorted by overall rank.
    pub table: Vec<Standing>,
}

impl Standings {
    pub fn team_ranks(&self, team: &str) -> Option<&TeamRanks> {
        self.category_ranks.get(team)
    }

    pub fn standing(&self, team: &str) -> Option<&Standing> {
        self.table.iter().find(|s| s.team == team)
    }
}

/// Order teams best-to-worst in one category.
///
/// Higher values win except for ERA and WHIP. Equal values fall back to
/// team name ascending.
pub fn order_teams(totals: &LeagueTotals, category: Category) -> Vec<&str> {
    let mut entries: Vec<(&str, f64)> = totals
        .teams
        .iter()
        .map(|(team, t)| (team.as_str(), t.value(category)))
        .collect();

    entries.sort_by(|a, b| {
        let by_value = if category.higher_is_better() {
            b.1.total_cmp(&a.1)
        } else {
            a.1.total_cmp(&b.1)
        };
        by_value.then_with(|| a.0.cmp(b.0))
    });

    entries.into_iter().map(|(team, _)| team).collect()
}

/// Rank every team in every category and build the overall standings.
pub fn rank_league(totals: &LeagueTotals) -> Result<Standings, RankingError> {
    if totals.is_empty() {
        return Err(RankingError::EmptyLeague);
    }
    let num_teams = totals.len();

    let mut category_ranks: BTreeMap<String, TeamRanks> = totals
        .teams
        .keys()
        .map(|team| (team.clone(), TeamRanks::default()))
        .collect();

    for category in Category::ALL {
        for (index, team) in order_teams(totals, category).into_iter().enumerate() {
            if let Some(ranks) = category_ranks.get_mut(team) {
                ranks.categories.insert(
                    category,
                    CategoryRank {
                        rank: index + 1,
                        points: num_teams - index,
                    },
                );
            }
        }
    }

    let mut table: Vec<Standing> = category_ranks
        .iter()
        .map(|(team, ranks)| {
            let batting_points = ranks.points_over(&Category::BATTING);
            let pitching_points = ranks.points_over(&Category::PITCHING);
            Standing {
                rank: 0,
                team: team.clone(),
                batting_points,
                pitching_points,
                total_points: batting_points + pitching_points,
            }
        })
        .collect();

    table.sort_by(|a, b| match b.total_points.cmp(&a.total_points) {
        Ordering::Equal => a.team.cmp(&b.team),
        other => other,
    });
    for (index, standing) in table.iter_mut().enumerate() {
        standing.rank = index + 1;
    }

    Ok(Standings {
        num_teams,
        category_ranks,
        table,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Numeric data behind the two charts: the team-by-category rank heat map
// and the designated team's radar comparison against the league average.
// Rendering is left to whatever consumes the JSON.

use serde::Serialize;

use crate::stats::aggregate::LeagueTotals;
use crate::stats::category::Category;
use crate::stats::ranking::Standings;

/// Ranks for every team (alphabetical rows) in every category (canonical
/// columns). 1 = best.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankMatrix {
    pub title: String,
    pub teams: Vec<String>,
    pub categories: Vec<Category>,
    pub ranks: Vec<Vec<usize>>,
}

impl RankMatrix {
    pub fn rank(&self, team: &str, category: Category) -> Option<usize> {
        let row = self.teams.iter().position(|t| t == team)?;
        let col = self.categories.iter().position(|c| *c == category)?;
        self.ranks.get(row)?.get(col).copied()
    }
}

pub fn rank_matrix(standings: &Standings) -> RankMatrix {
    let categories = Category::ALL.to_vec();
    let mut teams = Vec::with_capacity(standings.category_ranks.len());
    let mut ranks = Vec::with_capacity(standings.category_ranks.len());

    for (team, team_ranks) in &standings.category_ranks {
        teams.push(team.clone());
        ranks.push(
            categories
                .iter()
                .map(|c| team_ranks.rank(*c).unwrap_or(0))
                .collect(),
        );
    }

    RankMatrix {
        title: "Team Category Rankings Heatmap (1 = Best)".to_string(),
        teams,
        categories,
        ranks,
    }
}

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub category: Category,
    pub team_value: f64,
    pub league_average: f64,
    /// 1.0 = league average; above 1.0 is better for every category.
    pub normalized: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub title: String,
    pub team: String,
    pub axes: Vec<RadarAxis>,
}

/// League mean of one category over all teams. Zero for an empty league.
pub fn league_average(totals: &LeagueTotals, category: Category) -> f64 {
    if totals.is_empty() {
        return 0.0;
    }
    let sum: f64 = totals.teams.values().map(|t| t.value(category)).sum();
    sum / totals.len() as f64
}

/// Scale a team value against the league average so that larger is better.
pub fn normalize(category: Category, team_value: f64, league_average: f64) -> f64 {
    if category.higher_is_better() {
        if league_average > 0.0 {
            team_value / league_average
        } else {
            1.0
        }
    } else if team_value > 0.0 {
        league_average / team_value
    } else {
        1.0
    }
}

/// Radar data for `team`, or `None` if the team has no totals.
pub fn radar_chart(totals: &LeagueTotals, team: &str) -> Option<RadarChart> {
    let team_totals = totals.team(team)?;
    let axes = Category::ALL
        .iter()
        .map(|&category| {
            let team_value = team_totals.value(category);
            let league_average = league_average(totals, category);
            RadarAxis {
                category,
                team_value,
                league_average,
                normalized: normalize(category, team_value, league_average),
            }
        })
        .collect();

    Some(RadarChart {
        title: format!("{team} Strengths vs. League Average"),
        team: team.to_string(),
        axes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregate::TeamTotals;
    use crate::stats::ranking::rank_league;

    fn two_teams() -> LeagueTotals {
        let mut a = TeamTotals::default();
        a.batting.hr = 60;
        a.pitching.era = 3.00;
        let mut b = TeamTotals::default();
        b.batting.hr = 40;
        b.pitching.era = 4.50;
        let mut totals = LeagueTotals::default();
        totals.teams.insert("Beta".into(), b);
        totals.teams.insert("Alpha".into(), a);
        totals
    }

    #[test]
    fn matrix_rows_alphabetical_columns_canonical() {
        let standings = rank_league(&two_teams()).unwrap();
        let matrix = rank_matrix(&standings);
        assert_eq!(matrix.teams, vec!["Alpha", "Beta"]);
        assert_eq!(matrix.categories.len(), 11);
        assert_eq!(matrix.categories[0], Category::Runs);
        assert_eq!(matrix.rank("Alpha", Category::HomeRuns), Some(1));
        assert_eq!(matrix.rank("Beta", Category::Era), Some(2));
        assert!(matrix.ranks.iter().all(|row| row.len() == 11));
    }

    #[test]
    fn radar_normalizes_both_directions() {
        let totals = two_teams();
        let radar = radar_chart(&totals, "Alpha").unwrap();
        let axis = |c: Category| radar.axes.iter().find(|a| a.category == c).unwrap();

        let hr = axis(Category::HomeRuns);
        assert!((hr.league_average - 50.0).abs() < 1e-9);
        assert!((hr.normalized - 1.2).abs() < 1e-9);

        let era = axis(Category::Era);
        assert!((era.league_average - 3.75).abs() < 1e-9);
        assert!((era.normalized - 1.25).abs() < 1e-9);

        // Both teams have zero saves: the axis sits at league average.
        assert_eq!(axis(Category::Saves).normalized, 1.0);
    }

    #[test]
    fn zero_ratio_normalizes_to_one() {
        assert_eq!(normalize(Category::Whip, 0.0, 1.2), 1.0);
        assert_eq!(normalize(Category::Runs, 10.0, 0.0), 1.0);
    }

    #[test]
    fn radar_for_unknown_team_is_none() {
        assert!(radar_chart(&two_teams(), "Gamma").is_none());
    }
}

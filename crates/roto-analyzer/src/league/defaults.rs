// Built-in sample league used when no input files are supplied or they
// cannot be read. The data ships as CSV text and goes through the same
// loaders as user files.

use tracing::error;

use super::projections::{self, ProjectionStore};
use super::roster::{self, LeagueRosters};

const DEFAULT_TEAMS_CSV: &str = include_str!("../../data/teams.csv");
const DEFAULT_BATTERS_CSV: &str = include_str!("../../data/batters.csv");
const DEFAULT_PITCHERS_CSV: &str = include_str!("../../data/pitchers.csv");

/// The 12-team sample league.
pub fn default_rosters() -> LeagueRosters {
    match roster::load_rosters_from_reader(DEFAULT_TEAMS_CSV.as_bytes()) {
        Ok(rosters) => rosters,
        Err(e) => {
            error!("built-in roster data failed to parse: {}", e);
            LeagueRosters::new()
        }
    }
}

/// Projections for every sample-league player plus a pool of unrostered
/// free agents.
pub fn default_projections() -> ProjectionStore {
    let batters = projections::load_batters_from_reader(DEFAULT_BATTERS_CSV.as_bytes())
        .unwrap_or_else(|e| {
            error!("built-in batter projections failed to parse: {}", e);
            Vec::new()
        });
    let pitchers = projections::load_pitchers_from_reader(DEFAULT_PITCHERS_CSV.as_bytes())
        .unwrap_or_else(|e| {
            error!("built-in pitcher projections failed to parse: {}", e);
            Vec::new()
        });
    ProjectionStore::from_parts(batters, pitchers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_league_has_twelve_teams() {
        let rosters = default_rosters();
        assert_eq!(rosters.len(), 12);
        assert!(rosters.contains_team("Kenny Kawaguchis"));
        let kenny = rosters.team("Kenny Kawaguchis").unwrap();
        assert_eq!(kenny.batters.len(), 14);
        assert_eq!(kenny.pitchers.len(), 9);
    }

    #[test]
    fn default_projections_cover_rostered_players_and_free_agents() {
        let rosters = default_rosters();
        let store = default_projections();

        let rostered = rosters.rostered_players();
        let unrostered_batters = store
            .batters
            .keys()
            .filter(|n| !rostered.contains(n.as_str()))
            .count();
        assert!(unrostered_batters > 0);

        let judge = store.batter("Aaron Judge").unwrap();
        assert_eq!(judge.hr, 45);
        let skubal = store.pitcher("Tarik Skubal").unwrap();
        assert_eq!(skubal.qs, 20);
    }
}

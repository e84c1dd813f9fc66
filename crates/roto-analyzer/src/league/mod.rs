// League input data: rosters, projections, and the built-in fallback.

pub mod defaults;
pub mod projections;
pub mod roster;

use std::path::Path;

use tracing::{info, warn};

use crate::config::DataPaths;
use projections::ProjectionStore;
use roster::LeagueRosters;

/// Where a piece of league data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    File,
    BuiltIn,
}

/// Rosters and projections for one analysis run. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct LeagueData {
    pub rosters: LeagueRosters,
    pub projections: ProjectionStore,
    pub roster_source: DataSource,
    pub projection_source: DataSource,
}

impl LeagueData {
    pub fn new(rosters: LeagueRosters, projections: ProjectionStore) -> Self {
        LeagueData {
            rosters,
            projections,
            roster_source: DataSource::File,
            projection_source: DataSource::File,
        }
    }

    /// The built-in sample league.
    pub fn builtin() -> Self {
        LeagueData {
            rosters: defaults::default_rosters(),
            projections: defaults::default_projections(),
            roster_source: DataSource::BuiltIn,
            projection_source: DataSource::BuiltIn,
        }
    }
}

/// Load rosters and projections from the configured paths.
///
/// A missing path, an unreadable file, or a file with no usable rows falls
/// back to the built-in data for that source with a warning; it never fails
/// the run. Batter and pitcher projections fall back together.
pub fn load_league(paths: &DataPaths) -> LeagueData {
    let (rosters, roster_source) = match paths.teams.as_deref().map(Path::new) {
        Some(path) if path.exists() => match roster::load_rosters(path) {
            Ok(rosters) => {
                info!("Loaded {} teams from {}", rosters.len(), path.display());
                (rosters, DataSource::File)
            }
            Err(e) => {
                warn!("Error loading teams file, using built-in rosters: {}", e);
                (defaults::default_rosters(), DataSource::BuiltIn)
            }
        },
        _ => {
            info!("Teams file not provided or missing; using built-in rosters");
            (defaults::default_rosters(), DataSource::BuiltIn)
        }
    };

    let batter_path = paths.batters.as_deref().map(Path::new);
    let pitcher_path = paths.pitchers.as_deref().map(Path::new);
    let (projections, projection_source) = match (batter_path, pitcher_path) {
        (Some(b), Some(p)) if b.exists() && p.exists() => {
            match projections::load_store_from_paths(b, p) {
                Ok(store) => {
                    info!(
                        "Loaded {} batter and {} pitcher projections from files",
                        store.batters.len(),
                        store.pitchers.len()
                    );
                    (store, DataSource::File)
                }
                Err(e) => {
                    warn!("Error loading projection files, using built-in projections: {}", e);
                    (defaults::default_projections(), DataSource::BuiltIn)
                }
            }
        }
        _ => {
            info!("Projection files not provided or missing; using built-in projections");
            (defaults::default_projections(), DataSource::BuiltIn)
        }
    };

    LeagueData {
        rosters,
        projections,
        roster_source,
        projection_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_paths_uses_builtin_for_everything() {
        let data = load_league(&DataPaths::default());
        assert_eq!(data.roster_source, DataSource::BuiltIn);
        assert_eq!(data.projection_source, DataSource::BuiltIn);
        assert_eq!(data.rosters.len(), 12);
    }

    #[test]
    fn nonexistent_files_fall_back() {
        let paths = DataPaths {
            teams: Some("no/such/teams.csv".into()),
            batters: Some("no/such/batters.csv".into()),
            pitchers: Some("no/such/pitchers.csv".into()),
        };
        let data = load_league(&paths);
        assert_eq!(data.roster_source, DataSource::BuiltIn);
        assert_eq!(data.projection_source, DataSource::BuiltIn);
    }

    #[test]
    fn unparseable_teams_file_falls_back() {
        let dir = std::env::temp_dir().join("roto_league_bad_teams");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let teams = dir.join("teams.csv");
        std::fs::write(&teams, "this,is,not\na,roster,file\n").unwrap();

        let paths = DataPaths {
            teams: Some(teams.display().to_string()),
            ..DataPaths::default()
        };
        let data = load_league(&paths);
        assert_eq!(data.roster_source, DataSource::BuiltIn);
        assert_eq!(data.rosters.len(), 12);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

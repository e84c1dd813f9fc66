// League rosters: which players each team carries.
//
// Roster source columns: team_name, player_name, position. Position codes
// SP, RP and P route a player to the pitcher list; every other code (C, 1B,
// OF, UTIL, ...) routes to the batter list.

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Which projection table a rostered player is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterRole {
    Batter,
    Pitcher,
}

impl RosterRole {
    /// Route a roster position code to a role.
    pub fn from_position_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "SP" | "RP" | "P" => RosterRole::Pitcher,
            _ => RosterRole::Batter,
        }
    }
}

/// One team's batters and pitchers, in the order they were listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRoster {
    pub batters: Vec<String>,
    pub pitchers: Vec<String>,
}

/// Every team in the league keyed by team name.
///
/// Held in a BTreeMap so team iteration is alphabetical, which is the
/// documented tie-break order for rankings.
#[derive(Debug, Clone, Default)]
pub struct LeagueRosters {
    teams: BTreeMap<String, TeamRoster>,
}

impl LeagueRosters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player to a team, creating the team on first sight.
    pub fn add_player(&mut self, team: &str, player: &str, role: RosterRole) {
        let roster = self.teams.entry(team.to_string()).or_default();
        match role {
            RosterRole::Batter => roster.batters.push(player.to_string()),
            RosterRole::Pitcher => roster.pitchers.push(player.to_string()),
        }
    }

    pub fn team(&self, name: &str) -> Option<&TeamRoster> {
        self.teams.get(name)
    }

    pub fn contains_team(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TeamRoster)> {
        self.teams.iter().map(|(name, roster)| (name.as_str(), roster))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Names of every player on any roster.
    pub fn rostered_players(&self) -> HashSet<&str> {
        self.teams
            .values()
            .flat_map(|r| r.batters.iter().chain(r.pitchers.iter()))
            .map(String::as_str)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// CSV loading
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRosterRow {
    #[serde(alias = "Team", alias = "team")]
    team_name: String,
    #[serde(alias = "Name", alias = "Player", alias = "player")]
    player_name: String,
    #[serde(alias = "POS", alias = "Position", alias = "pos")]
    position: String,
}

pub(crate) fn load_rosters_from_reader<R: Read>(rdr: R) -> Result<LeagueRosters, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rosters = LeagueRosters::new();
    for result in reader.deserialize::<RawRosterRow>() {
        match result {
            Ok(raw) => {
                let team = raw.team_name.trim();
                let player = raw.player_name.trim();
                if team.is_empty() || player.is_empty() {
                    warn!("skipping roster row with empty team or player name");
                    continue;
                }
                rosters.add_player(team, player, RosterRole::from_position_code(&raw.position));
            }
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
            }
        }
    }
    Ok(rosters)
}

/// Load league rosters from a CSV file.
pub fn load_rosters(path: &Path) -> Result<LeagueRosters, RosterError> {
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let rosters = load_rosters_from_reader(file).map_err(|e| RosterError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    if rosters.is_empty() {
        return Err(RosterError::Validation(format!(
            "roster CSV {} produced zero teams",
            path.display()
        )));
    }
    Ok(rosters)
}

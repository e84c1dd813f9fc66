// Player projection records and CSV loading.
//
// Batter source columns: player_name, AB, R, HR, RBI, SB, AVG, OPS.
// Pitcher source columns: player_name, IP, ERA, WHIP, K9, QS, SV.
// Column order does not matter and extra columns are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Projected season line for a batter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterProjection {
    pub name: String,
    pub ab: u32,
    pub r: u32,
    pub hr: u32,
    pub rbi: u32,
    pub sb: u32,
    pub avg: f64,
    pub ops: f64,
}

/// Projected season line for a pitcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitcherProjection {
    pub name: String,
    pub ip: f64,
    pub era: f64,
    pub whip: f64,
    pub k9: f64,
    pub qs: u32,
    pub sv: u32,
}

/// All projections for the league, keyed by player name.
///
/// Names are assumed unique across the league. BTreeMap keeps iteration
/// order stable for free-agent listings.
#[derive(Debug, Clone, Default)]
pub struct ProjectionStore {
    pub batters: BTreeMap<String, BatterProjection>,
    pub pitchers: BTreeMap<String, PitcherProjection>,
}

impl ProjectionStore {
    pub fn from_parts(batters: Vec<BatterProjection>, pitchers: Vec<PitcherProjection>) -> Self {
        let mut store = ProjectionStore::default();
        for b in batters {
            if store.batters.contains_key(&b.name) {
                warn!("duplicate batter projection for '{}', using latest row", b.name);
            }
            store.batters.insert(b.name.clone(), b);
        }
        for p in pitchers {
            if store.pitchers.contains_key(&p.name) {
                warn!("duplicate pitcher projection for '{}', using latest row", p.name);
            }
            store.pitchers.insert(p.name.clone(), p);
        }
        store
    }

    pub fn batter(&self, name: &str) -> Option<&BatterProjection> {
        self.batters.get(name)
    }

    pub fn pitcher(&self, name: &str) -> Option<&PitcherProjection> {
        self.pitchers.get(name)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
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
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Batter CSV row. Counting stats are read as f64 so fractional
/// projections (e.g. 31.6 HR) are accepted and rounded.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawBatter {
    #[serde(alias = "Name", alias = "name", alias = "Player")]
    player_name: String,
    AB: f64,
    R: f64,
    HR: f64,
    RBI: f64,
    SB: f64,
    #[serde(alias = "BA")]
    AVG: f64,
    OPS: f64,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPitcher {
    #[serde(alias = "Name", alias = "name", alias = "Player")]
    player_name: String,
    IP: f64,
    ERA: f64,
    WHIP: f64,
    #[serde(alias = "K/9")]
    K9: f64,
    QS: f64,
    #[serde(alias = "SVS")]
    SV: f64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns true if every value is finite and non-negative.
fn all_valid(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite() && *v >= 0.0)
}

fn count(v: f64) -> u32 {
    v.round() as u32
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

pub(crate) fn load_batters_from_reader<R: Read>(
    rdr: R,
) -> Result<Vec<BatterProjection>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut batters = Vec::new();
    for result in reader.deserialize::<RawBatter>() {
        match result {
            Ok(raw) => {
                let name = raw.player_name.trim();
                if name.is_empty() {
                    warn!("skipping batter row with empty player name");
                    continue;
                }
                if !all_valid(&[raw.AB, raw.R, raw.HR, raw.RBI, raw.SB, raw.AVG, raw.OPS]) {
                    warn!("skipping batter '{}': negative or non-finite value", name);
                    continue;
                }
                batters.push(BatterProjection {
                    name: name.to_string(),
                    ab: count(raw.AB),
                    r: count(raw.R),
                    hr: count(raw.HR),
                    rbi: count(raw.RBI),
                    sb: count(raw.SB),
                    avg: raw.AVG,
                    ops: raw.OPS,
                });
            }
            Err(e) => {
                warn!("skipping malformed batter row: {}", e);
            }
        }
    }
    Ok(batters)
}

pub(crate) fn load_pitchers_from_reader<R: Read>(
    rdr: R,
) -> Result<Vec<PitcherProjection>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut pitchers = Vec::new();
    for result in reader.deserialize::<RawPitcher>() {
        match result {
            Ok(raw) => {
                let name = raw.player_name.trim();
                if name.is_empty() {
                    warn!("skipping pitcher row with empty player name");
                    continue;
                }
                if !all_valid(&[raw.IP, raw.ERA, raw.WHIP, raw.K9, raw.QS, raw.SV]) {
                    warn!("skipping pitcher '{}': negative or non-finite value", name);
                    continue;
                }
                pitchers.push(PitcherProjection {
                    name: name.to_string(),
                    ip: raw.IP,
                    era: raw.ERA,
                    whip: raw.WHIP,
                    k9: raw.K9,
                    qs: count(raw.QS),
                    sv: count(raw.SV),
                });
            }
            Err(e) => {
                warn!("skipping malformed pitcher row: {}", e);
            }
        }
    }
    Ok(pitchers)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load batter projections from a CSV file.
pub fn load_batter_projections(path: &Path) -> Result<Vec<BatterProjection>, ProjectionError> {
    let file = std::fs::File::open(path).map_err(|e| ProjectionError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_batters_from_reader(file).map_err(|e| ProjectionError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load pitcher projections from a CSV file.
pub fn load_pitcher_projections(path: &Path) -> Result<Vec<PitcherProjection>, ProjectionError> {
    let file = std::fs::File::open(path).map_err(|e| ProjectionError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_pitchers_from_reader(file).map_err(|e| ProjectionError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load both projection files into a store.
///
/// Either file producing zero valid rows is a validation error, so the
/// caller can fall back to the built-in dataset as a unit.
pub fn load_store_from_paths(
    batters: &Path,
    pitchers: &Path,
) -> Result<ProjectionStore, ProjectionError> {
    let batters = load_batter_projections(batters)?;
    let pitchers = load_pitcher_projections(pitchers)?;

    if batters.is_empty() {
        return Err(ProjectionError::Validation(
            "batter CSV produced zero valid rows".into(),
        ));
    }
    if pitchers.is_empty() {
        return Err(ProjectionError::Validation(
            "pitcher CSV produced zero valid rows".into(),
        ));
    }

    Ok(ProjectionStore::from_parts(batters, pitchers))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Checks on the files shipped with the package: default config and the
// embedded sample league.

use std::path::Path;

use roto_analyzer::league::defaults::{default_projections, default_rosters};

fn package_path(rel: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(rel)
}

/// Verify that defaults/league.toml is valid TOML with the expected tables.
#[test]
fn default_league_toml_is_valid() {
    let content = std::fs::read_to_string(package_path("defaults/league.toml"))
        .expect("defaults/league.toml should exist");
    let parsed: toml::Value =
        toml::from_str(&content).expect("defaults/league.toml is not valid TOML");

    for table in ["league", "data_paths", "output", "free_agents"] {
        assert!(parsed.get(table).is_some(), "missing [{table}] table");
    }
    assert_eq!(parsed["league"]["my_team"].as_str(), Some("Kenny Kawaguchis"));
}

/// Verify that the embedded CSVs exist and parse into a full league.
#[test]
fn embedded_sample_league_parses() {
    for file in ["data/teams.csv", "data/batters.csv", "data/pitchers.csv"] {
        assert!(package_path(file).is_file(), "{file} should exist");
    }

    let rosters = default_rosters();
    assert_eq!(rosters.len(), 12);
    assert!(rosters.contains_team("Kenny Kawaguchis"));

    let store = default_projections();
    assert!(store.batters.len() > 150);
    assert!(store.pitchers.len() > 100);
}

/// Verify that all expected directories exist.
#[test]
fn directory_structure_exists() {
    let expected_dirs = [
        "src",
        "src/league",
        "src/stats",
        "src/analysis",
        "defaults",
        "data",
        "tests/fixtures",
    ];
    for dir in expected_dirs {
        assert!(package_path(dir).is_dir(), "directory {dir} should exist");
    }
}

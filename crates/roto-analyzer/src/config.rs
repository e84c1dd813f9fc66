// Configuration loading and parsing (config/league.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis::free_agents::{BatterWeights, PitcherWeights};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub league: LeagueConfig,
    #[serde(default)]
    pub data_paths: DataPaths,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub free_agents: FreeAgentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Team the per-team analysis is written for.
    pub my_team: String,
}

/// Optional CSV sources. `None` means use the built-in data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub teams: Option<String>,
    pub batters: Option<String>,
    pub pitchers: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub reports_dir: String,
    pub visuals_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            reports_dir: "reports".into(),
            visuals_dir: "visuals".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FreeAgentConfig {
    /// Rows per table in the free-agent report.
    pub num_players: usize,
    pub batter_weights: BatterWeights,
    pub pitcher_weights: PitcherWeights,
}

impl Default for FreeAgentConfig {
    fn default() -> Self {
        FreeAgentConfig {
            num_players: 25,
            batter_weights: BatterWeights::default(),
            pitcher_weights: PitcherWeights::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

const CONFIG_FILE: &str = "league.toml";

/// Load and validate `config/league.toml` relative to `base_dir`.
///
/// Does not copy defaults; see [`load_config_at`].
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/league.toml` to `config/league.toml` unless the latter
/// already exists. Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither defaults/{CONFIG_FILE} nor config/{CONFIG_FILE} found in {}; \
                 run from the project root or pass --config-dir",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    Ok(Some(target))
}

/// Copy the default config into `base_dir/config/` if missing, then load.
pub fn load_config_at(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_file(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check field constraints. Also run after command-line overrides.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.my_team.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.my_team".into(),
            message: "must not be empty".into(),
        });
    }

    if config.free_agents.num_players == 0 {
        return Err(ConfigError::ValidationError {
            field: "free_agents.num_players".into(),
            message: "must be greater than 0".into(),
        });
    }

    let fa = &config.free_agents;
    let weights = fa
        .batter_weights
        .named()
        .into_iter()
        .map(|(name, w)| ("batter_weights", name, w))
        .chain(
            fa.pitcher_weights
                .named()
                .into_iter()
                .map(|(name, w)| ("pitcher_weights", name, w)),
        );
    for (table, name, val) in weights {
        if !val.is_finite() || val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: format!("free_agents.{table}.{name}"),
                message: format!("must be a finite number >= 0, got {val}"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Helper: returns the path to the roto-analyzer package root
    /// (works whether `cargo test` runs from the crate root or repo root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("crates/roto-analyzer/defaults").exists() {
            cwd.join("crates/roto-analyzer")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    fn write_config(name: &str, league_toml: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/league.toml"), league_toml).unwrap();
        tmp
    }

    #[test]
    fn load_valid_config_from_project_defaults() {
        let tmp = std::env::temp_dir().join("roto_config_test_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::copy(
            project_root().join("defaults/league.toml"),
            tmp.join("config/league.toml"),
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("defaults should load");
        assert_eq!(config.league.id, "2874");
        assert_eq!(config.league.my_team, "Kenny Kawaguchis");
        assert!(config.data_paths.teams.is_none());
        assert_eq!(config.output.reports_dir, "reports");
        assert_eq!(config.output.visuals_dir, "visuals");
        assert_eq!(config.free_agents.num_players, 25);
        assert_eq!(config.free_agents.batter_weights, BatterWeights::default());
        assert_eq!(config.free_agents.pitcher_weights, PitcherWeights::default());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn minimal_config_uses_section_defaults() {
        let tmp = write_config(
            "roto_config_test_minimal",
            "[league]\nmy_team = \"Mine\"\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.league.my_team, "Mine");
        assert_eq!(config.output.reports_dir, "reports");
        assert_eq!(config.free_agents.num_players, 25);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn data_paths_parse() {
        let tmp = write_config(
            "roto_config_test_paths",
            "[league]\nmy_team = \"Mine\"\n\n[data_paths]\nteams = \"t.csv\"\nbatters = \"b.csv\"\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.data_paths.teams.as_deref(), Some("t.csv"));
        assert_eq!(config.data_paths.batters.as_deref(), Some("b.csv"));
        assert!(config.data_paths.pitchers.is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_team() {
        let tmp = write_config("roto_config_test_empty_team", "[league]\nmy_team = \"  \"\n");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "league.my_team"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_num_players() {
        let tmp = write_config(
            "roto_config_test_zero_players",
            "[league]\nmy_team = \"Mine\"\n\n[free_agents]\nnum_players = 0\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "free_agents.num_players")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_negative_weight() {
        let tmp = write_config(
            "roto_config_test_negative_weight",
            "[league]\nmy_team = \"Mine\"\n\n[free_agents.pitcher_weights]\nSV = -1.0\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "free_agents.pitcher_weights.SV")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = std::env::temp_dir().join("roto_config_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("league.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = write_config("roto_config_test_invalid", "this is not valid [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("league.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_copies_default_once() {
        let tmp = std::env::temp_dir().join("roto_config_test_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(
            project_root().join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_file(&tmp).expect("should succeed");
        assert_eq!(copied, Some(tmp.join("config/league.toml")));
        assert!(load_config_from(&tmp).is_ok());

        // Second run copies nothing and keeps edits.
        fs::write(tmp.join("config/league.toml"), "# custom\n").unwrap();
        let copied = ensure_config_file(&tmp).unwrap();
        assert!(copied.is_none());
        let content = fs::read_to_string(tmp.join("config/league.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn existing_config_needs_no_defaults() {
        let tmp = write_config("roto_config_test_no_defaults", "[league]\nmy_team = \"Aces\"\n");

        assert!(ensure_config_file(&tmp).unwrap().is_none());
        let config = load_config_at(&tmp).unwrap();
        assert_eq!(config.league.my_team, "Aces");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_errors_when_both_missing() {
        let tmp = std::env::temp_dir().join("roto_config_test_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_file(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/league.toml nor config/league.toml"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}

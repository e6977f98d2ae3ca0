use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "money-tracker";
const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "money.db";
const LOG_FILE: &str = "money-tracker.log";

/// Environment override for the database location.
pub const DB_ENV_VAR: &str = "MONEY_TRACKER_DB";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    /// chrono format string for entry timestamps
    pub date_format: String,
    /// Places shown for amounts; storage stays exact
    pub decimal_places: u32,
    /// Categories listed in the overview even before they have entries
    pub categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            date_format: "%Y-%m-%d %H:%M".into(),
            decimal_places: 2,
            categories: vec!["Food".into(), "Transport".into(), "Leisure".into()],
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when no
    /// file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        match config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Database path with precedence: explicit flag, environment, config
    /// file, platform data directory, current directory.
    pub fn resolve_database_path(&self, flag: Option<&Path>) -> PathBuf {
        self.resolve_database_path_with(flag, env::var_os(DB_ENV_VAR))
    }

    /// Same as `resolve_database_path` with the environment value passed in.
    /// An empty value counts as unset.
    pub fn resolve_database_path_with(
        &self,
        flag: Option<&Path>,
        env_value: Option<OsString>,
    ) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        if let Some(path) = env_value.filter(|v| !v.is_empty()) {
            return PathBuf::from(path);
        }
        if let Some(path) = &self.database_path {
            return path.clone();
        }
        data_dir()
            .map(|dir| dir.join(DATABASE_FILE))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
    }
}

pub fn config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

pub fn log_file() -> PathBuf {
    data_dir()
        .map(|dir| dir.join(LOG_FILE))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.decimal_places, 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join(CONFIG_FILE);

        let config = Config {
            database_path: Some(PathBuf::from("/tmp/ledger.db")),
            date_format: "%d.%m.%Y".into(),
            decimal_places: 3,
            categories: vec!["Coffee".into()],
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "decimal_places": 0 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.decimal_places, 0);
        assert_eq!(config.date_format, Config::default().date_format);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::Serde(_))));
    }

    #[test]
    fn test_flag_wins_over_config() {
        let config = Config {
            database_path: Some(PathBuf::from("from-config.db")),
            ..Config::default()
        };
        let resolved = config.resolve_database_path(Some(Path::new("from-flag.db")));
        assert_eq!(resolved, PathBuf::from("from-flag.db"));
    }

    #[test]
    fn test_env_wins_over_config() {
        let config = Config {
            database_path: Some(PathBuf::from("from-config.db")),
            ..Config::default()
        };

        let resolved = config.resolve_database_path_with(None, Some("from-env.db".into()));
        assert_eq!(resolved, PathBuf::from("from-env.db"));

        let resolved = config
            .resolve_database_path_with(Some(Path::new("from-flag.db")), Some("from-env.db".into()));
        assert_eq!(resolved, PathBuf::from("from-flag.db"));
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let config = Config {
            database_path: Some(PathBuf::from("from-config.db")),
            ..Config::default()
        };
        let resolved = config.resolve_database_path_with(None, Some(OsString::new()));
        assert_eq!(resolved, PathBuf::from("from-config.db"));
    }

    #[test]
    fn test_falls_back_to_data_dir() {
        let resolved = Config::default().resolve_database_path_with(None, None);

        assert_eq!(resolved.file_name().unwrap(), DATABASE_FILE);
        if let Some(dir) = data_dir() {
            assert_eq!(resolved, dir.join(DATABASE_FILE));
        }
    }
}

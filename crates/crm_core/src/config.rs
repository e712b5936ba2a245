//! Core configuration and the composition root built from it.
//!
//! # Responsibility
//! - Describe where snapshots and logs live and whether to seed.
//! - Load that description from an optional TOML file plus `CRM_*`
//!   environment overrides.
//! - Open a ready-to-use [`Database`] from that description.

use crate::db::{Database, DbError};
use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::repo::RepoError;
use crate::seed::{seed_contacts, SeedOutcome};
use crate::store::{FileSnapshotStore, DEFAULT_SNAPSHOT_KEY};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "CRM_DATA_DIR";
pub const ENV_SNAPSHOT_KEY: &str = "CRM_SNAPSHOT_KEY";
pub const ENV_SEED_ON_START: &str = "CRM_SEED_ON_START";
pub const ENV_LOG_LEVEL: &str = "CRM_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CRM_LOG_DIR";
pub const ENV_CONFIG_FILE: &str = "CRM_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CoreConfig {
    /// Directory holding the snapshot blob.
    pub data_dir: PathBuf,
    pub snapshot_key: String,
    /// Seed fixture contacts into an empty database on open.
    pub seed_on_start: bool,
    pub log_level: String,
    /// File logging is skipped when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            seed_on_start: true,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by any `CRM_*` environment variables that are set.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Reads a TOML config file; keys it omits keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File values (when `path` is given) overridden by `CRM_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies overrides looked up by environment-variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_SNAPSHOT_KEY) {
            self.snapshot_key = value;
        }
        if let Some(value) = lookup(ENV_SEED_ON_START) {
            self.seed_on_start = parse_flag(&value).unwrap_or(self.seed_on_start);
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }
        self
    }

    pub fn snapshot_store(&self) -> FileSnapshotStore {
        FileSnapshotStore::new(&self.data_dir, &self.snapshot_key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("seeding failed: {0}")]
    Seed(#[from] RepoError),
}

/// An opened database plus what seeding did, if it ran.
pub struct Bootstrapped {
    pub db: Database,
    pub seed: Option<SeedOutcome>,
}

/// Starts logging, initializes the database and seeds it when configured.
pub fn open_database(config: &CoreConfig) -> Result<Bootstrapped, BootstrapError> {
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, log_dir)?;
    }

    let db = Database::new(config.snapshot_store());
    db.initialize()?;

    let seed = if config.seed_on_start {
        Some(seed_contacts(&db)?)
    } else {
        None
    };

    Ok(Bootstrapped { db, seed })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{open_database, ConfigError, CoreConfig, ENV_DATA_DIR, ENV_SEED_ON_START};
    use crate::repo::Repository;
    use crate::seed::{fixture_contacts, SeedOutcome};
    use std::collections::HashMap;

    #[test]
    fn overrides_replace_defaults() {
        let env = HashMap::from([
            (ENV_DATA_DIR, "/var/lib/crm"),
            (ENV_SEED_ON_START, "off"),
        ]);
        let config = CoreConfig::default()
            .with_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.data_dir.to_str(), Some("/var/lib/crm"));
        assert!(!config.seed_on_start);
        assert_eq!(config.snapshot_key, "sqliteDb");
    }

    #[test]
    fn unparseable_flag_keeps_default() {
        let config = CoreConfig::default()
            .with_overrides(|key| (key == ENV_SEED_ON_START).then(|| "maybe".to_string()));
        assert!(config.seed_on_start);
    }

    #[test]
    fn open_database_seeds_once_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig {
            data_dir: dir.path().to_path_buf(),
            ..CoreConfig::default()
        };

        let first = open_database(&config).unwrap();
        assert_eq!(
            first.seed,
            Some(SeedOutcome::Seeded {
                inserted: fixture_contacts().len()
            })
        );
        drop(first);

        let second = open_database(&config).unwrap();
        assert!(matches!(second.seed, Some(SeedOutcome::Skipped { .. })));
        assert_eq!(
            second.db.contacts().count().unwrap(),
            fixture_contacts().len() as u64
        );
    }

    #[test]
    fn config_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.toml");
        std::fs::write(&path, "data_dir = \"/srv/crm\"\nseed_on_start = false\n").unwrap();

        let config = CoreConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir.to_str(), Some("/srv/crm"));
        assert_eq!(config.snapshot_key, "sqliteDb");
        assert!(!config.seed_on_start);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn bad_config_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.toml");
        std::fs::write(&path, "seed_on_start = \"sometimes\"").unwrap();

        assert!(matches!(
            CoreConfig::from_file(&path),
            Err(ConfigError::Parse { path: reported, .. }) if reported == path
        ));
        assert!(matches!(
            CoreConfig::from_file(dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}

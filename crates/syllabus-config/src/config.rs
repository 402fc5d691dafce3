use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::file_format::FileFormat;

/// Environment variable that overrides [`SyllabusConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "SYLLABUS_DATABASE_URL";

/// Default database: a SQLite file next to `syllabus.json`, created on first use.
pub fn default_database_url() -> String {
    "sqlite://syllabus.db?mode=rwc".to_string()
}

/// Connection pool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PoolConfig {
    /// Upper bound on pooled connections.
    /// Default: `5`
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    8
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Top-level syllabus configuration, stored as `syllabus.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SyllabusConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    pub fixtures_dir: PathBuf,
    /// Directory backing the filesystem blob store.
    pub blob_dir: PathBuf,
    #[serde(default)]
    pub fixture_format: FileFormat,
    #[serde(default)]
    pub pool: PoolConfig,
}

impl Default for SyllabusConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            fixtures_dir: PathBuf::from("fixtures"),
            blob_dir: PathBuf::from("blobs"),
            fixture_format: FileFormat::Json,
            pool: PoolConfig::default(),
        }
    }
}

impl SyllabusConfig {
    /// Connection string handed to the database driver.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Path where fixture snapshots are stored.
    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }

    /// Path where uploaded blobs are stored.
    pub fn blob_dir(&self) -> &Path {
        &self.blob_dir
    }

    /// Preferred file format for new fixtures.
    pub fn fixture_format(&self) -> FileFormat {
        self.fixture_format
    }

    /// Connection pool settings.
    pub fn pool(&self) -> &PoolConfig {
        &self.pool
    }

    /// Replace the database URL when `url` is set and non-empty.
    pub fn with_database_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.database_url = url;
        }
        self
    }

    /// Resolve relative directories against `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        if self.fixtures_dir.is_relative() {
            self.fixtures_dir = root.join(&self.fixtures_dir);
        }
        if self.blob_dir.is_relative() {
            self.blob_dir = root.join(&self.blob_dir);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllabus_config_default() {
        let config = SyllabusConfig::default();

        assert_eq!(config.database_url, "sqlite://syllabus.db?mode=rwc");
        assert_eq!(config.fixtures_dir, PathBuf::from("fixtures"));
        assert_eq!(config.blob_dir, PathBuf::from("blobs"));
        assert_eq!(config.fixture_format, FileFormat::Json);
        assert_eq!(config.pool.max_connections, 5);
        assert_eq!(config.pool.min_connections, 1);
        assert_eq!(config.pool.connect_timeout_secs, 8);
    }

    #[test]
    fn test_syllabus_config_parses_camel_case_with_defaults() {
        let json = r#"{ "fixturesDir": "seed", "blobDir": "media", "pool": { "maxConnections": 2 } }"#;
        let config: SyllabusConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.database_url, default_database_url());
        assert_eq!(config.fixtures_dir, PathBuf::from("seed"));
        assert_eq!(config.pool.max_connections, 2);
        assert_eq!(config.pool.min_connections, 1);
    }

    #[test]
    fn test_database_url_override() {
        let config = SyllabusConfig::default()
            .with_database_url_override(Some("sqlite::memory:".to_string()));
        assert_eq!(config.database_url(), "sqlite::memory:");

        let config = SyllabusConfig::default().with_database_url_override(Some("  ".into()));
        assert_eq!(config.database_url(), default_database_url());

        let config = SyllabusConfig::default().with_database_url_override(None);
        assert_eq!(config.database_url(), default_database_url());
    }

    #[test]
    fn test_rooted_at_keeps_absolute_paths() {
        let config = SyllabusConfig {
            blob_dir: PathBuf::from("/var/blobs"),
            ..Default::default()
        }
        .rooted_at(Path::new("/srv/app"));

        assert_eq!(config.fixtures_dir(), Path::new("/srv/app/fixtures"));
        assert_eq!(config.blob_dir(), Path::new("/var/blobs"));
    }
}

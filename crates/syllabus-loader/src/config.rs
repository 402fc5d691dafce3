use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use syllabus_config::{DATABASE_URL_ENV, SyllabusConfig};

pub const CONFIG_FILE: &str = "syllabus.json";

fn read_config(path: &PathBuf) -> Result<SyllabusConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: SyllabusConfig =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(with_env(config))
}

/// `SYLLABUS_DATABASE_URL` wins over the file.
fn with_env(config: SyllabusConfig) -> SyllabusConfig {
    config.with_database_url_override(std::env::var(DATABASE_URL_ENV).ok())
}

/// Load syllabus.json from the current directory.
pub fn load_config() -> Result<SyllabusConfig> {
    let path = PathBuf::from(CONFIG_FILE);
    if !path.exists() {
        anyhow::bail!("{CONFIG_FILE} not found. Run 'syllabus init' first.");
    }
    read_config(&path)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<SyllabusConfig> {
    if !path.exists() {
        anyhow::bail!("{CONFIG_FILE} not found at: {}", path.display());
    }
    read_config(&path)
}

/// Load config from project root, with fallback to defaults.
pub fn load_config_or_default(project_root: Option<PathBuf>) -> Result<SyllabusConfig> {
    let config_path = match project_root {
        Some(root) => root.join(CONFIG_FILE),
        None => PathBuf::from(CONFIG_FILE),
    };

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        Ok(with_env(SyllabusConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    struct CwdGuard {
        original: PathBuf,
    }

    impl CwdGuard {
        fn new(dir: &std::path::Path) -> Self {
            let original = std::env::current_dir().unwrap();
            std::env::set_current_dir(dir).unwrap();
            Self { original }
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.original);
        }
    }

    struct EnvGuard;

    impl EnvGuard {
        fn set(value: &str) -> Self {
            unsafe { std::env::set_var(DATABASE_URL_ENV, value) };
            Self
        }

        fn clear() -> Self {
            unsafe { std::env::remove_var(DATABASE_URL_ENV) };
            Self
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            unsafe { std::env::remove_var(DATABASE_URL_ENV) };
        }
    }

    fn write_config(config: &SyllabusConfig) {
        fs::write(CONFIG_FILE, serde_json::to_string_pretty(config).unwrap()).unwrap();
    }

    #[test]
    #[serial]
    fn load_config_requires_file() {
        let tmp = tempdir().unwrap();
        let _cwd = CwdGuard::new(tmp.path());
        let _env = EnvGuard::clear();

        let err = load_config().unwrap_err();
        assert!(err.to_string().contains("syllabus init"));
    }

    #[test]
    #[serial]
    fn load_config_reads_file() {
        let tmp = tempdir().unwrap();
        let _cwd = CwdGuard::new(tmp.path());
        let _env = EnvGuard::clear();

        let config = SyllabusConfig {
            database_url: "sqlite://course.db?mode=rwc".into(),
            ..Default::default()
        };
        write_config(&config);

        assert_eq!(load_config().unwrap(), config);
    }

    #[test]
    #[serial]
    fn env_overrides_database_url() {
        let tmp = tempdir().unwrap();
        let _cwd = CwdGuard::new(tmp.path());
        let _env = EnvGuard::set("sqlite::memory:");
        write_config(&SyllabusConfig::default());

        assert_eq!(load_config().unwrap().database_url(), "sqlite::memory:");
        assert_eq!(
            load_config_or_default(Some(PathBuf::from("missing"))).unwrap().database_url(),
            "sqlite::memory:"
        );
    }

    #[test]
    #[serial]
    fn load_config_or_default_falls_back() {
        let tmp = tempdir().unwrap();
        let _env = EnvGuard::clear();

        let config = load_config_or_default(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(config, SyllabusConfig::default());
    }

    #[test]
    #[serial]
    fn load_config_from_path_reports_missing_and_invalid_files() {
        let tmp = tempdir().unwrap();
        let _env = EnvGuard::clear();
        let path = tmp.path().join(CONFIG_FILE);

        let err = load_config_from_path(path.clone()).unwrap_err();
        assert!(err.to_string().contains("not found at"));

        fs::write(&path, "{ not json").unwrap();
        let err = load_config_from_path(path).unwrap_err();
        assert!(err.to_string().starts_with("parse "), "{err}");
    }
}

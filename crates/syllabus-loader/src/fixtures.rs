use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use syllabus_config::{FileFormat, SyllabusConfig};
use syllabus_core::{Snapshot, validate_snapshot};

/// Load every fixture under the configured fixtures directory (recursively),
/// merged, normalized and validated.
pub fn load_fixtures(config: &SyllabusConfig) -> Result<Snapshot> {
    load_fixtures_from_dir(config.fixtures_dir())
}

/// Load fixtures from `dir`. A missing directory is an empty snapshot.
pub fn load_fixtures_from_dir(dir: &Path) -> Result<Snapshot> {
    if !dir.exists() {
        return Ok(Snapshot::default());
    }

    let mut files = Vec::new();
    collect_fixture_files(dir, &mut files)?;
    // Merge order must not depend on directory iteration order.
    files.sort();

    let mut snapshot = Snapshot::default();
    for path in &files {
        snapshot.merge(load_snapshot_file(path)?);
    }

    let normalized = snapshot.normalize();
    validate_snapshot(&normalized)
        .map_err(|e| anyhow::anyhow!("fixture validation failed: {}", e))?;
    Ok(normalized)
}

fn collect_fixture_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read fixtures directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry.context("read directory entry")?;
        let path = entry.path();

        if path.is_dir() {
            collect_fixture_files(&path, files)?;
            continue;
        }

        let ext = path.extension().and_then(|s| s.to_str());
        if path.is_file() && ext.and_then(FileFormat::from_extension).is_some() {
            files.push(path);
        }
    }

    Ok(())
}

/// Parse one fixture file, picking the format from its extension.
pub fn load_snapshot_file(path: &Path) -> Result<Snapshot> {
    let format = path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(FileFormat::from_extension)
        .with_context(|| format!("unsupported fixture file: {}", path.display()))?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("read fixture file: {}", path.display()))?;

    let snapshot = if format.is_json() {
        serde_json::from_str(&content)
            .with_context(|| format!("parse JSON fixture: {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("parse YAML fixture: {}", path.display()))?
    };
    Ok(snapshot)
}

/// Write a snapshot in `format`, creating parent directories.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot, format: FileFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory: {}", parent.display()))?;
    }
    let text = if format.is_json() {
        serde_json::to_string_pretty(snapshot).context("serialize snapshot to JSON")?
    } else {
        serde_yaml::to_string(snapshot).context("serialize snapshot to YAML")?
    };
    fs::write(path, text).with_context(|| format!("write fixture file: {}", path.display()))?;
    Ok(())
}

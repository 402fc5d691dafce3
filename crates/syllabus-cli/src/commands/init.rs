use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use syllabus_config::SyllabusConfig;
use syllabus_loader::CONFIG_FILE;

pub fn cmd_init() -> Result<()> {
    let config = init_in(Path::new("."))?;
    println!("{} {}", "Created".bright_green(), CONFIG_FILE.bright_white());
    println!("  {} {}", "Database:".cyan(), config.database_url());
    println!("  {} {}", "Fixtures:".cyan(), config.fixtures_dir().display());
    println!("  {} {}", "Blobs:".cyan(), config.blob_dir().display());
    Ok(())
}

/// Write the default config under `root` and create its fixture and blob
/// directories. An existing config is never overwritten.
fn init_in(root: &Path) -> Result<SyllabusConfig> {
    let path = root.join(CONFIG_FILE);
    if path.exists() {
        bail!("{CONFIG_FILE} already exists");
    }

    let config = SyllabusConfig::default();
    let json = serde_json::to_string_pretty(&config).context("serialize default config")?;
    fs::write(&path, json).with_context(|| format!("write {CONFIG_FILE}"))?;

    let rooted = config.clone().rooted_at(root);
    for dir in [rooted.fixtures_dir(), rooted.blob_dir()] {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    Ok(config)
}

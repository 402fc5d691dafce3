use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use syllabus_core::{Actor, Permission};
use syllabus_loader::{load_fixtures, load_fixtures_from_dir};

use crate::utils::open_catalog;

pub async fn cmd_seed(actor: &Actor, dir: Option<PathBuf>) -> Result<()> {
    actor.require(Permission::ManageCourse)?;
    let (config, catalog) = open_catalog().await?;

    let snapshot = match &dir {
        Some(dir) => load_fixtures_from_dir(dir)?,
        None => load_fixtures(&config)?,
    };
    if snapshot.is_empty() {
        let dir = dir.as_deref().unwrap_or(config.fixtures_dir());
        println!("{} {}", "No fixtures found in".yellow(), dir.display());
        return Ok(());
    }

    let report = catalog.seed(&snapshot).await.context("seed catalog")?;
    println!("{} {}", "Seeded".bright_green().bold(), report);
    Ok(())
}

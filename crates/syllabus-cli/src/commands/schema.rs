use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use schemars::schema_for;
use syllabus_core::Snapshot;

pub fn cmd_schema(out: Option<PathBuf>) -> Result<()> {
    let schema = schema_for!(Snapshot);
    let json = serde_json::to_string_pretty(&schema).context("serialize snapshot schema")?;

    match out {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

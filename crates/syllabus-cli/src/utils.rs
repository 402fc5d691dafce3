use std::path::Path;

use anyhow::{Context, Result};
use syllabus_config::SyllabusConfig;
use syllabus_store::Catalog;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use syllabus_loader::load_config;

const DEFAULT_FILTER: &str = "warn,syllabus_store=info";
const VERBOSE_FILTER: &str = "info,syllabus_store=debug";

/// Log to stderr; `RUST_LOG` wins over the built-in filters.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Load syllabus.json and connect to the configured database.
pub async fn open_catalog() -> Result<(SyllabusConfig, Catalog)> {
    let config = load_config()?;
    let catalog = Catalog::open(&config)
        .await
        .with_context(|| format!("connect to {}", config.database_url()))?;
    Ok((config, catalog))
}

/// Media type for a file, from its extension.
pub fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("txt") | Some("md") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        _ => "application/octet-stream",
    }
}

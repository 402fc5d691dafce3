use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use syllabus_core::{
    Actor, BlobRef, ContentBinding, ContentKind, FileBody, ImageBody, Payload, Permission, TextBody,
    VideoBody,
};
use syllabus_naming::{counted, human_size};

use crate::utils::{guess_media_type, open_catalog};

pub async fn cmd_add_text(
    actor: &Actor,
    title: String,
    body: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    actor.require(Permission::ManageContent)?;
    let body = match (body, file) {
        (Some(body), _) => body,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("read text body: {}", path.display()))?,
        (None, None) => String::new(),
    };

    let (_, catalog) = open_catalog().await?;
    let binding = catalog
        .content()
        .create(&actor.user_id, Payload::Text(TextBody { title, body }))
        .await?;
    print_created(binding);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_add_blob(
    actor: &Actor,
    kind: ContentKind,
    path: PathBuf,
    title: Option<String>,
    media_type: Option<String>,
    alt: Option<String>,
    duration: Option<u32>,
) -> Result<()> {
    actor.require(Permission::ManageContent)?;
    let build: fn(String, BlobRef, Option<String>, Option<u32>) -> Payload = match kind {
        ContentKind::File => |title, blob, _, _| Payload::File(FileBody { title, blob }),
        ContentKind::Image => |title, blob, alt_text, _| {
            Payload::Image(ImageBody {
                title,
                blob,
                alt_text,
            })
        },
        ContentKind::Video => |title, blob, _, duration_secs| {
            Payload::Video(VideoBody {
                title,
                blob,
                duration_secs,
            })
        },
        ContentKind::Text => bail!("text content has no blob; use add-text"),
    };

    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    let title = match title {
        Some(title) => title,
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string(),
    };
    let media_type = media_type.unwrap_or_else(|| guess_media_type(&path).to_string());

    let (_, catalog) = open_catalog().await?;
    let blob = catalog.content().store_blob(&bytes, &media_type)?;
    let size = human_size(blob.size);
    let binding = catalog
        .content()
        .create(&actor.user_id, build(title, blob, alt, duration))
        .await?;
    print_created(binding);
    println!("  {} {} ({})", "Stored".cyan(), media_type, size);
    Ok(())
}

pub async fn cmd_delete_content(actor: &Actor, binding: ContentBinding) -> Result<()> {
    actor.require(Permission::ManageContent)?;
    let (_, catalog) = open_catalog().await?;
    let removal = catalog.content().delete(binding).await?;
    println!(
        "{} {} ({} unbound)",
        "Deleted content".bright_red(),
        binding.to_string().bright_white(),
        counted(removal.items_removed as usize, "item")
    );
    Ok(())
}

fn print_created(binding: ContentBinding) {
    println!(
        "{} {}",
        "Created content".bright_green(),
        binding.to_string().bright_white()
    );
}

use anyhow::Result;
use colored::Colorize;
use syllabus_core::{Actor, ContentBinding, NewModule, Permission};
use syllabus_naming::counted;

use crate::utils::open_catalog;

pub async fn cmd_add_module(
    actor: &Actor,
    course_slug: &str,
    title: String,
    description: String,
    order: Option<i32>,
) -> Result<()> {
    actor.require(Permission::ManageModule)?;
    let (_, catalog) = open_catalog().await?;
    let course = catalog.course_by_slug(course_slug).await?;

    let mut new = NewModule::new(title).with_description(description);
    if let Some(order) = order {
        new = new.at(order);
    }
    let module = catalog.add_module(course.id, new).await?;
    println!(
        "{} {} {} (id {}, order {})",
        "Added module".bright_green(),
        module.title.bright_white(),
        format!("to {}", course.slug).bright_black(),
        module.id,
        module.order
    );
    Ok(())
}

pub async fn cmd_attach(
    actor: &Actor,
    module_id: i32,
    binding: ContentBinding,
    order: Option<i32>,
) -> Result<()> {
    actor.require(Permission::ManageModule)?;
    let (_, catalog) = open_catalog().await?;
    let item = catalog.add_item(module_id, binding, order).await?;
    println!(
        "{} {} {} (item {}, order {})",
        "Attached".bright_green(),
        binding.to_string().bright_white(),
        format!("to module {module_id}").bright_black(),
        item.id,
        item.order
    );
    Ok(())
}

pub async fn cmd_delete_module(actor: &Actor, id: i32) -> Result<()> {
    actor.require(Permission::ManageModule)?;
    let (_, catalog) = open_catalog().await?;
    let removal = catalog.delete_module(id).await?;
    println!(
        "{} {} ({})",
        "Deleted module".bright_red(),
        id,
        counted(removal.items_removed as usize, "item")
    );
    Ok(())
}

pub async fn cmd_delete_item(actor: &Actor, id: i32) -> Result<()> {
    actor.require(Permission::ManageModule)?;
    let (_, catalog) = open_catalog().await?;
    let item = catalog.delete_item(id).await?;
    println!(
        "{} {} {}",
        "Deleted item".bright_red(),
        id,
        format!("({} from module {})", item.binding, item.module_id).bright_black()
    );
    Ok(())
}

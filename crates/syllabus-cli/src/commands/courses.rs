use anyhow::{Context, Result};
use chrono::SecondsFormat;
use colored::Colorize;
use syllabus_core::{Actor, CourseFilter, CourseOutline, NewCourse, Permission};
use syllabus_naming::counted;

use crate::utils::open_catalog;

pub async fn cmd_courses(actor: &Actor, all: bool) -> Result<()> {
    actor.require(Permission::ViewCourse)?;
    let (_, catalog) = open_catalog().await?;
    let filter = if all { CourseFilter::All } else { CourseFilter::Active };
    let courses = catalog.list_courses(filter).await?;

    println!(
        "{} {}",
        "Courses:".bright_cyan().bold(),
        courses.len().to_string().bright_yellow()
    );
    for course in &courses {
        let modules = catalog.ordered_modules(course.id).count(catalog.db()).await?;
        let status = if course.is_active { "" } else { " [inactive]" };
        println!(
            "  {} {} {} ({}, {}){}",
            course.slug.bright_white(),
            "-".bright_black(),
            course.title,
            counted(modules as usize, "module"),
            course.owner_id.cyan(),
            status.yellow()
        );
    }
    Ok(())
}

pub async fn cmd_show(actor: &Actor, slug: &str, json: bool) -> Result<()> {
    actor.require(Permission::ViewCourse)?;
    let (_, catalog) = open_catalog().await?;
    let course = catalog.course_by_slug(slug).await?;
    let outline = catalog.outline(course.id).await?;

    if json {
        let text = serde_json::to_string_pretty(&outline).context("serialize outline")?;
        println!("{text}");
    } else {
        print_outline(&outline);
    }
    Ok(())
}

fn print_outline(outline: &CourseOutline) {
    let course = &outline.course;
    println!("{} {}", course.title.bright_cyan().bold(), format!("({})", course.slug).bright_black());
    println!(
        "  {} {}",
        "Owner:".cyan(),
        course.owner_id.bright_white()
    );
    println!(
        "  {} {}",
        "Created:".cyan(),
        course
            .created_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .bright_white()
    );
    println!(
        "  {} {}",
        "Updated:".cyan(),
        course
            .updated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .bright_white()
    );
    if !course.is_active {
        println!("  {}", "Inactive".yellow());
    }
    if !course.description.is_empty() {
        println!("  {}", course.description);
    }
    println!(
        "  {} {}",
        counted(outline.modules.len(), "module").bright_yellow(),
        counted(outline.item_count(), "item").bright_yellow()
    );
    println!();

    for module in &outline.modules {
        println!(
            "  {} {} {}",
            format!("{:>3}.", module.module.order).bright_magenta(),
            module.module.title.bold(),
            format!("[module {}]", module.module.id).bright_black()
        );
        if module.items.is_empty() {
            println!("       {}", "(empty)".bright_black());
        }
        for (item, rendered) in &module.items {
            println!(
                "       {} {} {}",
                format!("{:>3}.", item.order).magenta(),
                rendered,
                format!("[item {}, {}]", item.id, item.binding).bright_black()
            );
        }
    }
}

pub async fn cmd_new_course(
    actor: &Actor,
    title: String,
    slug: Option<String>,
    description: String,
) -> Result<()> {
    actor.require(Permission::ManageCourse)?;
    let (_, catalog) = open_catalog().await?;

    let mut new = NewCourse::new(title, actor.user_id.clone()).with_description(description);
    if let Some(slug) = slug {
        new = new.with_slug(slug);
    }
    let course = catalog.create_course(new).await?;
    println!(
        "{} {} ({})",
        "Created course".bright_green(),
        course.slug.bright_white(),
        course.id
    );
    Ok(())
}

pub async fn cmd_set_active(actor: &Actor, slug: &str, active: bool) -> Result<()> {
    actor.require(Permission::ManageCourse)?;
    let (_, catalog) = open_catalog().await?;
    let course = catalog.course_by_slug(slug).await?;
    let course = catalog.set_course_active(course.id, active).await?;

    let label = if course.is_active { "Activated" } else { "Deactivated" };
    println!("{} {}", label.bright_green(), course.slug.bright_white());
    Ok(())
}

pub async fn cmd_delete_course(actor: &Actor, slug: &str) -> Result<()> {
    actor.require(Permission::ManageCourse)?;
    let (_, catalog) = open_catalog().await?;
    let course = catalog.course_by_slug(slug).await?;
    let removal = catalog.delete_course(course.id).await?;

    println!(
        "{} {} ({}, {})",
        "Deleted course".bright_red(),
        slug.bright_white(),
        counted(removal.modules_removed as usize, "module"),
        counted(removal.items_removed as usize, "item")
    );
    Ok(())
}

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::snapshot::{ContentFixture, CourseFixture, Snapshot};

pub fn validate_title(entity: &'static str, title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle(entity));
    }
    Ok(())
}

pub fn validate_owner(entity: &'static str, owner: &str) -> Result<(), ValidationError> {
    if owner.trim().is_empty() {
        return Err(ValidationError::EmptyOwner(entity));
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if !syllabus_naming::is_valid_slug(slug) {
        return Err(ValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

/// Explicit orders must be non-negative. Sibling uniqueness is not checked
/// here: a forced order is accepted as-is.
pub fn validate_order(order: i32) -> Result<(), ValidationError> {
    if order < 0 {
        return Err(ValidationError::NegativeOrder(order));
    }
    Ok(())
}

/// Validate a normalized snapshot for data integrity issues.
/// Checks for:
/// - Empty titles and owners
/// - Invalid or duplicate course slugs
/// - Duplicate content keys
/// - Blob-backed content without a locator
/// - Module items referencing unknown content keys
/// - Missing, negative or duplicate orders within a course or module
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), ValidationError> {
    let mut keys = HashSet::new();
    for content in &snapshot.contents {
        validate_content(content)?;
        if !keys.insert(content.key.as_str()) {
            return Err(ValidationError::DuplicateContentKey(content.key.clone()));
        }
    }

    let mut slugs = HashSet::new();
    for course in &snapshot.courses {
        let slug = course.resolved_slug();
        validate_slug(&slug)?;
        if !slugs.insert(slug.clone()) {
            return Err(ValidationError::DuplicateSlug(slug));
        }
        validate_course(course, &slug, &keys)?;
    }

    Ok(())
}

fn validate_content(content: &ContentFixture) -> Result<(), ValidationError> {
    validate_title("content", content.payload.title())?;
    validate_owner("content", &content.owner)?;
    if let Some(blob) = content.payload.blob() {
        if blob.locator.trim().is_empty() {
            return Err(ValidationError::EmptyLocator(content.key.clone()));
        }
    }
    Ok(())
}

fn validate_course(
    course: &CourseFixture,
    slug: &str,
    keys: &HashSet<&str>,
) -> Result<(), ValidationError> {
    validate_title("course", &course.title)?;
    validate_owner("course", &course.owner)?;

    let scope = format!("modules of course '{slug}'");
    check_orders(&scope, course.modules.iter().map(|m| m.order))?;

    for module in &course.modules {
        validate_title("module", &module.title)?;

        for item in &module.items {
            if !keys.contains(item.content.as_str()) {
                return Err(ValidationError::UnknownContentKey {
                    module: module.title.clone(),
                    key: item.content.clone(),
                });
            }
        }

        let scope = format!("items of module '{}' in '{slug}'", module.title);
        check_orders(&scope, module.items.iter().map(|i| i.order))?;
    }

    Ok(())
}

fn check_orders(
    scope: &str,
    orders: impl Iterator<Item = Option<i32>>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for order in orders {
        let order = order.ok_or_else(|| {
            if seen.contains(&i32::MAX) {
                ValidationError::OrderOverflow(scope.to_string())
            } else {
                ValidationError::MissingOrder(scope.to_string())
            }
        })?;
        validate_order(order)?;
        if !seen.insert(order) {
            return Err(ValidationError::DuplicateOrder {
                scope: scope.to_string(),
                order,
            });
        }
    }
    Ok(())
}

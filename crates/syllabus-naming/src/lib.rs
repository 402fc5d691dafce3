//! Naming conventions and helpers for syllabus.
//!
//! This crate provides course slugs, index names and small display helpers.
//! It has no dependencies and can be used by any other syllabus crate.

// ============================================================================
// Slugs
// ============================================================================

/// Longest slug accepted for a course.
pub const MAX_SLUG_LEN: usize = 64;

/// Build a URL slug from a human-readable title.
///
/// ASCII letters and digits are kept (lowercased), every other run of
/// characters collapses into a single `-`, and leading/trailing separators
/// are dropped. The result is cut to [`MAX_SLUG_LEN`].
///
/// # Examples
/// ```
/// use syllabus_naming::slugify;
///
/// assert_eq!(slugify("Python Basics"), "python-basics");
/// assert_eq!(slugify("  C++ & Rust: 101  "), "c-rust-101");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

/// Check that a slug is non-empty, lowercase ASCII alphanumerics separated by
/// single dashes, and no longer than [`MAX_SLUG_LEN`].
///
/// # Examples
/// ```
/// use syllabus_naming::is_valid_slug;
///
/// assert!(is_valid_slug("python-basics"));
/// assert!(!is_valid_slug("Python-Basics"));
/// assert!(!is_valid_slug("python--basics"));
/// assert!(!is_valid_slug("-python"));
/// ```
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return false;
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

// ============================================================================
// Index Naming (for schema setup)
// ============================================================================

/// Generate index name from table name, columns, and optional user-provided key.
/// Always includes table name to avoid conflicts across tables.
/// Uses double underscore to separate table name from the rest.
/// Format: ix_{table}__{key} or ix_{table}__{col1}_{col2}...
pub fn build_index_name(table: &str, columns: &[&str], key: Option<&str>) -> String {
    match key {
        Some(k) => format!("ix_{}__{}", table, k),
        None => format!("ix_{}__{}", table, columns.join("_")),
    }
}

// ============================================================================
// Display helpers
// ============================================================================

/// Simple pluralization for counted nouns in listings.
///
/// # Examples
/// ```
/// use syllabus_naming::pluralize;
///
/// assert_eq!(pluralize("module"), "modules");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("status"), "status");
/// ```
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        name.to_string()
    } else if name.ends_with('y')
        && !name.ends_with("ay")
        && !name.ends_with("ey")
        && !name.ends_with("oy")
        && !name.ends_with("uy")
    {
        format!("{}ies", &name[..name.len() - 1])
    } else {
        format!("{}s", name)
    }
}

/// Render `count noun`, pluralizing the noun unless the count is one.
pub fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {}", pluralize(noun))
    }
}

/// Render a byte count with binary units, one decimal above a KiB.
///
/// # Examples
/// ```
/// use syllabus_naming::human_size;
///
/// assert_eq!(human_size(512), "512 B");
/// assert_eq!(human_size(1536), "1.5 KiB");
/// assert_eq!(human_size(3 * 1024 * 1024), "3.0 MiB");
/// ```
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

//! Declarative course graphs used to seed a catalog.
//!
//! Fixtures name content by key instead of id, since ids only exist once the
//! rows are written. Orders may be given explicitly or left out; a
//! [`Snapshot::normalize`] pass fills the gaps with the same rule interactive
//! creation uses.

use serde::{Deserialize, Serialize};

use crate::content::Payload;
use crate::order::next_order;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    #[serde(default)]
    pub contents: Vec<ContentFixture>,
    #[serde(default)]
    pub courses: Vec<CourseFixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ContentFixture {
    /// Name used by module items to refer to this content.
    pub key: String,
    pub owner: String,
    #[serde(flatten)]
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct CourseFixture {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub owner: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "active_by_default", skip_serializing_if = "is_true")]
    pub is_active: bool,
    #[serde(default)]
    pub modules: Vec<ModuleFixture>,
}

fn active_by_default() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ModuleFixture {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default)]
    pub items: Vec<ItemFixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ItemFixture {
    /// Key of a [`ContentFixture`].
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl Snapshot {
    /// Append another snapshot (e.g. a second fixture file).
    pub fn merge(&mut self, other: Snapshot) {
        self.contents.extend(other.contents);
        self.courses.extend(other.courses);
    }

    pub fn content(&self, key: &str) -> Option<&ContentFixture> {
        self.contents.iter().find(|c| c.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty() && self.courses.is_empty()
    }

    /// Resolve slugs from titles and fill missing orders.
    /// Returns a new Snapshot where every course has a slug and every module
    /// and item has an order.
    pub fn normalize(&self) -> Self {
        let mut normalized = self.clone();
        for course in &mut normalized.courses {
            if course.slug.is_none() {
                course.slug = Some(syllabus_naming::slugify(&course.title));
            }
            fill_orders(course.modules.iter_mut().map(|m| &mut m.order));
            for module in &mut course.modules {
                fill_orders(module.items.iter_mut().map(|i| &mut i.order));
            }
        }
        normalized
    }
}

impl CourseFixture {
    /// Slug as written, or derived from the title.
    pub fn resolved_slug(&self) -> String {
        self.slug
            .clone()
            .unwrap_or_else(|| syllabus_naming::slugify(&self.title))
    }
}

/// Give each missing order `max + 1` over the orders listed before it.
/// An order that would overflow stays missing for validation to report.
fn fill_orders<'a>(orders: impl Iterator<Item = &'a mut Option<i32>>) {
    let mut max: Option<i32> = None;
    for order in orders {
        if order.is_none() {
            *order = next_order(max);
        }
        if let Some(value) = *order {
            max = Some(max.map_or(value, |m| m.max(value)));
        }
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use syllabus_naming::counted;

use crate::content::{ContentBinding, Rendered};

pub type CourseId = i32;
pub type ModuleId = i32;
pub type ItemId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub slug: String,
    /// Opaque id issued by the auth collaborator.
    pub owner_id: String,
    pub description: String,
    /// Inactive courses are kept but left out of active listings.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which courses a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseFilter {
    #[default]
    All,
    Active,
}

impl CourseFilter {
    pub fn includes(self, course: &Course) -> bool {
        match self {
            CourseFilter::All => true,
            CourseFilter::Active => course.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub order: i32,
}

/// Ordered slot in a module, bound to one concrete content row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleItem {
    pub id: ItemId,
    pub module_id: ModuleId,
    pub order: i32,
    pub binding: ContentBinding,
}

/// Input for creating a course. The slug is derived from the title when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub slug: Option<String>,
    pub owner_id: String,
    pub description: String,
}

impl NewCourse {
    pub fn new(title: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            owner_id: owner_id.into(),
            ..Default::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Explicit slug, or one derived from the title.
    pub fn resolved_slug(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => syllabus_naming::slugify(&self.title),
        }
    }
}

/// Input for creating a module. `order: None` requests automatic assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewModule {
    pub title: String,
    pub description: String,
    pub order: Option<i32>,
}

impl NewModule {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Force an explicit order. No sibling check is made for forced values.
    pub fn at(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

/// A course with its modules and rendered items, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutline {
    pub course: Course,
    pub modules: Vec<ModuleOutline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleOutline {
    pub module: Module,
    pub items: Vec<(ModuleItem, Rendered)>,
}

impl CourseOutline {
    pub fn item_count(&self) -> usize {
        self.modules.iter().map(|m| m.items.len()).sum()
    }
}

impl fmt::Display for CourseOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}) - {}, {}",
            self.course.title,
            self.course.slug,
            counted(self.modules.len(), "module"),
            counted(self.item_count(), "item")
        )?;
        for outline in &self.modules {
            writeln!(f, "  {}. {}", outline.module.order, outline.module.title)?;
            for (item, rendered) in &outline.items {
                writeln!(f, "     {}. {}", item.order, rendered)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;

    fn course() -> Course {
        Course {
            id: 1,
            title: "Python Basics".into(),
            slug: "python-basics".into(),
            owner_id: "alice".into(),
            description: String::new(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn course_filter_skips_inactive_courses() {
        let mut archived = course();
        archived.is_active = false;
        assert!(CourseFilter::All.includes(&archived));
        assert!(!CourseFilter::Active.includes(&archived));
        assert!(CourseFilter::Active.includes(&course()));
        assert_eq!(CourseFilter::default(), CourseFilter::All);
    }

    #[test]
    fn new_course_derives_slug_from_title() {
        let input = NewCourse::new("Python Basics", "alice");
        assert_eq!(input.resolved_slug(), "python-basics");

        let input = input.with_slug("py-101");
        assert_eq!(input.resolved_slug(), "py-101");
    }

    #[test]
    fn new_module_builder() {
        let module = NewModule::new("Loops").with_description("for and while").at(4);
        assert_eq!(module.title, "Loops");
        assert_eq!(module.description, "for and while");
        assert_eq!(module.order, Some(4));
        assert_eq!(NewModule::new("Intro").order, None);
    }

    #[test]
    fn outline_display_lists_modules_and_items() {
        let module = Module {
            id: 2,
            course_id: 1,
            title: "Loops".into(),
            description: String::new(),
            order: 1,
        };
        let item = ModuleItem {
            id: 9,
            module_id: 2,
            order: 0,
            binding: ContentBinding::new(ContentKind::Text, 5),
        };
        let rendered = Rendered {
            kind: ContentKind::Text,
            title: "While".into(),
            summary: "Repeat until false.".into(),
        };
        let outline = CourseOutline {
            course: course(),
            modules: vec![ModuleOutline {
                module,
                items: vec![(item, rendered)],
            }],
        };

        assert_eq!(
            outline.to_string(),
            "Python Basics (python-basics) - 1 module, 1 item\n  1. Loops\n     0. [text] While: Repeat until false.\n"
        );
    }
}

//! Bulk load of a fixture [`Snapshot`] in a single transaction.

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use syllabus_core::{ContentBinding, Snapshot, ValidationError, validate_snapshot};
use syllabus_naming::counted;
use tracing::{debug, info};

use crate::binding;
use crate::catalog::Catalog;
use crate::entity::{course, module, module_item};
use crate::error::StoreError;

/// Rows written by [`Catalog::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub contents: usize,
    pub courses: usize,
    pub modules: usize,
    pub items: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            counted(self.contents, "content item"),
            counted(self.courses, "course"),
            counted(self.modules, "module"),
            counted(self.items, "item")
        )
    }
}

impl Catalog {
    /// Normalize, validate and write a snapshot.
    ///
    /// Orders come from the snapshot (filled by normalization where absent),
    /// not from the live assigner. Either every row is written or none is.
    pub async fn seed(&self, snapshot: &Snapshot) -> Result<SeedReport, StoreError> {
        let snapshot = snapshot.normalize();
        validate_snapshot(&snapshot)?;

        let now = Utc::now();
        let mut report = SeedReport::default();
        let txn = self.db.begin().await?;

        for fixture in &snapshot.courses {
            let slug = fixture.resolved_slug();
            let taken = course::Entity::find()
                .filter(course::Column::Slug.eq(slug.as_str()))
                .one(&txn)
                .await?;
            if taken.is_some() {
                return Err(StoreError::DuplicateSlug(slug));
            }
        }

        let mut bindings: HashMap<&str, ContentBinding> = HashMap::new();
        for fixture in &snapshot.contents {
            let binding = binding::insert(&txn, &fixture.owner, &fixture.payload, now).await?;
            debug!(key = %fixture.key, %binding, "seeded content");
            bindings.insert(fixture.key.as_str(), binding);
            report.contents += 1;
        }

        for fixture in &snapshot.courses {
            let slug = fixture.resolved_slug();
            let course = course::ActiveModel {
                title: Set(fixture.title.clone()),
                slug: Set(slug.clone()),
                owner_id: Set(fixture.owner.clone()),
                description: Set(fixture.description.clone()),
                is_active: Set(fixture.is_active),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| StoreError::from_slug_insert(e, &slug))?;
            report.courses += 1;

            for module_fixture in &fixture.modules {
                let order = module_fixture
                    .order
                    .ok_or_else(|| ValidationError::MissingOrder(module_fixture.title.clone()))?;
                let module = module::ActiveModel {
                    course_id: Set(course.id),
                    title: Set(module_fixture.title.clone()),
                    description: Set(module_fixture.description.clone()),
                    order: Set(order),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                report.modules += 1;

                for item in &module_fixture.items {
                    let binding = bindings.get(item.content.as_str()).copied().ok_or_else(|| {
                        ValidationError::UnknownContentKey {
                            module: module_fixture.title.clone(),
                            key: item.content.clone(),
                        }
                    })?;
                    let order = item
                        .order
                        .ok_or_else(|| ValidationError::MissingOrder(item.content.clone()))?;
                    module_item::ActiveModel {
                        module_id: Set(module.id),
                        order: Set(order),
                        content_kind: Set(binding.kind.into()),
                        content_id: Set(binding.id),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                    report.items += 1;
                }
            }
            debug!(slug = %course.slug, "seeded course");
        }

        txn.commit().await?;
        info!(%report, "seeded catalog");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_display() {
        let report = SeedReport {
            contents: 3,
            courses: 1,
            modules: 2,
            items: 1,
        };
        assert_eq!(
            report.to_string(),
            "3 content items, 1 course, 2 modules, 1 item"
        );
    }
}

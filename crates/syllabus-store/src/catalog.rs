use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Set, TransactionTrait,
};
use syllabus_config::{PoolConfig, SyllabusConfig};
use syllabus_core::{
    Course, CourseFilter, CourseId, NewCourse, OrderScope, validate_owner, validate_slug, validate_title,
};
use tracing::{debug, info};

use crate::blob::{BlobStore, FsBlobStore};
use crate::content::ContentStore;
use crate::entity::{course, module, module_item};
use crate::error::StoreError;
use crate::order::ScopeLocks;
use crate::schema;

pub const MEMORY_URL: &str = "sqlite::memory:";

/// What a course deletion removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseRemoval {
    pub course_id: CourseId,
    pub modules_removed: u64,
    pub items_removed: u64,
}

/// Entry point to the store: courses, their ordered modules and items, and
/// the content they bind to.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) db: DatabaseConnection,
    pub(crate) content: ContentStore,
    pub(crate) locks: ScopeLocks,
}

fn is_memory_url(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}

impl Catalog {
    /// Connect and create any missing tables.
    pub async fn connect(url: &str, pool: &PoolConfig) -> Result<Self, StoreError> {
        let mut options = ConnectOptions::new(url.to_string());
        // Each connection to an in-memory SQLite database sees its own database.
        let (max, min) = if is_memory_url(url) {
            (1, 1)
        } else {
            (pool.max_connections, pool.min_connections)
        };
        options
            .max_connections(max)
            .min_connections(min)
            .connect_timeout(Duration::from_secs(pool.connect_timeout_secs))
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        schema::create_tables(&db).await?;
        info!(backend = ?db.get_database_backend(), "catalog connected");
        Ok(Self::from_connection(db))
    }

    /// Connect using `config`, with blobs stored under its blob directory.
    pub async fn open(config: &SyllabusConfig) -> Result<Self, StoreError> {
        let catalog = Self::connect(config.database_url(), config.pool()).await?;
        Ok(catalog.with_blobs(Arc::new(FsBlobStore::new(config.blob_dir()))))
    }

    /// Fresh in-memory SQLite catalog.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect(MEMORY_URL, &PoolConfig::default()).await
    }

    /// Wrap an existing connection. Tables are not created.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            content: ContentStore::new(db.clone()),
            db,
            locks: ScopeLocks::new(),
        }
    }

    pub fn with_blobs(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.content = self.content.with_blobs(blobs);
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn locks(&self) -> &ScopeLocks {
        &self.locks
    }

    pub async fn create_course(&self, new: NewCourse) -> Result<Course, StoreError> {
        validate_title("course", &new.title)?;
        validate_owner("course", &new.owner_id)?;
        let slug = new.resolved_slug();
        validate_slug(&slug)?;

        if self.find_slug(&slug).await?.is_some() {
            return Err(StoreError::DuplicateSlug(slug));
        }

        let now = Utc::now();
        let model = course::ActiveModel {
            title: Set(new.title),
            slug: Set(slug.clone()),
            owner_id: Set(new.owner_id),
            description: Set(new.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| StoreError::from_slug_insert(e, &slug))?;

        info!(course_id = model.id, slug = %model.slug, "created course");
        Ok(model.into())
    }

    pub async fn course(&self, id: CourseId) -> Result<Course, StoreError> {
        course::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Course::from)
            .ok_or_else(|| StoreError::not_found("course", id))
    }

    pub async fn course_by_slug(&self, slug: &str) -> Result<Course, StoreError> {
        self.find_slug(slug)
            .await?
            .map(Course::from)
            .ok_or_else(|| StoreError::not_found("course", slug))
    }

    async fn find_slug(&self, slug: &str) -> Result<Option<course::Model>, DbErr> {
        course::Entity::find()
            .filter(course::Column::Slug.eq(slug))
            .one(&self.db)
            .await
    }

    pub async fn list_courses(&self, filter: CourseFilter) -> Result<Vec<Course>, StoreError> {
        let mut select = course::Entity::find().order_by_asc(course::Column::Id);
        if filter == CourseFilter::Active {
            select = select.filter(course::Column::IsActive.eq(true));
        }
        let courses = select.all(&self.db).await?;
        Ok(courses.into_iter().map(Course::from).collect())
    }

    /// Mark a course active or inactive. Its modules and items are untouched.
    pub async fn set_course_active(&self, id: CourseId, active: bool) -> Result<Course, StoreError> {
        let result = course::Entity::update_many()
            .col_expr(course::Column::IsActive, Expr::value(active))
            .col_expr(course::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(course::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("course", id));
        }
        info!(course_id = id, active, "changed course activity");
        self.course(id).await
    }

    /// Delete a course with all of its modules and their items. Content rows
    /// are left alone. Nothing is removed if any step fails.
    pub async fn delete_course(&self, id: CourseId) -> Result<CourseRemoval, StoreError> {
        let scope = OrderScope::ModulesOf(id);
        let guard = self.locks.acquire(scope).await;
        let txn = self.db.begin().await?;

        lock_row(&txn, course::Entity::find_by_id(id))
            .await?
            .ok_or_else(|| StoreError::not_found("course", id))?;

        let module_ids: Vec<i32> = module::Entity::find()
            .select_only()
            .column(module::Column::Id)
            .filter(module::Column::CourseId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        let items = module_item::Entity::delete_many()
            .filter(module_item::Column::ModuleId.is_in(module_ids.clone()))
            .exec(&txn)
            .await?;
        let modules = module::Entity::delete_many()
            .filter(module::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        course::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        drop(guard);

        self.locks.forget(scope).await;
        for module_id in module_ids {
            self.locks.forget(OrderScope::ItemsOf(module_id)).await;
        }

        let removal = CourseRemoval {
            course_id: id,
            modules_removed: modules.rows_affected,
            items_removed: items.rows_affected,
        };
        info!(
            course_id = id,
            modules = removal.modules_removed,
            items = removal.items_removed,
            "deleted course"
        );
        Ok(removal)
    }
}

/// Fetch one row inside `txn`, taking a row lock where the backend has them.
/// SQLite serialises writers at the database level instead.
pub(crate) async fn lock_row<E: EntityTrait>(
    txn: &DatabaseTransaction,
    select: Select<E>,
) -> Result<Option<E::Model>, DbErr> {
    let backend = txn.get_database_backend();
    let select = match backend {
        DbBackend::Sqlite => select,
        _ => select.lock_exclusive(),
    };
    debug!(?backend, "locking scope parent");
    select.one(txn).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sqlite::memory:", true)]
    #[case("sqlite://file:catalog?mode=memory&cache=shared", true)]
    #[case("sqlite://syllabus.db?mode=rwc", false)]
    #[case("postgres://localhost/syllabus", false)]
    fn detects_memory_urls(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_memory_url(url), expected);
    }
}

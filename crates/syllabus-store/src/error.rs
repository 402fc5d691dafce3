use sea_orm::{DbErr, SqlErr};
use syllabus_core::{ContentBinding, OrderScope, ValidationError};
use thiserror::Error;

use crate::blob::BlobError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("content binding does not resolve: {0}")]
    Binding(ContentBinding),
    /// A setup defect (e.g. an ordered entity without a scope relation).
    /// Not recoverable by retrying.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Two writers assigned the same order; retry the whole operation.
    #[error("order {order} assigned twice in {scope}")]
    Conflict { scope: OrderScope, order: i32 },
    #[error("course slug already exists: {0}")]
    DuplicateSlug(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("blob store error: {0}")]
    Blob(#[from] BlobError),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Errors the caller may resolve by running the operation again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    /// Errors that indicate broken setup rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Configuration(_))
    }

    /// Map a unique-constraint violation on `course.slug` to [`StoreError::DuplicateSlug`].
    pub(crate) fn from_slug_insert(err: DbErr, slug: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::DuplicateSlug(slug.to_string()),
            _ => StoreError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::ContentKind;

    #[test]
    fn messages() {
        assert_eq!(
            StoreError::not_found("course", "python-basics").to_string(),
            "course not found: python-basics"
        );
        assert_eq!(
            StoreError::Binding(ContentBinding::new(ContentKind::Image, 99)).to_string(),
            "content binding does not resolve: image#99"
        );
        assert_eq!(
            StoreError::Conflict {
                scope: OrderScope::ItemsOf(4),
                order: 2
            }
            .to_string(),
            "order 2 assigned twice in items of module 4"
        );
    }

    #[test]
    fn classification() {
        let conflict = StoreError::Conflict {
            scope: OrderScope::ModulesOf(1),
            order: 0,
        };
        assert!(conflict.is_retryable());
        assert!(!conflict.is_fatal());

        let config = StoreError::Configuration("no scope".into());
        assert!(config.is_fatal());
        assert!(!config.is_retryable());
    }

    #[test]
    fn non_unique_db_errors_pass_through() {
        let err = StoreError::from_slug_insert(DbErr::Custom("boom".into()), "x");
        assert!(matches!(err, StoreError::Database(_)));
    }
}

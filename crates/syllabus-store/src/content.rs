use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use syllabus_core::{
    BlobRef, Content, ContentBinding, ContentId, ContentKind, Payload, ValidationError,
    validate_owner, validate_title,
};
use tracing::{info, warn};

use crate::binding;
use crate::blob::BlobStore;
use crate::entity::text_content;
use crate::error::StoreError;

/// Outcome of deleting a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRemoval {
    pub binding: ContentBinding,
    /// Module items that were bound to the content and removed with it.
    pub items_removed: u64,
}

/// Create, read, update and delete the concrete content kinds.
#[derive(Clone)]
pub struct ContentStore {
    db: DatabaseConnection,
    blobs: Option<Arc<dyn BlobStore>>,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("blobs", &self.blobs.is_some())
            .finish_non_exhaustive()
    }
}

impl ContentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, blobs: None }
    }

    pub fn with_blobs(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    pub fn blobs(&self) -> Option<&Arc<dyn BlobStore>> {
        self.blobs.as_ref()
    }

    fn blob_store(&self) -> Result<&Arc<dyn BlobStore>, StoreError> {
        self.blobs
            .as_ref()
            .ok_or_else(|| StoreError::Configuration("no blob store configured".into()))
    }

    /// Hand bytes to the blob store and get back a reference for a payload.
    pub fn store_blob(&self, bytes: &[u8], media_type: &str) -> Result<BlobRef, StoreError> {
        Ok(self.blob_store()?.put(bytes, media_type)?)
    }

    pub fn open_blob(&self, blob: &BlobRef) -> Result<Vec<u8>, StoreError> {
        Ok(self.blob_store()?.open(&blob.locator)?)
    }

    pub async fn create(&self, owner_id: &str, payload: Payload) -> Result<ContentBinding, StoreError> {
        validate_owner("content", owner_id)?;
        validate_title("content", payload.title())?;
        if let Some(blob) = payload.blob() {
            if blob.locator.trim().is_empty() {
                return Err(ValidationError::EmptyLocator(payload.title().to_string()).into());
            }
        }

        let binding = binding::insert(&self.db, owner_id, &payload, Utc::now()).await?;
        info!(%binding, owner_id, "created content");
        Ok(binding)
    }

    pub async fn get(&self, binding: ContentBinding) -> Result<Content, StoreError> {
        binding::fetch(&self.db, binding)
            .await?
            .ok_or_else(|| StoreError::not_found("content", binding))
    }

    pub async fn exists(&self, binding: ContentBinding) -> Result<bool, StoreError> {
        Ok(binding::fetch(&self.db, binding).await?.is_some())
    }

    pub async fn list(&self, kind: ContentKind) -> Result<Vec<Content>, StoreError> {
        Ok(binding::list(&self.db, kind).await?)
    }

    pub async fn retitle(&self, binding: ContentBinding, title: &str) -> Result<(), StoreError> {
        validate_title("content", title)?;
        let changed = binding::retitle(&self.db, binding, title, Utc::now()).await?;
        if changed == 0 {
            return Err(StoreError::not_found("content", binding));
        }
        info!(%binding, title, "retitled content");
        Ok(())
    }

    pub async fn update_text(&self, id: ContentId, title: &str, body: &str) -> Result<(), StoreError> {
        validate_title("content", title)?;
        let result = text_content::Entity::update_many()
            .col_expr(text_content::Column::Title, Expr::value(title))
            .col_expr(text_content::Column::Body, Expr::value(body))
            .col_expr(text_content::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(text_content::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(
                "content",
                ContentBinding::new(ContentKind::Text, id),
            ));
        }
        info!(id, "updated text content");
        Ok(())
    }

    /// Delete content and every module item bound to it, in one transaction.
    /// The blob of a blob-backed kind is released after commit.
    pub async fn delete(&self, binding: ContentBinding) -> Result<ContentRemoval, StoreError> {
        let txn = self.db.begin().await?;
        let content = binding::fetch(&txn, binding)
            .await?
            .ok_or_else(|| StoreError::not_found("content", binding))?;

        let items_removed = binding::unbind_all(&txn, binding).await?;
        binding::remove(&txn, binding).await?;
        txn.commit().await?;
        info!(%binding, items_removed, "deleted content");

        if let (Some(blob), Some(store)) = (content.payload.blob(), &self.blobs) {
            // Rows are already committed.
            if let Err(err) = store.remove(&blob.locator) {
                warn!(%binding, locator = %blob.locator, %err, "failed to release blob");
            }
        }

        Ok(ContentRemoval {
            binding,
            items_removed,
        })
    }
}

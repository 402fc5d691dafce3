//! Order assignment against the database.
//!
//! The rule itself lives in [`syllabus_core::next_order`]; this module reads
//! the current maximum of a scope, serialises writers per scope and checks
//! afterwards that no two siblings ended up with the same auto-assigned order.

use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use syllabus_core::{OrderScope, ValidationError, next_order};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::entity::{module, module_item};
use crate::error::StoreError;

/// An entity whose rows carry an `order` among siblings of one parent.
pub trait Ordered: EntityTrait {
    fn order_column() -> Self::Column;

    /// Column naming the parent that scopes the order. `None` means the
    /// entity was declared ordered without a scope, which is a setup defect.
    fn scope_column() -> Option<Self::Column>;
}

impl Ordered for module::Entity {
    fn order_column() -> Self::Column {
        module::Column::Order
    }

    fn scope_column() -> Option<Self::Column> {
        Some(module::Column::CourseId)
    }
}

impl Ordered for module_item::Entity {
    fn order_column() -> Self::Column {
        module_item::Column::Order
    }

    fn scope_column() -> Option<Self::Column> {
        Some(module_item::Column::ModuleId)
    }
}

fn table_of<E: EntityTrait>() -> String {
    E::default().table_name().to_string()
}

fn scope_of<E: Ordered>(parent: Option<i32>) -> Result<(E::Column, i32), StoreError> {
    let column = E::scope_column().ok_or_else(|| {
        StoreError::Configuration(format!("`{}` is ordered but declares no scope", table_of::<E>()))
    })?;
    let parent = parent.ok_or_else(|| {
        StoreError::Configuration(format!("`{}` row has no parent to scope its order", table_of::<E>()))
    })?;
    Ok((column, parent))
}

/// Largest order currently stored under `parent`, `None` for an empty scope.
pub async fn current_max<E, C>(conn: &C, parent: Option<i32>) -> Result<Option<i32>, StoreError>
where
    E: Ordered,
    C: ConnectionTrait,
{
    let (scope, parent) = scope_of::<E>(parent)?;
    let max = E::find()
        .select_only()
        .column_as(Expr::col(E::order_column()).max(), "max_order")
        .filter(scope.eq(parent))
        .into_tuple::<Option<i32>>()
        .one(conn)
        .await?;
    Ok(max.flatten())
}

/// Order for the next row appended under `parent`.
pub async fn next_in<E, C>(conn: &C, parent: Option<i32>) -> Result<i32, StoreError>
where
    E: Ordered,
    C: ConnectionTrait,
{
    let (_, id) = scope_of::<E>(parent)?;
    let max = current_max::<E, C>(conn, parent).await?;
    let order = next_order(max).ok_or_else(|| {
        ValidationError::OrderOverflow(format!("`{}` rows of parent {id}", table_of::<E>()))
    })?;
    debug!(table = %table_of::<E>(), ?parent, ?max, order, "assigned order");
    Ok(order)
}

/// Fail with [`StoreError::Conflict`] when more than one sibling holds `order`.
/// Called after an auto-assigned insert, before commit.
pub async fn ensure_unique<E, C>(conn: &C, scope: OrderScope, order: i32) -> Result<(), StoreError>
where
    E: Ordered,
    C: ConnectionTrait,
{
    let (column, parent) = scope_of::<E>(Some(scope.parent_id()))?;
    let count = E::find()
        .select_only()
        .column_as(Expr::col(E::order_column()).count(), "n")
        .filter(column.eq(parent))
        .filter(E::order_column().eq(order))
        .into_tuple::<i64>()
        .one(conn)
        .await?
        .unwrap_or_default();
    if count > 1 {
        warn!(%scope, order, count, "order assigned more than once");
        return Err(StoreError::Conflict { scope, order });
    }
    Ok(())
}

/// In-process async mutex per [`OrderScope`].
///
/// Writers sharing a pool take the scope lock before opening their
/// transaction, so the read of the current maximum and the insert that uses
/// it never interleave with another writer in the same scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeLocks {
    inner: Arc<Mutex<HashMap<OrderScope, Arc<Mutex<()>>>>>,
}

impl ScopeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, scope: OrderScope) -> OwnedMutexGuard<()> {
        let lock = {
            let mut scopes = self.inner.lock().await;
            scopes.entry(scope).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry of a scope whose parent was deleted.
    pub async fn forget(&self, scope: OrderScope) {
        self.inner.lock().await.remove(&scope);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

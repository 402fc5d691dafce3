use std::marker::PhantomData;

use sea_orm::{
    ConnectionTrait, DbBackend, EntityTrait, PaginatorTrait, QuerySelect, QueryTrait, Select,
};

use crate::error::StoreError;

/// A sorted, not-yet-executed query over ordered siblings.
///
/// Building one runs nothing. Every call to [`all`](Self::all),
/// [`page`](Self::page) or [`count`](Self::count) executes a fresh query, so
/// the same value can be fetched again after the scope changes.
#[derive(Debug, Clone)]
pub struct OrderedQuery<E: EntityTrait, T> {
    select: Select<E>,
    _out: PhantomData<fn() -> T>,
}

impl<E, T> OrderedQuery<E, T>
where
    E: EntityTrait,
    T: From<E::Model>,
{
    /// `select` must already carry its filter and its `(order, id)` sort.
    pub(crate) fn new(select: Select<E>) -> Self {
        Self {
            select,
            _out: PhantomData,
        }
    }

    pub async fn all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<T>, StoreError> {
        let rows = self.select.clone().all(conn).await?;
        Ok(rows.into_iter().map(T::from).collect())
    }

    pub async fn first<C: ConnectionTrait>(&self, conn: &C) -> Result<Option<T>, StoreError> {
        let row = self.select.clone().one(conn).await?;
        Ok(row.map(T::from))
    }

    /// Zero-based page of at most `page_size` rows.
    pub async fn page<C: ConnectionTrait>(
        &self,
        conn: &C,
        page_size: u64,
        page: u64,
    ) -> Result<Vec<T>, StoreError> {
        if page_size == 0 {
            return Ok(Vec::new());
        }
        let rows = self
            .select
            .clone()
            .offset(page.saturating_mul(page_size))
            .limit(page_size)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(T::from).collect())
    }

    pub async fn count<C: ConnectionTrait>(&self, conn: &C) -> Result<u64, StoreError>
    where
        E::Model: Sync,
    {
        Ok(self.select.clone().count(conn).await?)
    }

    /// SQL this query would run on `backend`.
    pub fn to_sql(&self, backend: DbBackend) -> String {
        self.select.build(backend).to_string()
    }
}

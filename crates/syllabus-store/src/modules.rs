//! Ordered containers: modules within a course, items within a module.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use syllabus_core::{
    ContentBinding, CourseId, CourseOutline, ItemId, Module, ModuleId, ModuleItem, ModuleOutline,
    NewModule, OrderScope, Rendered, validate_order, validate_title,
};
use tracing::info;

use crate::binding;
use crate::catalog::{Catalog, lock_row};
use crate::entity::{course, module, module_item};
use crate::error::StoreError;
use crate::order::{ensure_unique, next_in};
use crate::query::OrderedQuery;

/// What a module deletion removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRemoval {
    pub module_id: ModuleId,
    pub items_removed: u64,
}

impl Catalog {
    /// Append a module to a course.
    ///
    /// Without an explicit order the module goes after the current last one
    /// (`0` in an empty course). An explicit order is stored as given; it is
    /// not checked against siblings.
    pub async fn add_module(&self, course_id: CourseId, new: NewModule) -> Result<Module, StoreError> {
        validate_title("module", &new.title)?;
        if let Some(order) = new.order {
            validate_order(order)?;
        }

        let scope = OrderScope::ModulesOf(course_id);
        let _guard = self.locks.acquire(scope).await;
        let txn = self.db.begin().await?;

        lock_row(&txn, course::Entity::find_by_id(course_id))
            .await?
            .ok_or_else(|| StoreError::not_found("course", course_id))?;

        let (order, assigned) = match new.order {
            Some(order) => (order, false),
            None => (next_in::<module::Entity, _>(&txn, Some(course_id)).await?, true),
        };

        let model = module::ActiveModel {
            course_id: Set(course_id),
            title: Set(new.title),
            description: Set(new.description),
            order: Set(order),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if assigned {
            ensure_unique::<module::Entity, _>(&txn, scope, order).await?;
        }
        txn.commit().await?;

        info!(course_id, module_id = model.id, order, assigned, "added module");
        Ok(model.into())
    }

    pub async fn module(&self, id: ModuleId) -> Result<Module, StoreError> {
        module::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Module::from)
            .ok_or_else(|| StoreError::not_found("module", id))
    }

    /// Delete a module and its items. Sibling orders are left as they are.
    pub async fn delete_module(&self, id: ModuleId) -> Result<ModuleRemoval, StoreError> {
        let scope = OrderScope::ItemsOf(id);
        let guard = self.locks.acquire(scope).await;
        let txn = self.db.begin().await?;

        lock_row(&txn, module::Entity::find_by_id(id))
            .await?
            .ok_or_else(|| StoreError::not_found("module", id))?;

        let items = module_item::Entity::delete_many()
            .filter(module_item::Column::ModuleId.eq(id))
            .exec(&txn)
            .await?;
        module::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        drop(guard);
        self.locks.forget(scope).await;

        info!(module_id = id, items = items.rows_affected, "deleted module");
        Ok(ModuleRemoval {
            module_id: id,
            items_removed: items.rows_affected,
        })
    }

    /// Bind content into a module.
    ///
    /// The binding is resolved first; if the content row does not exist the
    /// call fails with [`StoreError::Binding`] and nothing is written.
    pub async fn add_item(
        &self,
        module_id: ModuleId,
        binding: ContentBinding,
        order: Option<i32>,
    ) -> Result<ModuleItem, StoreError> {
        if let Some(order) = order {
            validate_order(order)?;
        }

        let scope = OrderScope::ItemsOf(module_id);
        let _guard = self.locks.acquire(scope).await;
        let txn = self.db.begin().await?;

        lock_row(&txn, module::Entity::find_by_id(module_id))
            .await?
            .ok_or_else(|| StoreError::not_found("module", module_id))?;
        binding::resolve(&txn, binding).await?;

        let (order, assigned) = match order {
            Some(order) => (order, false),
            None => (next_in::<module_item::Entity, _>(&txn, Some(module_id)).await?, true),
        };

        let model = module_item::ActiveModel {
            module_id: Set(module_id),
            order: Set(order),
            content_kind: Set(binding.kind.into()),
            content_id: Set(binding.id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if assigned {
            ensure_unique::<module_item::Entity, _>(&txn, scope, order).await?;
        }
        txn.commit().await?;

        info!(module_id, item_id = model.id, %binding, order, assigned, "added item");
        Ok(model.into())
    }

    pub async fn item(&self, id: ItemId) -> Result<ModuleItem, StoreError> {
        module_item::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(ModuleItem::from)
            .ok_or_else(|| StoreError::not_found("module item", id))
    }

    /// Remove one item. The bound content is kept.
    pub async fn delete_item(&self, id: ItemId) -> Result<ModuleItem, StoreError> {
        let item = self.item(id).await?;
        let result = module_item::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("module item", id));
        }
        info!(item_id = id, module_id = item.module_id, "deleted item");
        Ok(item)
    }

    /// Modules of a course sorted by `(order, id)`. Runs when fetched.
    pub fn ordered_modules(&self, course_id: CourseId) -> OrderedQuery<module::Entity, Module> {
        OrderedQuery::new(
            module::Entity::find()
                .filter(module::Column::CourseId.eq(course_id))
                .order_by_asc(module::Column::Order)
                .order_by_asc(module::Column::Id),
        )
    }

    /// Items of a module sorted by `(order, id)`. Runs when fetched.
    pub fn ordered_items(&self, module_id: ModuleId) -> OrderedQuery<module_item::Entity, ModuleItem> {
        OrderedQuery::new(
            module_item::Entity::find()
                .filter(module_item::Column::ModuleId.eq(module_id))
                .order_by_asc(module_item::Column::Order)
                .order_by_asc(module_item::Column::Id),
        )
    }

    /// Items of a module in order, each resolved to its content.
    pub async fn rendered_items(
        &self,
        module_id: ModuleId,
    ) -> Result<Vec<(ModuleItem, Rendered)>, StoreError> {
        self.module(module_id).await?;
        let items = self.ordered_items(module_id).all(&self.db).await?;

        let mut rendered = Vec::with_capacity(items.len());
        for item in items {
            let content = binding::resolve(&self.db, item.binding).await?;
            rendered.push((item, content.render()));
        }
        Ok(rendered)
    }

    /// The whole course tree, modules and items in order.
    pub async fn outline(&self, course_id: CourseId) -> Result<CourseOutline, StoreError> {
        let course = self.course(course_id).await?;
        let modules = self.ordered_modules(course_id).all(&self.db).await?;

        let mut outlines = Vec::with_capacity(modules.len());
        for module in modules {
            let items = self.rendered_items(module.id).await?;
            outlines.push(ModuleOutline { module, items });
        }
        Ok(CourseOutline {
            course,
            modules: outlines,
        })
    }
}

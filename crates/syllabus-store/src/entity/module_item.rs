use sea_orm::entity::prelude::*;
use syllabus_core::{ContentBinding, ContentKind, ModuleItem};

/// Kind tag column; one variant per content table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ContentKindTag {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "file")]
    File,
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "video")]
    Video,
}

impl From<ContentKind> for ContentKindTag {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Text => ContentKindTag::Text,
            ContentKind::File => ContentKindTag::File,
            ContentKind::Image => ContentKindTag::Image,
            ContentKind::Video => ContentKindTag::Video,
        }
    }
}

impl From<ContentKindTag> for ContentKind {
    fn from(tag: ContentKindTag) -> Self {
        match tag {
            ContentKindTag::Text => ContentKind::Text,
            ContentKindTag::File => ContentKind::File,
            ContentKindTag::Image => ContentKind::Image,
            ContentKindTag::Video => ContentKind::Video,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "module_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub module_id: i32,
    /// Position among the items of `module_id`.
    pub order: i32,
    pub content_kind: ContentKindTag,
    pub content_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::module::Entity",
        from = "Column::ModuleId",
        to = "super::module::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Module,
}

impl Related<super::module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn binding(&self) -> ContentBinding {
        ContentBinding::new(self.content_kind.into(), self.content_id)
    }
}

impl From<Model> for ModuleItem {
    fn from(model: Model) -> Self {
        ModuleItem {
            id: model.id,
            module_id: model.module_id,
            order: model.order,
            binding: model.binding(),
        }
    }
}

use sea_orm::entity::prelude::*;
use syllabus_core::{Content, FileBody, Payload};

use super::blob_ref;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "file_content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: String,
    pub title: String,
    pub locator: String,
    pub media_type: String,
    pub size: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Content {
    fn from(model: Model) -> Self {
        Content {
            id: model.id,
            owner_id: model.owner_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            payload: Payload::File(FileBody {
                title: model.title,
                blob: blob_ref(model.locator, model.media_type, model.size),
            }),
        }
    }
}

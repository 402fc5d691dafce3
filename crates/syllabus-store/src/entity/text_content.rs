use sea_orm::entity::prelude::*;
use syllabus_core::{Content, Payload, TextBody};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "text_content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
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
            payload: Payload::Text(TextBody {
                title: model.title,
                body: model.body,
            }),
        }
    }
}

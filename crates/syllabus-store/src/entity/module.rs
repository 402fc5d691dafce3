use sea_orm::entity::prelude::*;
use syllabus_core::Module;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "module")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Position among the modules of `course_id`.
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(has_many = "super::module_item::Entity")]
    ModuleItem,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::module_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Module {
    fn from(model: Model) -> Self {
        Module {
            id: model.id,
            course_id: model.course_id,
            title: model.title,
            description: model.description,
            order: model.order,
        }
    }
}

//! Table and index setup from the entity definitions.

use sea_orm::sea_query::{Index, IndexCreateStatement, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};
use syllabus_naming::build_index_name;
use tracing::debug;

use crate::entity::{
    course, file_content, image_content, module, module_item, text_content, video_content,
};

/// Create every table and secondary index that does not exist yet.
///
/// Parents are created before children so foreign keys resolve on backends
/// that check them at creation time.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let tables: Vec<TableCreateStatement> = vec![
        table(&schema, course::Entity),
        table(&schema, module::Entity),
        table(&schema, module_item::Entity),
        table(&schema, text_content::Entity),
        table(&schema, file_content::Entity),
        table(&schema, image_content::Entity),
        table(&schema, video_content::Entity),
    ];
    for stmt in &tables {
        db.execute(backend.build(stmt)).await?;
    }

    for stmt in indexes() {
        db.execute(backend.build(&stmt)).await?;
    }
    debug!(tables = tables.len(), "schema ready");
    Ok(())
}

fn table<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    schema.create_table_from_entity(entity).if_not_exists().to_owned()
}

fn index<E, I>(entity: E, columns: I) -> IndexCreateStatement
where
    E: EntityTrait,
    I: IntoIterator<Item = E::Column> + Clone,
{
    let names: Vec<String> = columns
        .clone()
        .into_iter()
        .map(|c| sea_orm::IdenStatic::as_str(&c).to_string())
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();

    let mut stmt = Index::create();
    stmt.name(build_index_name(entity.table_name(), &names, None))
        .table(entity)
        .if_not_exists();
    for column in columns {
        stmt.col(column);
    }
    stmt.to_owned()
}

/// Secondary indexes: order lookups per scope and the reverse binding lookup
/// used when content is deleted.
pub fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        index(
            module::Entity,
            [module::Column::CourseId, module::Column::Order],
        ),
        index(
            module_item::Entity,
            [module_item::Column::ModuleId, module_item::Column::Order],
        ),
        index(
            module_item::Entity,
            [
                module_item::Column::ContentKind,
                module_item::Column::ContentId,
            ],
        ),
    ]
}

//! Dispatch from a `(kind, id)` binding to the table holding that kind.
//!
//! Every match on [`ContentKind`] in the store lives here; a new kind needs
//! its entity plus one arm in each function below.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};
use syllabus_core::{Content, ContentBinding, ContentKind, Payload};
use tracing::debug;

use crate::entity::{
    file_content, image_content, module_item, size_to_db, text_content, video_content,
};
use crate::error::StoreError;

/// Load the content a binding points at, `None` if the row does not exist.
pub async fn fetch<C: ConnectionTrait>(
    conn: &C,
    binding: ContentBinding,
) -> Result<Option<Content>, DbErr> {
    let id = binding.id;
    let content = match binding.kind {
        ContentKind::Text => text_content::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(Content::from),
        ContentKind::File => file_content::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(Content::from),
        ContentKind::Image => image_content::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(Content::from),
        ContentKind::Video => video_content::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(Content::from),
    };
    Ok(content)
}

/// Like [`fetch`], but a dangling binding is a [`StoreError::Binding`].
pub async fn resolve<C: ConnectionTrait>(
    conn: &C,
    binding: ContentBinding,
) -> Result<Content, StoreError> {
    let content = fetch(conn, binding).await?;
    debug!(%binding, found = content.is_some(), "resolved binding");
    content.ok_or(StoreError::Binding(binding))
}

/// Load every row of one kind, by id.
pub async fn list<C: ConnectionTrait>(conn: &C, kind: ContentKind) -> Result<Vec<Content>, DbErr> {
    let contents = match kind {
        ContentKind::Text => text_content::Entity::find()
            .all(conn)
            .await?
            .into_iter()
            .map(Content::from)
            .collect(),
        ContentKind::File => file_content::Entity::find()
            .all(conn)
            .await?
            .into_iter()
            .map(Content::from)
            .collect(),
        ContentKind::Image => image_content::Entity::find()
            .all(conn)
            .await?
            .into_iter()
            .map(Content::from)
            .collect(),
        ContentKind::Video => video_content::Entity::find()
            .all(conn)
            .await?
            .into_iter()
            .map(Content::from)
            .collect(),
    };
    Ok(contents)
}

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    owner_id: &str,
    payload: &Payload,
    now: DateTime<Utc>,
) -> Result<ContentBinding, DbErr> {
    let owner_id = owner_id.to_string();
    let binding = match payload {
        Payload::Text(body) => {
            let model = text_content::ActiveModel {
                owner_id: Set(owner_id),
                title: Set(body.title.clone()),
                body: Set(body.body.clone()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            ContentBinding::new(ContentKind::Text, model.id)
        }
        Payload::File(body) => {
            let model = file_content::ActiveModel {
                owner_id: Set(owner_id),
                title: Set(body.title.clone()),
                locator: Set(body.blob.locator.clone()),
                media_type: Set(body.blob.media_type.clone()),
                size: Set(size_to_db(body.blob.size)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            ContentBinding::new(ContentKind::File, model.id)
        }
        Payload::Image(body) => {
            let model = image_content::ActiveModel {
                owner_id: Set(owner_id),
                title: Set(body.title.clone()),
                locator: Set(body.blob.locator.clone()),
                media_type: Set(body.blob.media_type.clone()),
                size: Set(size_to_db(body.blob.size)),
                alt_text: Set(body.alt_text.clone()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            ContentBinding::new(ContentKind::Image, model.id)
        }
        Payload::Video(body) => {
            let model = video_content::ActiveModel {
                owner_id: Set(owner_id),
                title: Set(body.title.clone()),
                locator: Set(body.blob.locator.clone()),
                media_type: Set(body.blob.media_type.clone()),
                size: Set(size_to_db(body.blob.size)),
                duration_secs: Set(body.duration_secs.map(i64::from)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            ContentBinding::new(ContentKind::Video, model.id)
        }
    };
    Ok(binding)
}

/// Delete the content row itself. Returns the number of rows removed.
pub(crate) async fn remove<C: ConnectionTrait>(
    conn: &C,
    binding: ContentBinding,
) -> Result<u64, DbErr> {
    let id = binding.id;
    let result = match binding.kind {
        ContentKind::Text => text_content::Entity::delete_by_id(id).exec(conn).await?,
        ContentKind::File => file_content::Entity::delete_by_id(id).exec(conn).await?,
        ContentKind::Image => image_content::Entity::delete_by_id(id).exec(conn).await?,
        ContentKind::Video => video_content::Entity::delete_by_id(id).exec(conn).await?,
    };
    Ok(result.rows_affected)
}

/// Delete every module item bound to `binding`. Returns the number removed.
pub(crate) async fn unbind_all<C: ConnectionTrait>(
    conn: &C,
    binding: ContentBinding,
) -> Result<u64, DbErr> {
    let result = module_item::Entity::delete_many()
        .filter(module_item::Column::ContentKind.eq(module_item::ContentKindTag::from(binding.kind)))
        .filter(module_item::Column::ContentId.eq(binding.id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Update the title of any kind, refreshing `updated_at`. Returns rows changed.
pub(crate) async fn retitle<C: ConnectionTrait>(
    conn: &C,
    binding: ContentBinding,
    title: &str,
    now: DateTime<Utc>,
) -> Result<u64, DbErr> {
    use sea_orm::sea_query::Expr;

    let id = binding.id;
    let result = match binding.kind {
        ContentKind::Text => {
            text_content::Entity::update_many()
                .col_expr(text_content::Column::Title, Expr::value(title))
                .col_expr(text_content::Column::UpdatedAt, Expr::value(now))
                .filter(text_content::Column::Id.eq(id))
                .exec(conn)
                .await?
        }
        ContentKind::File => {
            file_content::Entity::update_many()
                .col_expr(file_content::Column::Title, Expr::value(title))
                .col_expr(file_content::Column::UpdatedAt, Expr::value(now))
                .filter(file_content::Column::Id.eq(id))
                .exec(conn)
                .await?
        }
        ContentKind::Image => {
            image_content::Entity::update_many()
                .col_expr(image_content::Column::Title, Expr::value(title))
                .col_expr(image_content::Column::UpdatedAt, Expr::value(now))
                .filter(image_content::Column::Id.eq(id))
                .exec(conn)
                .await?
        }
        ContentKind::Video => {
            video_content::Entity::update_many()
                .col_expr(video_content::Column::Title, Expr::value(title))
                .col_expr(video_content::Column::UpdatedAt, Expr::value(now))
                .filter(video_content::Column::Id.eq(id))
                .exec(conn)
                .await?
        }
    };
    Ok(result.rows_affected)
}

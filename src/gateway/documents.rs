use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::{document, Document};

pub async fn find_all(db: &DatabaseConnection, archived: Option<bool>) -> Result<Vec<document::Model>, DbErr> {
    let mut query = Document::find();
    if let Some(archived) = archived {
        query = query.filter(document::Column::Archived.eq(archived));
    }
    query
        .order_by_desc(document::Column::CreatedAt)
        .order_by_desc(document::Column::Id)
        .all(db)
        .await
}

pub async fn create(db: &DatabaseConnection, title: String, url: String) -> Result<document::Model, DbErr> {
    document::ActiveModel {
        title: Set(title),
        url: Set(url),
        archived: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// One-way: there is no unarchive.
pub async fn archive(db: &DatabaseConnection, id: i32) -> Result<Option<document::Model>, DbErr> {
    let Some(current) = Document::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    if current.archived {
        return Ok(Some(current));
    }
    let mut active: document::ActiveModel = current.into();
    active.archived = Set(true);
    active.update(db).await.map(Some)
}

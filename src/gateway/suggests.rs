use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::{project_suggest, user, ProjectSuggest, SuggestStatus, User};

#[derive(Debug, Clone)]
pub struct NewSuggest {
    pub name: String,
    pub description: Option<String>,
    pub user_id: i32,
}

/// Outcome of a board review; absent fields stay as they are.
#[derive(Debug, Clone, Default)]
pub struct Review {
    pub status: Option<SuggestStatus>,
    pub read: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestWithUser {
    #[serde(flatten)]
    pub suggest: project_suggest::Model,
    pub user: Option<user::Model>,
}

pub async fn find_all_with_user(db: &DatabaseConnection) -> Result<Vec<SuggestWithUser>, DbErr> {
    let rows = ProjectSuggest::find()
        .find_also_related(User)
        .order_by_desc(project_suggest::Column::CreatedAt)
        .order_by_desc(project_suggest::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(suggest, user)| SuggestWithUser { suggest, user })
        .collect())
}

pub async fn create(db: &DatabaseConnection, new: NewSuggest) -> Result<project_suggest::Model, DbErr> {
    project_suggest::ActiveModel {
        name: Set(new.name),
        description: Set(new.description),
        user_id: Set(new.user_id),
        status: Set(SuggestStatus::default()),
        read: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn review(db: &DatabaseConnection, id: i32, review: Review) -> Result<Option<project_suggest::Model>, DbErr> {
    let Some(current) = ProjectSuggest::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut active: project_suggest::ActiveModel = current.clone().into();
    if let Some(status) = review.status {
        active.status = Set(status);
    }
    if let Some(read) = review.read {
        active.read = Set(read);
    }
    if !active.is_changed() {
        return Ok(Some(current));
    }
    active.update(db).await.map(Some)
}

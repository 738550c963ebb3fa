use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::{contribution, project, Contribution, Project, ProjectStatus};

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub status: ProjectStatus,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub image: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub start_at: Option<Option<DateTime<Utc>>>,
    pub end_at: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithContributions {
    #[serde(flatten)]
    pub project: project::Model,
    pub contributions: Vec<contribution::Model>,
}

/// Newest first, optionally restricted to one status.
pub async fn find_all(
    db: &DatabaseConnection,
    status: Option<ProjectStatus>,
) -> Result<Vec<project::Model>, DbErr> {
    let mut query = Project::find();
    if let Some(status) = status {
        query = query.filter(project::Column::Status.eq(status));
    }
    query
        .order_by_desc(project::Column::CreatedAt)
        .order_by_desc(project::Column::Id)
        .all(db)
        .await
}

pub async fn recent_ongoing(db: &DatabaseConnection, limit: u64) -> Result<Vec<project::Model>, DbErr> {
    Project::find()
        .filter(project::Column::Status.eq(ProjectStatus::Ongoing))
        .order_by_desc(project::Column::CreatedAt)
        .order_by_desc(project::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<project::Model>, DbErr> {
    Project::find_by_id(id).one(db).await
}

pub async fn find_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<project::Model>, DbErr> {
    Project::find().filter(project::Column::Slug.eq(slug)).one(db).await
}

pub async fn find_with_contributions(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<ProjectWithContributions>, DbErr> {
    let Some(project) = find_by_id(db, id).await? else {
        return Ok(None);
    };
    let contributions = project
        .find_related(Contribution)
        .order_by_desc(contribution::Column::CreatedAt)
        .order_by_desc(contribution::Column::Id)
        .all(db)
        .await?;
    Ok(Some(ProjectWithContributions { project, contributions }))
}

pub async fn create(db: &DatabaseConnection, new: NewProject) -> Result<project::Model, DbErr> {
    project::ActiveModel {
        name: Set(new.name),
        slug: Set(new.slug),
        description: Set(new.description),
        image: Set(new.image),
        status: Set(new.status),
        start_at: Set(new.start_at),
        end_at: Set(new.end_at),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: ProjectChanges,
) -> Result<Option<project::Model>, DbErr> {
    let Some(current) = find_by_id(db, id).await? else {
        return Ok(None);
    };
    let mut active: project::ActiveModel = current.clone().into();

    if let Some(v) = changes.name {
        active.name = Set(v);
    }
    if let Some(v) = changes.slug {
        active.slug = Set(v);
    }
    if let Some(v) = changes.description {
        active.description = Set(v);
    }
    if let Some(v) = changes.image {
        active.image = Set(v);
    }
    if let Some(v) = changes.status {
        active.status = Set(v);
    }
    if let Some(v) = changes.start_at {
        active.start_at = Set(v);
    }
    if let Some(v) = changes.end_at {
        active.end_at = Set(v);
    }

    if !active.is_changed() {
        return Ok(Some(current));
    }
    active.update(db).await.map(Some)
}

/// Fails with a foreign-key violation while contributions reference the project.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let result = Project::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::{contribution, contribution_payment, project, user, Contribution, ContributionPayment, Project, User};

#[derive(Debug, Clone)]
pub struct NewContribution {
    pub name: String,
    pub project_id: Option<i32>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub organized_by: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewContributionPayment {
    pub user_id: i32,
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWithProject {
    #[serde(flatten)]
    pub contribution: contribution::Model,
    pub project: Option<project::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPaymentWithUser {
    #[serde(flatten)]
    pub payment: contribution_payment::Model,
    pub user: Option<user::Model>,
}

pub async fn find_all_with_project(db: &DatabaseConnection) -> Result<Vec<ContributionWithProject>, DbErr> {
    let rows = Contribution::find()
        .find_also_related(Project)
        .order_by_desc(contribution::Column::CreatedAt)
        .order_by_desc(contribution::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(contribution, project)| ContributionWithProject { contribution, project })
        .collect())
}

pub async fn recent(db: &DatabaseConnection, limit: u64) -> Result<Vec<contribution::Model>, DbErr> {
    Contribution::find()
        .order_by_desc(contribution::Column::CreatedAt)
        .order_by_desc(contribution::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<contribution::Model>, DbErr> {
    Contribution::find_by_id(id).one(db).await
}

pub async fn create(db: &DatabaseConnection, new: NewContribution) -> Result<contribution::Model, DbErr> {
    contribution::ActiveModel {
        name: Set(new.name),
        project_id: Set(new.project_id),
        start_at: Set(new.start_at),
        end_at: Set(new.end_at),
        organized_by: Set(new.organized_by),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn find_payments(
    db: &DatabaseConnection,
    contribution_id: i32,
) -> Result<Vec<ContributionPaymentWithUser>, DbErr> {
    let rows = ContributionPayment::find()
        .filter(contribution_payment::Column::ContributionId.eq(contribution_id))
        .find_also_related(User)
        .order_by_desc(contribution_payment::Column::CreatedAt)
        .order_by_desc(contribution_payment::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(payment, user)| ContributionPaymentWithUser { payment, user })
        .collect())
}

pub async fn add_payment(
    db: &DatabaseConnection,
    contribution_id: i32,
    new: NewContributionPayment,
) -> Result<contribution_payment::Model, DbErr> {
    contribution_payment::ActiveModel {
        contribution_id: Set(contribution_id),
        user_id: Set(new.user_id),
        amount: Set(new.amount),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

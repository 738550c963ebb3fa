use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::{vote, Vote};

#[derive(Debug, Clone)]
pub struct NewVote {
    pub title: String,
    pub description: Option<String>,
    pub closes_at: Option<DateTime<Utc>>,
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<vote::Model>, DbErr> {
    Vote::find()
        .order_by_desc(vote::Column::CreatedAt)
        .order_by_desc(vote::Column::Id)
        .all(db)
        .await
}

pub async fn create(db: &DatabaseConnection, new: NewVote) -> Result<vote::Model, DbErr> {
    vote::ActiveModel {
        title: Set(new.title),
        description: Set(new.description),
        closes_at: Set(new.closes_at),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

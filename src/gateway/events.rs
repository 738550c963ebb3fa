use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{event, Event, EventScope};

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub scope: EventScope,
    pub antenna_id: Option<i32>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub created_by: Option<i32>,
}

pub async fn find_all(db: &DatabaseConnection, approved: Option<bool>) -> Result<Vec<event::Model>, DbErr> {
    let mut query = Event::find();
    if let Some(approved) = approved {
        query = query.filter(event::Column::Approved.eq(approved));
    }
    query
        .order_by_desc(event::Column::CreatedAt)
        .order_by_desc(event::Column::Id)
        .all(db)
        .await
}

pub async fn recent_approved(db: &DatabaseConnection, limit: u64) -> Result<Vec<event::Model>, DbErr> {
    Event::find()
        .filter(event::Column::Approved.eq(true))
        .order_by_desc(event::Column::CreatedAt)
        .order_by_desc(event::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

pub async fn find_by_title(db: &DatabaseConnection, title: &str) -> Result<Option<event::Model>, DbErr> {
    Event::find().filter(event::Column::Title.eq(title)).one(db).await
}

/// New events always start unapproved, except when `approved` is forced by
/// a trusted caller such as the seeder.
pub async fn create(db: &DatabaseConnection, new: NewEvent, approved: bool) -> Result<event::Model, DbErr> {
    event::ActiveModel {
        title: Set(new.title),
        scope: Set(new.scope),
        antenna_id: Set(new.antenna_id),
        approved: Set(approved),
        start_at: Set(new.start_at),
        end_at: Set(new.end_at),
        created_by: Set(new.created_by),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Sets `approved`; approving twice leaves it approved.
pub async fn approve(db: &DatabaseConnection, id: i32) -> Result<Option<event::Model>, DbErr> {
    let Some(current) = Event::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    if current.approved {
        return Ok(Some(current));
    }
    let mut active: event::ActiveModel = current.into();
    active.approved = Set(true);
    active.update(db).await.map(Some)
}

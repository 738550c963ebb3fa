use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::{antenna, user, Antenna, User};

/// An antenna with its members attached.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AntennaWithMembers {
    #[serde(flatten)]
    pub antenna: antenna::Model,
    pub members: Vec<user::Model>,
}

pub async fn find_all_with_members(db: &DatabaseConnection) -> Result<Vec<AntennaWithMembers>, DbErr> {
    let rows = Antenna::find()
        .find_with_related(User)
        .order_by_asc(antenna::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(antenna, members)| AntennaWithMembers { antenna, members })
        .collect())
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<antenna::Model>, DbErr> {
    Antenna::find_by_id(id).one(db).await
}

pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<antenna::Model>, DbErr> {
    Antenna::find()
        .filter(antenna::Column::Name.eq(name))
        .one(db)
        .await
}

pub async fn create(db: &DatabaseConnection, name: String) -> Result<antenna::Model, DbErr> {
    antenna::ActiveModel {
        name: Set(name),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Members and events of the antenna are left without one.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let result = Antenna::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

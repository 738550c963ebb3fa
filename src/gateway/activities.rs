use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::{activity, Activity, ActivityAction};

/// Appends a log entry. The log has no update or delete counterpart.
pub async fn record(
    db: &DatabaseConnection,
    user_id: i32,
    action: ActivityAction,
) -> Result<activity::Model, DbErr> {
    activity::ActiveModel {
        user_id: Set(user_id),
        action: Set(action),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn find_for_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<activity::Model>, DbErr> {
    Activity::find()
        .filter(activity::Column::UserId.eq(user_id))
        .order_by_desc(activity::Column::CreatedAt)
        .order_by_desc(activity::Column::Id)
        .all(db)
        .await
}

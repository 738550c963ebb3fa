use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::entities::{quota_setting, QuotaPeriod, QuotaSetting};

#[derive(Debug, Clone)]
pub struct NewQuota {
    pub period: QuotaPeriod,
    pub amount: f64,
    pub year: i32,
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<quota_setting::Model>, DbErr> {
    QuotaSetting::find()
        .order_by_desc(quota_setting::Column::Year)
        .order_by_desc(quota_setting::Column::Id)
        .all(db)
        .await
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
    QuotaSetting::find().count(db).await
}

pub async fn create(db: &DatabaseConnection, new: NewQuota) -> Result<quota_setting::Model, DbErr> {
    quota_setting::ActiveModel {
        period: Set(new.period),
        amount: Set(new.amount),
        year: Set(new.year),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

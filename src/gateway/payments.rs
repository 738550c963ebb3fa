use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::{payment, Payment, PaymentMethod};

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: i32,
    pub amount: f64,
    pub method: PaymentMethod,
    pub note: Option<String>,
}

pub async fn find_all(db: &DatabaseConnection, user_id: Option<i32>) -> Result<Vec<payment::Model>, DbErr> {
    let mut query = Payment::find();
    if let Some(user_id) = user_id {
        query = query.filter(payment::Column::UserId.eq(user_id));
    }
    query
        .order_by_desc(payment::Column::CreatedAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
}

pub async fn create(db: &DatabaseConnection, new: NewPayment) -> Result<payment::Model, DbErr> {
    payment::ActiveModel {
        user_id: Set(new.user_id),
        amount: Set(new.amount),
        method: Set(new.method),
        note: Set(new.note),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

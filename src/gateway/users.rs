use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::activities;
use crate::entities::{activity, antenna, payment, user, Antenna, Payment, Role, User};

/// Checked input for a new member.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub role: Role,
    pub antenna_id: Option<i32>,
}

/// Checked partial update. `None` leaves a column untouched; for nullable
/// columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub district: Option<Option<String>>,
    pub role: Option<Role>,
    pub antenna_id: Option<Option<i32>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithAntenna {
    #[serde(flatten)]
    pub user: user::Model,
    pub antenna: Option<antenna::Model>,
}

/// A member with payments, activity log and antenna attached.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: user::Model,
    pub antenna: Option<antenna::Model>,
    pub payments: Vec<payment::Model>,
    pub activities: Vec<activity::Model>,
}

pub async fn find_all_with_antenna(db: &DatabaseConnection) -> Result<Vec<UserWithAntenna>, DbErr> {
    let rows = User::find()
        .find_also_related(Antenna)
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(user, antenna)| UserWithAntenna { user, antenna })
        .collect())
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<user::Model>, DbErr> {
    User::find_by_id(id).one(db).await
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>, DbErr> {
    User::find().filter(user::Column::Email.eq(email)).one(db).await
}

pub async fn find_detail(db: &DatabaseConnection, id: i32) -> Result<Option<UserDetail>, DbErr> {
    let Some(user) = find_by_id(db, id).await? else {
        return Ok(None);
    };
    let antenna = user.find_related(Antenna).one(db).await?;
    let payments = user
        .find_related(Payment)
        .order_by_desc(payment::Column::CreatedAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await?;
    let activities = activities::find_for_user(db, id).await?;
    Ok(Some(UserDetail {
        user,
        antenna,
        payments,
        activities,
    }))
}

pub async fn create(db: &DatabaseConnection, new: NewUser) -> Result<user::Model, DbErr> {
    user::ActiveModel {
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        email: Set(new.email),
        phone: Set(new.phone),
        address: Set(new.address),
        country: Set(new.country),
        city: Set(new.city),
        district: Set(new.district),
        role: Set(new.role),
        antenna_id: Set(new.antenna_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update(db: &DatabaseConnection, id: i32, changes: UserChanges) -> Result<Option<user::Model>, DbErr> {
    let Some(current) = find_by_id(db, id).await? else {
        return Ok(None);
    };
    let mut active: user::ActiveModel = current.clone().into();

    if let Some(v) = changes.first_name {
        active.first_name = Set(v);
    }
    if let Some(v) = changes.last_name {
        active.last_name = Set(v);
    }
    if let Some(v) = changes.email {
        active.email = Set(v);
    }
    if let Some(v) = changes.phone {
        active.phone = Set(v);
    }
    if let Some(v) = changes.address {
        active.address = Set(v);
    }
    if let Some(v) = changes.country {
        active.country = Set(v);
    }
    if let Some(v) = changes.city {
        active.city = Set(v);
    }
    if let Some(v) = changes.district {
        active.district = Set(v);
    }
    if let Some(v) = changes.role {
        active.role = Set(v);
    }
    if let Some(v) = changes.antenna_id {
        active.antenna_id = Set(v);
    }

    if !active.is_changed() {
        return Ok(Some(current));
    }
    active.update(db).await.map(Some)
}

pub async fn set_antenna(
    db: &DatabaseConnection,
    id: i32,
    antenna_id: Option<i32>,
) -> Result<Option<user::Model>, DbErr> {
    update(
        db,
        id,
        UserChanges {
            antenna_id: Some(antenna_id),
            ..Default::default()
        },
    )
    .await
}

/// Fails with a foreign-key violation while payments reference the member.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let result = User::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

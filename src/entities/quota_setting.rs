use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::QuotaPeriod;

/// Membership fee amount for a period of a given year.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "quota_settings")]
#[serde(rename_all = "camelCase")]
#[schema(as = QuotaSetting)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub period: QuotaPeriod,
    pub amount: f64,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

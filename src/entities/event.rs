use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::EventScope;

/// An event proposed by a member; visible on the dashboard once approved.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "events")]
#[serde(rename_all = "camelCase")]
#[schema(as = Event)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub scope: EventScope,
    pub antenna_id: Option<i32>,
    pub approved: bool,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    /// Id of the proposing member, if known.
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::antenna::Entity",
        from = "Column::AntennaId",
        to = "super::antenna::Column::Id",
        on_delete = "SetNull"
    )]
    Antenna,
}

impl Related<super::antenna::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Antenna.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

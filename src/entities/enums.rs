//! Closed value sets stored as strings.
//!
//! Each enum serializes to the same SCREAMING_SNAKE_CASE string it is stored
//! as, so the wire value and the column value never diverge.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Office held by a member inside the association.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "PRESIDENT")]
    President,
    #[sea_orm(string_value = "VICE_PRESIDENT")]
    VicePresident,
    #[sea_orm(string_value = "SECRETARY_GENERAL")]
    SecretaryGeneral,
    #[sea_orm(string_value = "SECRETARY_ADJOINT")]
    SecretaryAdjoint,
    #[sea_orm(string_value = "SPOKESPERSON")]
    Spokesperson,
    #[sea_orm(string_value = "SPOKESPERSON_ADJOINT")]
    SpokespersonAdjoint,
    #[sea_orm(string_value = "TREASURER")]
    Treasurer,
    #[sea_orm(string_value = "TREASURER_ADJOINT")]
    TreasurerAdjoint,
    #[default]
    #[sea_orm(string_value = "MEMBER")]
    Member,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotaPeriod {
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    #[sea_orm(string_value = "QUARTERLY")]
    Quarterly,
    #[sea_orm(string_value = "YEARLY")]
    Yearly,
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    #[sea_orm(string_value = "PLANNED")]
    Planned,
    #[sea_orm(string_value = "ONGOING")]
    Ongoing,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// Audience of an event: the whole association or a single antenna.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventScope {
    #[default]
    #[sea_orm(string_value = "GLOBAL")]
    Global,
    #[sea_orm(string_value = "ANTENNA")]
    Antenna,
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestStatus {
    #[default]
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    #[sea_orm(string_value = "CASH")]
    Cash,
    #[sea_orm(string_value = "AUTO")]
    Auto,
}

/// What an activity log entry records about a member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    #[sea_orm(string_value = "USER_CREATED")]
    UserCreated,
    #[sea_orm(string_value = "USER_UPDATED")]
    UserUpdated,
    #[sea_orm(string_value = "AFFECTATION_CHANGED")]
    AffectationChanged,
    #[sea_orm(string_value = "PAYMENT_ADDED")]
    PaymentAdded,
    #[sea_orm(string_value = "CONTRIBUTION_PAID")]
    ContributionPaid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveEnum, Iterable};

    #[test]
    fn serde_and_column_values_agree() {
        for role in Role::iter() {
            let json = serde_json::to_value(role).unwrap();
            assert_eq!(json.as_str().unwrap(), role.to_value());
        }
        for status in ProjectStatus::iter() {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json.as_str().unwrap(), status.to_value());
        }
        for action in ActivityAction::iter() {
            let json = serde_json::to_value(action).unwrap();
            assert_eq!(json.as_str().unwrap(), action.to_value());
        }
    }

    #[test]
    fn defaults_match_schema_defaults() {
        assert_eq!(Role::default(), Role::Member);
        assert_eq!(ProjectStatus::default(), ProjectStatus::Planned);
        assert_eq!(EventScope::default(), EventScope::Global);
        assert_eq!(SuggestStatus::default(), SuggestStatus::Pending);
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }
}

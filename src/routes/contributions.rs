use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::append_activity;
use crate::{
    auth::RequireAdmin,
    entities::{contribution, contribution_payment, ActivityAction},
    error::AppError,
    gateway::contributions::{
        self, ContributionPaymentWithUser, ContributionWithProject, NewContribution, NewContributionPayment,
    },
    validation::{optional_text, ApiPath, Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContributionRequest {
    /// Required
    name: Option<String>,
    project_id: Option<i32>,
    /// Required, RFC 3339 or YYYY-MM-DD
    start_at: Option<String>,
    /// Required, not before `startAt`
    end_at: Option<String>,
    organized_by: Option<String>,
}

impl CreateContributionRequest {
    fn validate(self) -> Result<NewContribution, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = errors.required_text("name", self.name);
        let start_at = errors.required("startAt", self.start_at);
        let start_at = errors.datetime("startAt", start_at);
        let end_at = errors.required("endAt", self.end_at);
        let end_at = errors.datetime("endAt", end_at);
        errors.ordered_range("endAt", start_at, end_at);

        let (Some(name), Some(start_at), Some(end_at)) = (name, start_at, end_at) else {
            return Err(errors);
        };
        errors.check()?;

        Ok(NewContribution {
            name,
            project_id: self.project_id,
            start_at,
            end_at,
            organized_by: optional_text(self.organized_by),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContributionPaymentRequest {
    /// Paying member
    user_id: Option<i32>,
    /// Greater than zero
    amount: Option<f64>,
}

impl CreateContributionPaymentRequest {
    fn validate(self) -> Result<NewContributionPayment, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let user_id = errors.required("userId", self.user_id);
        let amount = errors.positive_amount("amount", self.amount);
        match (user_id, amount) {
            (Some(user_id), Some(amount)) => Ok(NewContributionPayment { user_id, amount }),
            _ => Err(errors),
        }
    }
}

/// List contributions with their project
#[utoipa::path(
    get,
    path = "/contributions",
    tag = "contributions",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "All contributions, newest first", body = [ContributionWithProject]),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_contributions(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContributionWithProject>>, AppError> {
    Ok(Json(contributions::find_all_with_project(&state.db).await?))
}

/// Open a contribution campaign
#[utoipa::path(
    post,
    path = "/contributions",
    tag = "contributions",
    request_body = CreateContributionRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Contribution created", body = contribution::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 409, description = "Unknown project")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_contribution(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(request): Payload<CreateContributionRequest>,
) -> Result<Json<contribution::Model>, AppError> {
    let new_contribution = request.validate()?;
    let contribution = contributions::create(&state.db, new_contribution).await?;
    info!(contribution_id = contribution.id, "contribution created");
    Ok(Json(contribution))
}

/// List the payments made towards a contribution
#[utoipa::path(
    get,
    path = "/contributions/{id}/payments",
    tag = "contributions",
    params(("id" = i32, Path, description = "Contribution id")),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Payments with their member", body = [ContributionPaymentWithUser]),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such contribution")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn list_contribution_payments(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<ContributionPaymentWithUser>>, AppError> {
    if contributions::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::not_found("contribution", id));
    }
    Ok(Json(contributions::find_payments(&state.db, id).await?))
}

/// Record a member's payment towards a contribution and log CONTRIBUTION_PAID
#[utoipa::path(
    post,
    path = "/contributions/{id}/payments",
    tag = "contributions",
    params(("id" = i32, Path, description = "Contribution id")),
    request_body = CreateContributionPaymentRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Payment recorded", body = contribution_payment::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such contribution"),
        (status = 409, description = "Unknown member")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn add_contribution_payment(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    Payload(request): Payload<CreateContributionPaymentRequest>,
) -> Result<Json<contribution_payment::Model>, AppError> {
    let new_payment = request.validate()?;
    if contributions::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::not_found("contribution", id));
    }
    let payment = contributions::add_payment(&state.db, id, new_payment).await?;
    append_activity(&state.db, payment.user_id, ActivityAction::ContributionPaid).await;
    info!(contribution_id = id, user_id = payment.user_id, "contribution payment recorded");
    Ok(Json(payment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contribution_dates_are_required_and_ordered() {
        let request: CreateContributionRequest = serde_json::from_str(r#"{"name":"Cotisation jardin"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["startAt", "endAt"]);

        let request: CreateContributionRequest = serde_json::from_str(
            r#"{"name":"Cotisation jardin","startAt":"2025-06-30","endAt":"2025-06-01"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.fields()[0].field, "endAt");

        let request: CreateContributionRequest = serde_json::from_str(
            r#"{"name":"Cotisation jardin","startAt":"2025-06-01","endAt":"2025-06-30","organizedBy":"  "}"#,
        )
        .unwrap();
        let contribution = request.validate().unwrap();
        assert!(contribution.start_at < contribution.end_at);
        assert_eq!(contribution.organized_by, None);
    }

    #[test]
    fn payment_amount_must_be_positive() {
        let request: CreateContributionPaymentRequest = serde_json::from_str(r#"{"userId":1,"amount":0}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.fields()[0].field, "amount");
    }
}

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth::RequireAdmin,
    entities::{quota_setting, QuotaPeriod},
    error::AppError,
    gateway::quotas::{self, NewQuota},
    validation::{Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuotaRequest {
    /// MONTHLY, QUARTERLY or YEARLY
    period: Option<String>,
    /// Fee amount, zero or more
    amount: Option<f64>,
    year: Option<i32>,
}

impl CreateQuotaRequest {
    fn validate(self) -> Result<NewQuota, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let period = errors.required("period", self.period);
        let period = errors.enum_value::<QuotaPeriod>("period", period);
        let amount = errors.non_negative_amount("amount", self.amount);
        let year = errors.year("year", self.year);

        let (Some(period), Some(amount), Some(year)) = (period, amount, year) else {
            return Err(errors);
        };
        Ok(NewQuota { period, amount, year })
    }
}

/// List quota settings, most recent year first
#[utoipa::path(
    get,
    path = "/quota-settings",
    tag = "quotas",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "All quota settings", body = [quota_setting::Model]),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_quotas(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<quota_setting::Model>>, AppError> {
    Ok(Json(quotas::find_all(&state.db).await?))
}

/// Create a quota setting
#[utoipa::path(
    post,
    path = "/quota-settings",
    tag = "quotas",
    request_body = CreateQuotaRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Quota created", body = quota_setting::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_quota(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(request): Payload<CreateQuotaRequest>,
) -> Result<Json<quota_setting::Model>, AppError> {
    let new_quota = request.validate()?;
    Ok(Json(quotas::create(&state.db, new_quota).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_fields_are_checked() {
        let request: CreateQuotaRequest =
            serde_json::from_str(r#"{"period":"WEEKLY","amount":-5,"year":3}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["period", "amount", "year"]);

        let request: CreateQuotaRequest =
            serde_json::from_str(r#"{"period":"YEARLY","amount":50,"year":2025}"#).unwrap();
        let quota = request.validate().unwrap();
        assert_eq!(quota.period, QuotaPeriod::Yearly);
        assert_eq!(quota.amount, 50.0);
    }
}

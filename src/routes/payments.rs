use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use super::append_activity;
use crate::{
    auth::RequireAdmin,
    entities::{payment, ActivityAction},
    error::AppError,
    gateway::payments::{self, NewPayment},
    validation::{optional_text, ApiQuery, Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PaymentFilter {
    /// Only payments made by this member
    user_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Paying member
    user_id: Option<i32>,
    /// Greater than zero
    amount: Option<f64>,
    /// CASH or AUTO, CASH when omitted
    method: Option<String>,
    note: Option<String>,
}

impl CreatePaymentRequest {
    fn validate(self) -> Result<NewPayment, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let user_id = errors.required("userId", self.user_id);
        let amount = errors.positive_amount("amount", self.amount);
        let method = errors.enum_value("method", self.method).unwrap_or_default();

        let (Some(user_id), Some(amount)) = (user_id, amount) else {
            return Err(errors);
        };
        errors.check()?;

        Ok(NewPayment {
            user_id,
            amount,
            method,
            note: optional_text(self.note),
        })
    }
}

/// List membership payments, newest first
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    params(PaymentFilter),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Payments", body = [payment::Model]),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payments(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<PaymentFilter>,
) -> Result<Json<Vec<payment::Model>>, AppError> {
    Ok(Json(payments::find_all(&state.db, filter.user_id).await?))
}

/// Record a membership payment and log PAYMENT_ADDED
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Payment recorded", body = payment::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 409, description = "Unknown member")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_payment(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(request): Payload<CreatePaymentRequest>,
) -> Result<Json<payment::Model>, AppError> {
    let new_payment = request.validate()?;
    let payment = payments::create(&state.db, new_payment).await?;
    append_activity(&state.db, payment.user_id, ActivityAction::PaymentAdded).await;
    info!(payment_id = payment.id, user_id = payment.user_id, "payment recorded");
    Ok(Json(payment))
}

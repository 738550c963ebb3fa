use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::RequireAdmin,
    entities::{event, EventScope},
    error::AppError,
    gateway::events::{self, NewEvent},
    validation::{optional_text, ApiPath, ApiQuery, Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    /// Only approved (`true`) or pending (`false`) events
    approved: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Required
    title: Option<String>,
    /// GLOBAL when omitted; ANTENNA requires `antennaId`
    scope: Option<String>,
    antenna_id: Option<i32>,
    start_at: Option<String>,
    end_at: Option<String>,
    /// Proposing member
    created_by: Option<i32>,
}

impl CreateEventRequest {
    fn validate(self) -> Result<NewEvent, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let title = errors.required_text("title", self.title);
        let scope = errors.enum_value::<EventScope>("scope", self.scope).unwrap_or_default();
        if scope == EventScope::Antenna && self.antenna_id.is_none() {
            errors.push("antennaId", "is required when scope is ANTENNA");
        }
        let start_at = errors.datetime("startAt", optional_text(self.start_at));
        let end_at = errors.datetime("endAt", optional_text(self.end_at));
        errors.ordered_range("endAt", start_at, end_at);

        let Some(title) = title else {
            return Err(errors);
        };
        errors.check()?;

        Ok(NewEvent {
            title,
            scope,
            antenna_id: self.antenna_id,
            start_at,
            end_at,
            created_by: self.created_by,
        })
    }
}

/// List events, newest first
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(EventFilter),
    responses((status = 200, description = "Events", body = [event::Model]))
)]
#[tracing::instrument(skip_all)]
pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<EventFilter>,
) -> Result<Json<Vec<event::Model>>, AppError> {
    Ok(Json(events::find_all(&state.db, filter.approved).await?))
}

/// Propose an event; it stays hidden from the dashboard until approved
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event proposed", body = event::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 409, description = "Unknown antenna")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_event(
    State(state): State<AppState>,
    Payload(request): Payload<CreateEventRequest>,
) -> Result<Json<event::Model>, AppError> {
    let new_event = request.validate()?;
    let event = events::create(&state.db, new_event, false).await?;
    info!(event_id = event.id, "event proposed");
    Ok(Json(event))
}

/// Approve an event
#[utoipa::path(
    post,
    path = "/events/{id}/approve",
    tag = "events",
    params(("id" = i32, Path, description = "Event id")),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Event approved", body = event::Model),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such event")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn approve_event(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<event::Model>, AppError> {
    let event = events::approve(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("event", id))?;
    info!(event_id = id, "event approved");
    Ok(Json(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antenna_scope_needs_an_antenna() {
        let request: CreateEventRequest =
            serde_json::from_str(r#"{"title":"Nettoyage plage","scope":"ANTENNA"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.fields()[0].field, "antennaId");

        let request: CreateEventRequest =
            serde_json::from_str(r#"{"title":"Nettoyage plage","scope":"ANTENNA","antennaId":3}"#).unwrap();
        let event = request.validate().unwrap();
        assert_eq!(event.scope, EventScope::Antenna);
        assert_eq!(event.antenna_id, Some(3));
    }

    #[test]
    fn scope_defaults_to_global() {
        let request: CreateEventRequest = serde_json::from_str(r#"{"title":"AG"}"#).unwrap();
        assert_eq!(request.validate().unwrap().scope, EventScope::Global);
    }
}

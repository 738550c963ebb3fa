use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::{append_activity, OkResponse};
use crate::{
    auth::RequireAdmin,
    entities::{antenna, user, ActivityAction},
    error::AppError,
    gateway::{
        antennas::{self, AntennaWithMembers},
        users,
    },
    validation::{ApiPath, Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAntennaRequest {
    /// Unique, non-empty
    name: Option<String>,
}

impl CreateAntennaRequest {
    fn validate(self) -> Result<String, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        match errors.required_text("name", self.name) {
            Some(name) => Ok(name),
            None => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    /// Member to move into the antenna
    user_id: Option<i32>,
}

/// List antennas with their members
#[utoipa::path(
    get,
    path = "/antennas",
    tag = "antennas",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "All antennas", body = [AntennaWithMembers]),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_antennas(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<AntennaWithMembers>>, AppError> {
    Ok(Json(antennas::find_all_with_members(&state.db).await?))
}

/// Create an antenna
#[utoipa::path(
    post,
    path = "/antennas",
    tag = "antennas",
    request_body = CreateAntennaRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Antenna created", body = antenna::Model),
        (status = 400, description = "Missing name", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 409, description = "Name already used")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_antenna(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(request): Payload<CreateAntennaRequest>,
) -> Result<Json<antenna::Model>, AppError> {
    let name = request.validate()?;
    let antenna = antennas::create(&state.db, name).await?;
    info!(antenna_id = antenna.id, "antenna created");
    Ok(Json(antenna))
}

/// Delete an antenna; its members and events keep existing without one
#[utoipa::path(
    delete,
    path = "/antennas/{id}",
    tag = "antennas",
    params(("id" = i32, Path, description = "Antenna id")),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Antenna deleted", body = OkResponse),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such antenna")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_antenna(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<OkResponse>, AppError> {
    if !antennas::delete(&state.db, id).await? {
        return Err(AppError::not_found("antenna", id));
    }
    info!(antenna_id = id, "antenna deleted");
    Ok(Json(OkResponse::new()))
}

/// Move a member into an antenna and log AFFECTATION_CHANGED
#[utoipa::path(
    post,
    path = "/antennas/{id}/assign",
    tag = "antennas",
    params(("id" = i32, Path, description = "Antenna id")),
    request_body = AssignRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Member reassigned", body = user::Model),
        (status = 400, description = "Missing userId", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such antenna or member")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn assign_member(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    Payload(request): Payload<AssignRequest>,
) -> Result<Json<user::Model>, AppError> {
    let mut errors = ValidationErrors::default();
    let user_id = errors.required("userId", request.user_id);
    let Some(user_id) = user_id else {
        return Err(errors.into());
    };

    if antennas::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::not_found("antenna", id));
    }
    let user = users::set_antenna(&state.db, user_id, Some(id))
        .await?
        .ok_or_else(|| AppError::not_found("user", user_id))?;
    append_activity(&state.db, user.id, ActivityAction::AffectationChanged).await;
    info!(user_id, antenna_id = id, "member reassigned");
    Ok(Json(user))
}

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::{append_activity, OkResponse};
use crate::{
    auth::RequireAdmin,
    entities::{user, ActivityAction},
    error::AppError,
    gateway::users::{self, NewUser, UserChanges, UserDetail, UserWithAntenna},
    validation::{nullable, optional_text, ApiPath, Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Required
    first_name: Option<String>,
    /// Required
    last_name: Option<String>,
    /// Required, unique
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    country: Option<String>,
    city: Option<String>,
    district: Option<String>,
    /// One of the `Role` values, MEMBER when omitted
    role: Option<String>,
    antenna_id: Option<i32>,
}

impl CreateUserRequest {
    fn validate(self) -> Result<NewUser, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let first_name = errors.required_text("firstName", self.first_name);
        let last_name = errors.required_text("lastName", self.last_name);
        let email = errors.email("email", self.email);
        let role = errors.enum_value("role", self.role).unwrap_or_default();

        let (Some(first_name), Some(last_name), Some(email)) = (first_name, last_name, email) else {
            return Err(errors);
        };
        errors.check()?;

        Ok(NewUser {
            first_name,
            last_name,
            email,
            phone: optional_text(self.phone),
            address: optional_text(self.address),
            country: optional_text(self.country),
            city: optional_text(self.city),
            district: optional_text(self.district),
            role,
            antenna_id: self.antenna_id,
        })
    }
}

/// Partial member update: only supplied fields change, `null` clears an
/// optional field.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    country: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    city: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    district: Option<Option<String>>,
    role: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    antenna_id: Option<Option<i32>>,
}

impl UpdateUserRequest {
    fn validate(self) -> Result<UserChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let changes = UserChanges {
            first_name: errors.present_text("firstName", self.first_name),
            last_name: errors.present_text("lastName", self.last_name),
            email: match self.email {
                Some(email) => errors.email("email", Some(email)),
                None => None,
            },
            phone: self.phone.map(optional_text),
            address: self.address.map(optional_text),
            country: self.country.map(optional_text),
            city: self.city.map(optional_text),
            district: self.district.map(optional_text),
            role: errors.enum_value("role", self.role),
            antenna_id: self.antenna_id,
        };
        errors.check()?;
        Ok(changes)
    }
}

/// List members with their antenna
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "All members", body = [UserWithAntenna]),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithAntenna>>, AppError> {
    Ok(Json(users::find_all_with_antenna(&state.db).await?))
}

/// Create a member and log USER_CREATED
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Member created", body = user::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 409, description = "Email already used or unknown antenna")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(request): Payload<CreateUserRequest>,
) -> Result<Json<user::Model>, AppError> {
    let new_user = request.validate()?;
    let user = users::create(&state.db, new_user).await?;
    append_activity(&state.db, user.id, ActivityAction::UserCreated).await;
    info!(user_id = user.id, "member created");
    Ok(Json(user))
}

/// Get a member with payments, activities and antenna
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "Member id")),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Member found", body = UserDetail),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such member")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn get_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<UserDetail>, AppError> {
    users::find_detail(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("user", id))
}

/// Partially update a member and log USER_UPDATED
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "Member id")),
    request_body = UpdateUserRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Member updated", body = user::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such member"),
        (status = 409, description = "Email already used or unknown antenna")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn update_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    Payload(request): Payload<UpdateUserRequest>,
) -> Result<Json<user::Model>, AppError> {
    let changes = request.validate()?;
    let user = users::update(&state.db, id, changes)
        .await?
        .ok_or_else(|| AppError::not_found("user", id))?;
    append_activity(&state.db, user.id, ActivityAction::UserUpdated).await;
    Ok(Json(user))
}

/// Delete a member
///
/// Refused while payments or contribution payments reference the member;
/// their suggestions go with them, their activity log stays.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "Member id")),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Member deleted", body = OkResponse),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such member"),
        (status = 409, description = "Member still has payments")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<OkResponse>, AppError> {
    if !users::delete(&state.db, id).await? {
        return Err(AppError::not_found("user", id));
    }
    info!(user_id = id, "member deleted");
    Ok(Json(OkResponse::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Role;

    #[test]
    fn create_collects_every_missing_field() {
        let request: CreateUserRequest = serde_json::from_str(r#"{"email":"nope","role":"KING"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["firstName", "lastName", "email", "role"]);
    }

    #[test]
    fn create_defaults_role_and_drops_blank_optionals() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{"firstName":" Awa ","lastName":"Diop","email":"awa@asso.sn","city":"  "}"#,
        )
        .unwrap();
        let new_user = request.validate().unwrap();
        assert_eq!(new_user.first_name, "Awa");
        assert_eq!(new_user.role, Role::Member);
        assert_eq!(new_user.city, None);
        assert_eq!(new_user.antenna_id, None);
    }

    #[test]
    fn update_keeps_absent_fields_untouched() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"role":"TREASURER","antennaId":null}"#).unwrap();
        let changes = request.validate().unwrap();
        assert_eq!(changes.role, Some(Role::Treasurer));
        assert_eq!(changes.antenna_id, Some(None));
        assert_eq!(changes.first_name, None);
        assert_eq!(changes.phone, None);
    }

    #[test]
    fn update_rejects_blank_name_and_bad_email() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"firstName":"","email":"x"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.fields().len(), 2);
    }
}

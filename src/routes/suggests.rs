use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    auth::RequireAdmin,
    entities::{project_suggest, SuggestStatus},
    error::AppError,
    gateway::suggests::{self, NewSuggest, Review, SuggestWithUser},
    validation::{optional_text, ApiPath, Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuggestRequest {
    /// Required
    name: Option<String>,
    description: Option<String>,
    /// Submitting member
    user_id: Option<i32>,
}

impl CreateSuggestRequest {
    fn validate(self) -> Result<NewSuggest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = errors.required_text("name", self.name);
        let user_id = errors.required("userId", self.user_id);
        match (name, user_id) {
            (Some(name), Some(user_id)) => Ok(NewSuggest {
                name,
                description: optional_text(self.description),
                user_id,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReviewRequest {
    /// PENDING, APPROVED or REJECTED; unchanged when omitted
    status: Option<String>,
    /// Defaults to true
    read: Option<bool>,
}

impl ReviewRequest {
    fn validate(self) -> Result<Review, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let status = errors.enum_value::<SuggestStatus>("status", self.status);
        errors.check()?;
        Ok(Review {
            status,
            read: Some(self.read.unwrap_or(true)),
        })
    }
}

/// List project suggestions with their author
#[utoipa::path(
    get,
    path = "/project-suggests",
    tag = "suggests",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Suggestions, newest first", body = [SuggestWithUser]),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_suggests(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<SuggestWithUser>>, AppError> {
    Ok(Json(suggests::find_all_with_user(&state.db).await?))
}

/// Submit a project idea; open to any member
#[utoipa::path(
    post,
    path = "/project-suggests",
    tag = "suggests",
    request_body = CreateSuggestRequest,
    responses(
        (status = 200, description = "Suggestion recorded", body = project_suggest::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 409, description = "Unknown member")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_suggest(
    State(state): State<AppState>,
    Payload(request): Payload<CreateSuggestRequest>,
) -> Result<Json<project_suggest::Model>, AppError> {
    let new_suggest = request.validate()?;
    let suggest = suggests::create(&state.db, new_suggest).await?;
    info!(suggest_id = suggest.id, user_id = suggest.user_id, "project suggested");
    Ok(Json(suggest))
}

/// Mark a suggestion as read and optionally decide on it
#[utoipa::path(
    post,
    path = "/project-suggests/{id}/review",
    tag = "suggests",
    params(("id" = i32, Path, description = "Suggestion id")),
    request_body(content = ReviewRequest, description = "May be omitted; the suggestion is then only marked read"),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Suggestion reviewed", body = project_suggest::Model),
        (status = 400, description = "Unknown status", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such suggestion")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn review_suggest(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    request: Option<Payload<ReviewRequest>>,
) -> Result<Json<project_suggest::Model>, AppError> {
    let review = request
        .map(|Payload(request)| request)
        .unwrap_or_default()
        .validate()?;
    let suggest = suggests::review(&state.db, id, review)
        .await?
        .ok_or_else(|| AppError::not_found("project suggest", id))?;
    info!(suggest_id = id, status = ?suggest.status, "suggestion reviewed");
    Ok(Json(suggest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_marks_read_by_default() {
        let review = ReviewRequest::default().validate().unwrap();
        assert_eq!(review.status, None);
        assert_eq!(review.read, Some(true));

        let request: ReviewRequest = serde_json::from_str(r#"{"status":"APPROVED","read":false}"#).unwrap();
        let review = request.validate().unwrap();
        assert_eq!(review.status, Some(SuggestStatus::Approved));
        assert_eq!(review.read, Some(false));
    }

    #[test]
    fn suggestion_needs_name_and_author() {
        let request: CreateSuggestRequest = serde_json::from_str(r#"{"description":"Un potager"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["name", "userId"]);
    }
}

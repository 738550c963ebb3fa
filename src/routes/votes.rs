use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth::RequireAdmin,
    entities::vote,
    error::AppError,
    gateway::votes::{self, NewVote},
    validation::{optional_text, Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoteRequest {
    /// Required
    title: Option<String>,
    description: Option<String>,
    closes_at: Option<String>,
}

impl CreateVoteRequest {
    fn validate(self) -> Result<NewVote, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let title = errors.required_text("title", self.title);
        let closes_at = errors.datetime("closesAt", optional_text(self.closes_at));
        let Some(title) = title else {
            return Err(errors);
        };
        errors.check()?;
        Ok(NewVote {
            title,
            description: optional_text(self.description),
            closes_at,
        })
    }
}

/// List votes, newest first
#[utoipa::path(
    get,
    path = "/votes",
    tag = "votes",
    responses((status = 200, description = "Votes", body = [vote::Model]))
)]
#[tracing::instrument(skip_all)]
pub async fn list_votes(State(state): State<AppState>) -> Result<Json<Vec<vote::Model>>, AppError> {
    Ok(Json(votes::find_all(&state.db).await?))
}

/// Open a vote
#[utoipa::path(
    post,
    path = "/votes",
    tag = "votes",
    request_body = CreateVoteRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Vote created", body = vote::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_vote(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(request): Payload<CreateVoteRequest>,
) -> Result<Json<vote::Model>, AppError> {
    let new_vote = request.validate()?;
    Ok(Json(votes::create(&state.db, new_vote).await?))
}

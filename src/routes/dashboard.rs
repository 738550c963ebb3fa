use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    entities::{contribution, event, project},
    error::AppError,
    gateway::{contributions, events, projects, RECENT_LIMIT},
    AppState,
};

/// Landing overview: the latest ongoing projects, contributions and approved
/// events.
#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub projects: Vec<project::Model>,
    pub contributions: Vec<contribution::Model>,
    pub events: Vec<event::Model>,
}

/// Composite read for the landing page
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses((status = 200, description = "Most recent items of each kind", body = Dashboard))
)]
#[tracing::instrument(skip_all)]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    let (projects, contributions, events) = tokio::try_join!(
        projects::recent_ongoing(&state.db, RECENT_LIMIT),
        contributions::recent(&state.db, RECENT_LIMIT),
        events::recent_approved(&state.db, RECENT_LIMIT),
    )?;
    Ok(Json(Dashboard {
        projects,
        contributions,
        events,
    }))
}

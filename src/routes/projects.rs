use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use super::OkResponse;
use crate::{
    auth::RequireAdmin,
    entities::{project, ProjectStatus},
    error::AppError,
    gateway::projects::{self, NewProject, ProjectChanges, ProjectWithContributions},
    validation::{
        nullable, optional_text, ApiPath, ApiQuery, Payload, ValidationErrorBody, ValidationErrors,
    },
    AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectFilter {
    /// Only projects in this status (PLANNED, ONGOING, COMPLETED, CANCELLED)
    status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Required
    name: Option<String>,
    /// Required, unique, lowercase kebab-case
    slug: Option<String>,
    description: Option<String>,
    image: Option<String>,
    /// PLANNED when omitted
    status: Option<String>,
    start_at: Option<String>,
    end_at: Option<String>,
}

impl CreateProjectRequest {
    fn validate(self) -> Result<NewProject, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = errors.required_text("name", self.name);
        let slug = errors.slug("slug", self.slug);
        let status = errors.enum_value("status", self.status).unwrap_or_default();
        let start_at = errors.datetime("startAt", optional_text(self.start_at));
        let end_at = errors.datetime("endAt", optional_text(self.end_at));
        errors.ordered_range("endAt", start_at, end_at);

        let (Some(name), Some(slug)) = (name, slug) else {
            return Err(errors);
        };
        errors.check()?;

        Ok(NewProject {
            name,
            slug,
            description: optional_text(self.description),
            image: optional_text(self.image),
            status,
            start_at,
            end_at,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    name: Option<String>,
    slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    image: Option<Option<String>>,
    status: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    start_at: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    end_at: Option<Option<String>>,
}

impl UpdateProjectRequest {
    fn validate(self) -> Result<ProjectChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = errors.present_text("name", self.name);
        let slug = match self.slug {
            Some(raw) => errors.slug("slug", Some(raw)),
            None => None,
        };
        let status = errors.enum_value("status", self.status);
        let start_at = self
            .start_at
            .map(|raw| errors.datetime("startAt", optional_text(raw)));
        let end_at = self.end_at.map(|raw| errors.datetime("endAt", optional_text(raw)));
        if let (Some(start), Some(end)) = (start_at, end_at) {
            errors.ordered_range("endAt", start, end);
        }
        errors.check()?;

        Ok(ProjectChanges {
            name,
            slug,
            description: self.description.map(optional_text),
            image: self.image.map(optional_text),
            status,
            start_at,
            end_at,
        })
    }
}

/// List projects, newest first
#[utoipa::path(
    get,
    path = "/projects",
    tag = "projects",
    params(ProjectFilter),
    responses(
        (status = 200, description = "Projects", body = [project::Model]),
        (status = 400, description = "Unknown status", body = ValidationErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_projects(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProjectFilter>,
) -> Result<Json<Vec<project::Model>>, AppError> {
    let mut errors = ValidationErrors::default();
    let status = errors.enum_value::<ProjectStatus>("status", optional_text(filter.status));
    errors.check()?;
    Ok(Json(projects::find_all(&state.db, status).await?))
}

/// Get a project with its contributions
#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ProjectWithContributions),
        (status = 404, description = "No such project")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ProjectWithContributions>, AppError> {
    projects::find_with_contributions(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("project", id))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Project created", body = project::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 409, description = "Slug already used")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_project(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(request): Payload<CreateProjectRequest>,
) -> Result<Json<project::Model>, AppError> {
    let new_project = request.validate()?;
    let project = projects::create(&state.db, new_project).await?;
    info!(project_id = project.id, slug = %project.slug, "project created");
    Ok(Json(project))
}

/// Partially update a project
#[utoipa::path(
    put,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Project updated", body = project::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such project"),
        (status = 409, description = "Slug already used")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn update_project(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    Payload(request): Payload<UpdateProjectRequest>,
) -> Result<Json<project::Model>, AppError> {
    let changes = request.validate()?;
    projects::update(&state.db, id, changes)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("project", id))
}

/// Delete a project that no contribution references
#[utoipa::path(
    delete,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Project deleted", body = OkResponse),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such project"),
        (status = 409, description = "Contributions still reference the project")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_project(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<OkResponse>, AppError> {
    if !projects::delete(&state.db, id).await? {
        return Err(AppError::not_found("project", id));
    }
    info!(project_id = id, "project deleted");
    Ok(Json(OkResponse::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_to_planned() {
        let request: CreateProjectRequest =
            serde_json::from_str(r#"{"name":"Jardin","slug":"projet-jardin"}"#).unwrap();
        let project = request.validate().unwrap();
        assert_eq!(project.status, ProjectStatus::Planned);
        assert_eq!(project.start_at, None);
    }

    #[test]
    fn create_rejects_bad_slug_and_status() {
        let request: CreateProjectRequest =
            serde_json::from_str(r#"{"name":"Jardin","slug":"Projet Jardin","status":"DONE"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["slug", "status"]);
    }

    #[test]
    fn update_can_clear_dates() {
        let request: UpdateProjectRequest =
            serde_json::from_str(r#"{"status":"COMPLETED","endAt":null,"image":null}"#).unwrap();
        let changes = request.validate().unwrap();
        assert_eq!(changes.status, Some(ProjectStatus::Completed));
        assert_eq!(changes.end_at, Some(None));
        assert_eq!(changes.image, Some(None));
        assert_eq!(changes.start_at, None);
        assert_eq!(changes.name, None);
    }
}

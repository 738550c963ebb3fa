use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::RequireAdmin,
    entities::document,
    error::AppError,
    gateway::documents,
    validation::{ApiPath, ApiQuery, Payload, ValidationErrorBody, ValidationErrors},
    AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DocumentFilter {
    /// Only archived (`true`) or current (`false`) documents
    archived: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    /// Required
    title: Option<String>,
    /// Absolute http(s) URL
    url: Option<String>,
}

impl CreateDocumentRequest {
    fn validate(self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let title = errors.required_text("title", self.title);
        let url = errors.http_url("url", self.url);
        match (title, url) {
            (Some(title), Some(url)) => Ok((title, url)),
            _ => Err(errors),
        }
    }
}

/// List documents, newest first
#[utoipa::path(
    get,
    path = "/documents",
    tag = "documents",
    params(DocumentFilter),
    responses((status = 200, description = "Documents", body = [document::Model]))
)]
#[tracing::instrument(skip_all)]
pub async fn list_documents(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<DocumentFilter>,
) -> Result<Json<Vec<document::Model>>, AppError> {
    Ok(Json(documents::find_all(&state.db, filter.archived).await?))
}

/// Publish a document link
#[utoipa::path(
    post,
    path = "/documents",
    tag = "documents",
    request_body = CreateDocumentRequest,
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Document created", body = document::Model),
        (status = 400, description = "Invalid payload", body = ValidationErrorBody),
        (status = 401, description = "Missing or wrong admin token")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_document(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Payload(request): Payload<CreateDocumentRequest>,
) -> Result<Json<document::Model>, AppError> {
    let (title, url) = request.validate()?;
    let document = documents::create(&state.db, title, url).await?;
    info!(document_id = document.id, "document created");
    Ok(Json(document))
}

/// Archive a document
#[utoipa::path(
    post,
    path = "/documents/{id}/archive",
    tag = "documents",
    params(("id" = i32, Path, description = "Document id")),
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Document archived", body = document::Model),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "No such document")
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn archive_document(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<document::Model>, AppError> {
    let document = documents::archive(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("document", id))?;
    info!(document_id = id, "document archived");
    Ok(Json(document))
}

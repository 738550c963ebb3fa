use std::{sync::Arc, time::Duration};

use axum::{
    routing::{delete, get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod gateway;
pub mod routes;
pub mod validation;

use config::Config;
use routes::{
    antennas, contributions, dashboard, documents, events, health, payments, projects, quotas, shell, suggests,
    users, votes,
};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(auth::ADMIN_TOKEN_HEADER))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Association Admin API",
        version = "0.1.0",
        description = "Members, antennas, fees, projects, contributions, events and documents of an association"
    ),
    paths(
        shell::index,
        health::health_check,
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        antennas::list_antennas,
        antennas::create_antenna,
        antennas::delete_antenna,
        antennas::assign_member,
        quotas::list_quotas,
        quotas::create_quota,
        contributions::list_contributions,
        contributions::create_contribution,
        contributions::list_contribution_payments,
        contributions::add_contribution_payment,
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
        suggests::list_suggests,
        suggests::create_suggest,
        suggests::review_suggest,
        events::list_events,
        events::create_event,
        events::approve_event,
        documents::list_documents,
        documents::create_document,
        documents::archive_document,
        votes::list_votes,
        votes::create_vote,
        payments::list_payments,
        payments::create_payment,
        dashboard::dashboard
    ),
    components(schemas(
        validation::FieldError,
        validation::ValidationErrorBody,
        routes::OkResponse,
        entities::Role,
        entities::QuotaPeriod,
        entities::ProjectStatus,
        entities::EventScope,
        entities::SuggestStatus,
        entities::PaymentMethod,
        entities::ActivityAction
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(shell::index))
        .route("/health", get(health::health_check))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/antennas", get(antennas::list_antennas).post(antennas::create_antenna))
        .route("/antennas/{id}", delete(antennas::delete_antenna))
        .route("/antennas/{id}/assign", post(antennas::assign_member))
        .route("/quota-settings", get(quotas::list_quotas).post(quotas::create_quota))
        .route(
            "/contributions",
            get(contributions::list_contributions).post(contributions::create_contribution),
        )
        .route(
            "/contributions/{id}/payments",
            get(contributions::list_contribution_payments).post(contributions::add_contribution_payment),
        )
        .route("/projects", get(projects::list_projects).post(projects::create_project))
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/project-suggests",
            get(suggests::list_suggests).post(suggests::create_suggest),
        )
        .route("/project-suggests/{id}/review", post(suggests::review_suggest))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/{id}/approve", post(events::approve_event))
        .route("/documents", get(documents::list_documents).post(documents::create_document))
        .route("/documents/{id}/archive", post(documents::archive_document))
        .route("/votes", get(votes::list_votes).post(votes::create_vote))
        .route("/payments", get(payments::list_payments).post(payments::create_payment))
        .route("/dashboard", get(dashboard::dashboard));

    // Per-IP limiting needs the peer address, so only servers started with
    // connect info should set RATE_LIMIT_PER_MINUTE.
    let api_routes = match state.config.rate_limit_per_minute.filter(|n| *n > 0) {
        Some(per_minute) => {
            let replenish = Duration::from_millis((60_000 / u64::from(per_minute)).max(1));
            match GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .period(replenish)
                .burst_size(per_minute)
                .finish()
            {
                Some(governor_conf) => api_routes.layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                }),
                None => {
                    tracing::warn!(per_minute, "invalid rate limit, serving without one");
                    api_routes
                }
            }
        }
        None => api_routes,
    };

    let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(api_routes)
        .merge(docs_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};

#[tokio::test]
async fn test_duplicate_slug_conflicts_and_keeps_first() {
    let app = test_app().await;

    let (status, first) = admin_post(&app, "/projects", json!({"name": "Jardin", "slug": "projet-jardin"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "PLANNED");

    let (status, _) = admin_post(&app, "/projects", json!({"name": "Autre", "slug": "projet-jardin"})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, projects) = get(&app, "/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(projects[0]["name"], "Jardin");
}

#[tokio::test]
async fn test_projects_filter_update_and_delete() {
    let app = test_app().await;
    let (_, jardin) = admin_post(
        &app,
        "/projects",
        json!({"name": "Jardin", "slug": "jardin", "status": "ONGOING", "startAt": "2025-03-01"}),
    )
    .await;
    admin_post(&app, "/projects", json!({"name": "Puits", "slug": "puits"})).await;
    let id = jardin["id"].as_i64().unwrap();

    let (_, ongoing) = get(&app, "/projects?status=ONGOING").await;
    assert_eq!(ongoing.as_array().unwrap().len(), 1);
    assert_eq!(ongoing[0]["slug"], "jardin");

    let (status, body) = get(&app, "/projects?status=DONE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "status");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/projects/{id}"),
        Some(TOKEN),
        Some(json!({"status": "COMPLETED", "startAt": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "COMPLETED");
    assert_eq!(updated["startAt"], Value::Null);
    assert_eq!(updated["name"], "Jardin");

    let (status, _) = send(&app, "PUT", "/projects/999", Some(TOKEN), Some(json!({"name": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/projects/{id}"), Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, &format!("/projects/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contributions_and_their_payments() {
    let app = test_app().await;
    let (_, project) = admin_post(&app, "/projects", json!({"name": "Jardin", "slug": "jardin"})).await;
    let project_id = project["id"].as_i64().unwrap();
    let user_id = create_member(&app, "awa@asso.local").await;

    let (status, body) = admin_post(
        &app,
        "/contributions",
        json!({"name": "Outils", "projectId": project_id, "startAt": "2025-06-30", "endAt": "2025-06-01"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "endAt");

    let (status, contribution) = admin_post(
        &app,
        "/contributions",
        json!({"name": "Outils", "projectId": project_id, "startAt": "2025-06-01", "endAt": "2025-06-30"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let contribution_id = contribution["id"].as_i64().unwrap();

    let (_, contributions) = admin_get(&app, "/contributions").await;
    assert_eq!(contributions[0]["project"]["slug"], "jardin");

    let (_, detail) = get(&app, &format!("/projects/{project_id}")).await;
    assert_eq!(detail["contributions"][0]["name"], "Outils");

    let (status, paid) = admin_post(
        &app,
        &format!("/contributions/{contribution_id}/payments"),
        json!({"userId": user_id, "amount": 15.5}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["amount"], 15.5);

    let (status, payments) = admin_get(&app, &format!("/contributions/{contribution_id}/payments")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments[0]["user"]["email"], "awa@asso.local");
    assert_eq!(payments[0]["contributionId"], contribution_id);

    let (_, member) = admin_get(&app, &format!("/users/{user_id}")).await;
    assert_eq!(member["activities"][0]["action"], "CONTRIBUTION_PAID");

    let (status, _) = admin_post(&app, "/contributions/999/payments", json!({"userId": user_id, "amount": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = admin_get(&app, "/contributions/999/payments").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still referenced by the contribution
    let (status, _) = send(&app, "DELETE", &format!("/projects/{project_id}"), Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_approving_event_twice_keeps_it_approved() {
    let app = test_app().await;

    let (status, event) = send(
        &app,
        "POST",
        "/events",
        None,
        Some(json!({"title": "Réunion Mensuelle", "approved": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["approved"], false);
    assert_eq!(event["scope"], "GLOBAL");
    let id = event["id"].as_i64().unwrap();

    let (status, _) = send(&app, "POST", &format!("/events/{id}/approve"), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    for _ in 0..2 {
        let (status, approved) = send(&app, "POST", &format!("/events/{id}/approve"), Some(TOKEN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(approved["approved"], true);
    }

    let (_, approved) = get(&app, "/events?approved=true").await;
    assert_eq!(approved.as_array().unwrap().len(), 1);
    let (_, pending) = get(&app, "/events?approved=false").await;
    assert_eq!(pending, json!([]));

    let (status, _) = send(&app, "POST", "/events/999/approve", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_antenna_event_requires_antenna() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/events", None, Some(json!({"title": "Plage", "scope": "ANTENNA"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "antennaId");

    let (status, _) = send(
        &app,
        "POST",
        "/events",
        None,
        Some(json!({"title": "Plage", "scope": "ANTENNA", "antennaId": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_public_suggestion_and_guarded_review() {
    let app = test_app().await;
    let user_id = create_member(&app, "awa@asso.local").await;

    let (status, suggest) = send(
        &app,
        "POST",
        "/project-suggests",
        None,
        Some(json!({"name": "Bibliothèque", "description": "Un coin lecture", "userId": user_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(suggest["status"], "PENDING");
    assert_eq!(suggest["read"], false);
    let id = suggest["id"].as_i64().unwrap();

    let (status, _) = send(&app, "POST", &format!("/project-suggests/{id}/review"), None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, reviewed) = admin_post(&app, &format!("/project-suggests/{id}/review"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviewed["read"], true);
    assert_eq!(reviewed["status"], "PENDING");

    let (_, reviewed) = admin_post(&app, &format!("/project-suggests/{id}/review"), json!({"status": "APPROVED"})).await;
    assert_eq!(reviewed["status"], "APPROVED");

    let (_, suggests) = admin_get(&app, "/project-suggests").await;
    assert_eq!(suggests[0]["user"]["email"], "awa@asso.local");
    assert_eq!(suggests[0]["status"], "APPROVED");

    let (status, _) = admin_post(&app, "/project-suggests/999/review", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_without_body_marks_read() {
    let app = test_app().await;
    let user_id = create_member(&app, "awa@asso.local").await;
    let (_, suggest) = send(
        &app,
        "POST",
        "/project-suggests",
        None,
        Some(json!({"name": "Potager", "userId": user_id})),
    )
    .await;
    let id = suggest["id"].as_i64().unwrap();

    let (status, reviewed) = send(&app, "POST", &format!("/project-suggests/{id}/review"), Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK, "{reviewed}");
    assert_eq!(reviewed["read"], true);
    assert_eq!(reviewed["status"], "PENDING");
}

#[tokio::test]
async fn test_documents_archive() {
    let app = test_app().await;

    let (status, body) = admin_post(&app, "/documents", json!({"title": "Statuts", "url": "statuts.pdf"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "url");

    let (status, document) = admin_post(
        &app,
        "/documents",
        json!({"title": "Statuts", "url": "https://asso.example/statuts.pdf"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(document["archived"], false);
    let id = document["id"].as_i64().unwrap();

    let (status, archived) = send(&app, "POST", &format!("/documents/{id}/archive"), Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived["archived"], true);

    let (_, current) = get(&app, "/documents?archived=false").await;
    assert_eq!(current, json!([]));
    let (_, all) = get(&app, "/documents").await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_votes() {
    let app = test_app().await;

    let (status, _) = send(&app, "POST", "/votes", None, Some(json!({"title": "Budget 2025"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, vote) = admin_post(
        &app,
        "/votes",
        json!({"title": "Budget 2025", "closesAt": "2025-12-31T18:00:00Z"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vote["title"], "Budget 2025");

    let (status, votes) = get(&app, "/votes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(votes.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dashboard_caps_each_list_newest_first() {
    let app = test_app().await;

    for i in 0..10 {
        admin_post(
            &app,
            "/projects",
            json!({"name": format!("Projet {i}"), "slug": format!("projet-{i}"), "status": "ONGOING"}),
        )
        .await;
        admin_post(
            &app,
            "/contributions",
            json!({"name": format!("Cotisation {i}"), "startAt": "2025-01-01", "endAt": "2025-12-31"}),
        )
        .await;
        let (_, event) = send(&app, "POST", "/events", None, Some(json!({"title": format!("Événement {i}")}))).await;
        let id = event["id"].as_i64().unwrap();
        send(&app, "POST", &format!("/events/{id}/approve"), Some(TOKEN), None).await;
    }
    admin_post(&app, "/projects", json!({"name": "Idée", "slug": "idee"})).await;
    send(&app, "POST", "/events", None, Some(json!({"title": "En attente"}))).await;

    let (status, dashboard) = get(&app, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    for (key, label, newest) in [
        ("projects", "name", "Projet 9"),
        ("contributions", "name", "Cotisation 9"),
        ("events", "title", "Événement 9"),
    ] {
        let items = dashboard[key].as_array().unwrap();
        assert_eq!(items.len(), 8, "{key}");
        assert_eq!(items[0][label], newest, "{key}");
        let ids: Vec<i64> = items.iter().map(|item| item["id"].as_i64().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] > w[1]), "{key}: {ids:?}");
    }
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app().await;

    let (status, doc) = get(&app, "/api-doc/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/users/{id}"].is_object());
    assert!(doc["components"]["securitySchemes"]["admin_token"].is_object());
}

use association_admin::{
    config::Config,
    db,
    entities::{PaymentMethod, Role},
    error::AppError,
    gateway::{
        payments::{self, NewPayment},
        users::{self, NewUser},
    },
    validation::{FieldError, ValidationErrors},
};
use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use sea_orm::DbErr;
use serde_json::{json, Value};

async fn body_of(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_app_error_display() {
    assert_eq!(AppError::Unauthorized.to_string(), "Unauthorized");
    assert_eq!(AppError::not_found("project", 7).to_string(), "project 7 not found");
    assert_eq!(AppError::Conflict("duplicate slug".into()).to_string(), "Conflict: duplicate slug");
    assert_eq!(
        AppError::InternalError("pool closed".into()).to_string(),
        "Internal Server Error: pool closed"
    );
}

#[tokio::test]
async fn test_app_error_into_response() {
    let (status, body) = body_of(AppError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Unauthorized"}));

    let (status, body) = body_of(AppError::not_found("event", 3)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "event 3 not found"}));

    let (status, _) = body_of(AppError::Conflict("x".into())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = body_of(AppError::InternalError("x".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_validation_response_lists_fields() {
    let errors = ValidationErrors::from(vec![
        FieldError::new("email", "is required"),
        FieldError::new("role", "must be one of MEMBER"),
    ]);
    let (status, body) = body_of(AppError::from(errors)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Validation failed",
            "fields": [
                {"field": "email", "message": "is required"},
                {"field": "role", "message": "must be one of MEMBER"}
            ]
        })
    );
}

#[test]
fn test_db_errors_are_classified() {
    assert!(matches!(
        AppError::from(DbErr::RecordNotFound("user 4".into())),
        AppError::NotFound(_)
    ));
    assert!(matches!(AppError::from(DbErr::RecordNotUpdated), AppError::NotFound(_)));
    assert!(matches!(
        AppError::from(DbErr::Custom("boom".into())),
        AppError::InternalError(_)
    ));
}

fn member(email: &str) -> NewUser {
    NewUser {
        first_name: "Awa".into(),
        last_name: "Diop".into(),
        email: email.into(),
        phone: None,
        address: None,
        country: None,
        city: None,
        district: None,
        role: Role::Member,
        antenna_id: None,
    }
}

#[tokio::test]
async fn test_sqlite_constraint_errors_are_conflicts() {
    let db = db::connect(&Config::for_tests("t")).await.unwrap();
    let awa = users::create(&db, member("awa@asso.local")).await.unwrap();

    let duplicate = users::create(&db, member("awa@asso.local")).await.unwrap_err();
    assert!(matches!(AppError::from(duplicate), AppError::Conflict(_)));

    payments::create(
        &db,
        NewPayment {
            user_id: awa.id,
            amount: 50.0,
            method: PaymentMethod::Cash,
            note: None,
        },
    )
    .await
    .unwrap();
    let still_paid = users::delete(&db, awa.id).await.unwrap_err();
    assert!(matches!(AppError::from(still_paid), AppError::Conflict(_)));

    let dangling = payments::create(
        &db,
        NewPayment {
            user_id: 999,
            amount: 10.0,
            method: PaymentMethod::Auto,
            note: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(AppError::from(dangling), AppError::Conflict(_)));
}

//! Request body validation.
//!
//! Handlers never see raw JSON. A body is first deserialized into a loosely
//! typed request struct (every field optional, enums as plain strings) through
//! [`Payload`], then checked field by field into a typed input. Every failed
//! check is collected so one response reports all offending fields.

use axum::extract::{FromRequest, FromRequestParts, OptionalFromRequest, Request};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::ActiveEnum;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::error::AppError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern compiles"));

/// JSON body extractor whose rejection is a validation error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Payload<T>(pub T);

// A request without a JSON content type yields `None`, so bodies whose every
// field has a default may be left out entirely.
impl<T, S> OptionalFromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let json = <axum::Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(json.map(|axum::Json(value)| Payload(value)))
    }
}

/// Path parameters; a malformed segment is reported as a validation error.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string parameters, rejected the same way as [`ApiPath`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// One violated field in a request body.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the field as it appears in the JSON body
    pub field: String,
    /// What is wrong with the supplied value
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body returned with a 400 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub error: String,
    pub fields: Vec<FieldError>,
}

/// Accumulates field errors while a request is checked.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    fields: Vec<FieldError>,
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }
}

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields.push(FieldError::new(field, message));
    }

    /// `Err(self)` if anything was recorded.
    pub fn check(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Trimmed, non-empty text that must be present.
    pub fn required_text(&mut self, field: &str, raw: Option<String>) -> Option<String> {
        match raw.map(|s| s.trim().to_string()) {
            Some(s) if !s.is_empty() => Some(s),
            Some(_) => {
                self.push(field, "must not be empty");
                None
            }
            None => {
                self.push(field, "is required");
                None
            }
        }
    }

    /// Text that may be supplied; when supplied it must not be blank.
    pub fn present_text(&mut self, field: &str, raw: Option<String>) -> Option<String> {
        raw.and_then(|s| self.required_text(field, Some(s)))
    }

    pub fn required<T>(&mut self, field: &str, raw: Option<T>) -> Option<T> {
        if raw.is_none() {
            self.push(field, "is required");
        }
        raw
    }

    pub fn email(&mut self, field: &str, raw: Option<String>) -> Option<String> {
        let email = self.required_text(field, raw)?;
        if EMAIL_RE.is_match(&email) {
            Some(email)
        } else {
            self.push(field, "must be a valid email address");
            None
        }
    }

    pub fn slug(&mut self, field: &str, raw: Option<String>) -> Option<String> {
        let slug = self.required_text(field, raw)?;
        if SLUG_RE.is_match(&slug) {
            Some(slug)
        } else {
            self.push(field, "must be lowercase letters, digits and single hyphens");
            None
        }
    }

    pub fn http_url(&mut self, field: &str, raw: Option<String>) -> Option<String> {
        let text = self.required_text(field, raw)?;
        match Url::parse(&text) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(text),
            Ok(_) => {
                self.push(field, "must be an http or https URL");
                None
            }
            Err(e) => {
                self.push(field, format!("must be an absolute URL ({})", e));
                None
            }
        }
    }

    /// Parses a member of a closed string enum, listing accepted values on failure.
    pub fn enum_value<E>(&mut self, field: &str, raw: Option<String>) -> Option<E>
    where
        E: ActiveEnum<Value = String>,
    {
        let raw = raw?;
        match E::try_from_value(&raw.trim().to_string()) {
            Ok(value) => Some(value),
            Err(_) => {
                self.push(field, format!("must be one of {}", E::values().join(", ")));
                None
            }
        }
    }

    pub fn datetime(&mut self, field: &str, raw: Option<String>) -> Option<DateTime<Utc>> {
        let raw = raw?;
        match parse_datetime(&raw) {
            Some(at) => Some(at),
            None => {
                self.push(field, "must be an RFC 3339 date-time or a YYYY-MM-DD date");
                None
            }
        }
    }

    pub fn positive_amount(&mut self, field: &str, raw: Option<f64>) -> Option<f64> {
        let amount = self.required(field, raw)?;
        if amount.is_finite() && amount > 0.0 {
            Some(amount)
        } else {
            self.push(field, "must be greater than zero");
            None
        }
    }

    pub fn non_negative_amount(&mut self, field: &str, raw: Option<f64>) -> Option<f64> {
        let amount = self.required(field, raw)?;
        if amount.is_finite() && amount >= 0.0 {
            Some(amount)
        } else {
            self.push(field, "must not be negative");
            None
        }
    }

    pub fn year(&mut self, field: &str, raw: Option<i32>) -> Option<i32> {
        let year = self.required(field, raw)?;
        if (1900..=9999).contains(&year) {
            Some(year)
        } else {
            self.push(field, "must be between 1900 and 9999");
            None
        }
    }

    /// Records an error when both bounds are known and `end` precedes `start`.
    pub fn ordered_range(
        &mut self,
        field: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.push(field, "must not be before the start date");
            }
        }
    }
}

/// Trimmed optional text; blank becomes `None`.
pub fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC, the shape
/// HTML datetime inputs submit) or a bare date at midnight UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

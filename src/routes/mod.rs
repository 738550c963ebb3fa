pub mod antennas;
pub mod contributions;
pub mod dashboard;
pub mod documents;
pub mod events;
pub mod health;
pub mod payments;
pub mod projects;
pub mod quotas;
pub mod shell;
pub mod suggests;
pub mod users;
pub mod votes;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entities::ActivityAction, gateway::activities};

/// `{"ok": true}` acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends to the activity log after the primary write has succeeded.
///
/// The two writes are not atomic. A failed append is traced and otherwise
/// ignored so the caller still gets the record it created.
pub(crate) async fn append_activity(db: &DatabaseConnection, user_id: i32, action: ActivityAction) {
    if let Err(e) = activities::record(db, user_id, action).await {
        tracing::warn!(user_id, ?action, "failed to append activity: {}", e);
    }
}

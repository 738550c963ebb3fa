//! Persistence gateway: one module per entity, each operation a single
//! statement (or a lookup followed by one write) against the pool.
//!
//! Lookups by id return `Option`/`bool` for absence; everything else surfaces
//! as `DbErr`, which the API layer classifies (see `AppError::from`).

pub mod activities;
pub mod antennas;
pub mod contributions;
pub mod documents;
pub mod events;
pub mod payments;
pub mod projects;
pub mod quotas;
pub mod suggests;
pub mod users;
pub mod votes;

/// Size of each "most recent" list on the dashboard.
pub const RECENT_LIMIT: u64 = 8;

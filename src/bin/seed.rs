//! Fills an empty database with a minimal working set. Safe to run again:
//! every record is looked up before it is created.

use anyhow::Context;
use association_admin::{
    config::Config,
    db,
    entities::{EventScope, ProjectStatus, QuotaPeriod, Role},
    gateway::{
        antennas,
        events::{self, NewEvent},
        projects::{self, NewProject},
        quotas::{self, NewQuota},
        users::{self, NewUser},
    },
};
use chrono::{Datelike, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;

const ANTENNA_NAME: &str = "Antenne Ouakam";
const ADMIN_EMAIL: &str = "admin@asso.local";
const PROJECT_SLUG: &str = "projet-jardin";
const EVENT_TITLE: &str = "Réunion Mensuelle";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let db = db::connect(&config)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    let antenna = match antennas::find_by_name(&db, ANTENNA_NAME).await? {
        Some(antenna) => antenna,
        None => {
            info!("creating antenna {}", ANTENNA_NAME);
            antennas::create(&db, ANTENNA_NAME.to_string()).await?
        }
    };

    if users::find_by_email(&db, ADMIN_EMAIL).await?.is_none() {
        info!("creating admin member {}", ADMIN_EMAIL);
        users::create(
            &db,
            NewUser {
                first_name: "Admin".to_string(),
                last_name: "Association".to_string(),
                email: ADMIN_EMAIL.to_string(),
                phone: None,
                address: None,
                country: Some("Sénégal".to_string()),
                city: Some("Dakar".to_string()),
                district: Some("Ouakam".to_string()),
                role: Role::President,
                antenna_id: Some(antenna.id),
            },
        )
        .await?;
    }

    if quotas::count(&db).await? == 0 {
        let year = Utc::now().year();
        info!(year, "creating yearly quota");
        quotas::create(
            &db,
            NewQuota {
                period: QuotaPeriod::Yearly,
                amount: 50.0,
                year,
            },
        )
        .await?;
    }

    if projects::find_by_slug(&db, PROJECT_SLUG).await?.is_none() {
        info!("creating project {}", PROJECT_SLUG);
        projects::create(
            &db,
            NewProject {
                name: "Projet Jardin".to_string(),
                slug: PROJECT_SLUG.to_string(),
                description: Some("Jardin partagé du quartier".to_string()),
                image: None,
                status: ProjectStatus::Ongoing,
                start_at: Some(Utc::now()),
                end_at: None,
            },
        )
        .await?;
    }

    if events::find_by_title(&db, EVENT_TITLE).await?.is_none() {
        info!("creating event {}", EVENT_TITLE);
        events::create(
            &db,
            NewEvent {
                title: EVENT_TITLE.to_string(),
                scope: EventScope::Global,
                antenna_id: None,
                start_at: None,
                end_at: None,
                created_by: None,
            },
            true,
        )
        .await?;
    }

    info!("seed complete");
    Ok(())
}

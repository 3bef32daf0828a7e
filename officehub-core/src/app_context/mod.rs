use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::services::notification::{Notifier, TracingNotifier};

mod location_operations;
mod office_operations;
mod room_operations;
mod tag_operations;
mod user_operations;

/// Shared application context exposing the domain operations to the GraphQL
/// layer and to tests.
#[derive(Clone)]
pub struct AppContext {
    db: DatabaseConnection,
    config: Arc<AppConfig>,
    notifier: Arc<dyn Notifier>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let notifier = Arc::new(TracingNotifier::new(config.notifications.sender.clone()));
        Self::with_notifier(db, config, notifier)
    }

    pub fn with_notifier(
        db: DatabaseConnection,
        config: AppConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            notifier,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// ----- Public types -----
//
// `*Update` types serialise to the field maps consumed by the field updater,
// so their field names must match the entity columns.

#[derive(Clone, Debug, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub abbreviation: String,
    pub country: String,
    pub image_url: Option<String>,
    pub time_zone: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct LocationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewOffice {
    pub name: String,
    pub location_id: i32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct OfficeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TagUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewRoom {
    pub name: String,
    pub room_type: String,
    pub capacity: i32,
    pub location_id: i32,
    pub calendar_id: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Optional filters for room listings
#[derive(Clone, Debug, Default)]
pub struct RoomFilter {
    /// Exact capacity
    pub capacity: Option<i32>,
    /// Location name, case-insensitive
    pub location: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub location: Option<String>,
    pub picture: Option<String>,
}

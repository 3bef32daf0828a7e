use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DATABASE_ENV: &str = "OFFICEHUB_DATABASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: String,
    pub port: u16,
    pub cors_origin: Option<String>,
    pub pagination: PaginationConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_per_page: u64,
    pub max_per_page: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub sender: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: "officehub.db".to_string(),
            port: 3000,
            cors_origin: None,
            pagination: PaginationConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: 10,
            max_per_page: 100,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            sender: "officehub@localhost".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Invalid configuration")
    }

    /// Read the YAML file at `path`, falling back to defaults when no path is
    /// given. The database environment variable wins over the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_yaml_str(&content)?
            }
            None => Self::default(),
        };

        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.trim().is_empty() {
                config.database = database;
            }
        }

        Ok(config)
    }
}

//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Outbound mail settings
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// HTTP mail relay base URL; delivery is disabled when unset
    pub relay_url: Option<String>,
    /// From address on outbound mail
    pub sender: String,
    /// Where contact form submissions are delivered
    pub contact_recipient: String,
    /// Delivery attempts before an item is marked failed
    pub max_attempts: u32,
}

/// Queue housekeeping settings
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// How long delivered/failed items are kept, in hours
    pub retention_hours: u64,
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the SQLite database file
    pub database_path: String,
    /// HTTP server port
    pub server_port: u16,
    pub mail: MailConfig,
    pub queue: QueueConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/world_manager.db".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            mail: MailConfig {
                relay_url: env::var("MAIL_RELAY_URL").ok(),
                sender: env::var("MAIL_SENDER")
                    .unwrap_or_else(|_| "noreply@worldmanager.local".to_string()),
                contact_recipient: env::var("MAIL_CONTACT_RECIPIENT")
                    .unwrap_or_else(|_| "admin@worldmanager.local".to_string()),
                max_attempts: env::var("MAIL_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .context("MAIL_MAX_ATTEMPTS must be a number")?,
            },

            queue: QueueConfig {
                retention_hours: env::var("QUEUE_RETENTION_HOURS")
                    .unwrap_or_else(|_| "24".to_string())
                    .parse()
                    .context("QUEUE_RETENTION_HOURS must be a number")?,
            },
        })
    }
}

//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::services::{NoopReminderProcessor, ReminderJob};
use crate::utils::error::{ClubhouseError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ClubhouseError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

/// Build and run the server until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!(
        "Starting clubhouse {} for club type {}",
        crate::VERSION,
        config.rbac().club_type
    );

    let reminders = config.app.reminders.clone();
    let server = ServerBuilder::new().with_config(config).build().await?;
    if reminders.enabled {
        ReminderJob::new(Arc::new(NoopReminderProcessor), reminders.interval()).spawn();
    }

    info!("API endpoints:");
    info!("   GET    /health");
    info!("   GET    /api/permissions/me");
    info!("   GET    /api/roles, POST /api/roles");
    info!("   GET    /api/roles/{{id}}, PUT /api/roles/{{id}}, DELETE /api/roles/{{id}}");
    info!("   GET    /api/users/{{user_id}}/roles");
    info!("   PUT    /api/users/{{user_id}}/roles/{{role_id}}, DELETE same");
    info!("   GET    /api/users/{{user_id}}/permissions");
    info!("   GET    /api/audit/denials");

    server.start().await
}

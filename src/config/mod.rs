//! Configuration management for the service
//!
//! This module handles loading, validation, and management of all service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{ClubhouseError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Service configuration
    pub app: AppConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClubhouseError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let app: AppConfig = serde_yaml::from_str(content)
            .map_err(|e| ClubhouseError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { app };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from `CLUBHOUSE_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override settings from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CLUBHOUSE_HOST") {
            self.app.server.host = host;
        }
        if let Some(port) = lookup("CLUBHOUSE_PORT") {
            self.app.server.port = port
                .parse()
                .map_err(|_| ClubhouseError::Config(format!("Invalid CLUBHOUSE_PORT: {}", port)))?;
        }
        if let Some(url) = lookup("CLUBHOUSE_DATABASE_URL") {
            self.app.storage.database.url = url;
            self.app.storage.database.enabled = true;
        }
        if let Some(secret) = lookup("CLUBHOUSE_JWT_SECRET") {
            self.app.auth.jwt_secret = secret;
        }
        if let Some(club_type) = lookup("CLUBHOUSE_CLUB_TYPE") {
            self.app.rbac.club_type = club_type;
        }
        if let Some(level) = lookup("CLUBHOUSE_LOG_LEVEL") {
            self.app.logging.level = level;
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.app.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.app.auth
    }

    /// Get RBAC configuration
    pub fn rbac(&self) -> &RbacConfig {
        &self.app.rbac
    }

    /// Get directory configuration
    pub fn directory(&self) -> &DirectoryConfig {
        &self.app.directory
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.app
            .server
            .validate()
            .map_err(|e| ClubhouseError::Config(format!("Server config error: {}", e)))?;

        self.app
            .storage
            .database
            .validate()
            .map_err(|e| ClubhouseError::Config(format!("Database config error: {}", e)))?;

        self.app
            .auth
            .validate()
            .map_err(|e| ClubhouseError::Config(format!("Auth config error: {}", e)))?;

        self.app
            .rbac
            .validate()
            .map_err(|e| ClubhouseError::Config(format!("RBAC config error: {}", e)))?;

        self.app
            .directory
            .validate()
            .map_err(|e| ClubhouseError::Config(format!("Directory config error: {}", e)))?;

        self.app
            .reminders
            .validate()
            .map_err(|e| ClubhouseError::Config(format!("Reminder config error: {}", e)))?;

        crate::config::models::auth::warn_insecure_config(&self.app.auth);

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.app)
            .map_err(|e| ClubhouseError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

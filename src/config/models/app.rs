//! Top-level service configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Service configuration as read from the YAML file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Caller identity settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Role resolution and declaration settings
    #[serde(default)]
    pub rbac: RbacConfig,
    /// Static user directory
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Reminder job settings
    #[serde(default)]
    pub reminders: ReminderConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

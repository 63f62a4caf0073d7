//! Reminder job configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_reminder_interval_hours")]
    pub interval_hours: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_hours: default_reminder_interval_hours(),
        }
    }
}

impl ReminderConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours * 3600)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.interval_hours == 0 {
            return Err("Reminder interval cannot be 0 hours".to_string());
        }
        Ok(())
    }
}

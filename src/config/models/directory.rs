//! Static user directory configuration

use serde::{Deserialize, Serialize};

/// Users known to the service and their external groups
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub users: Vec<DirectoryUser>,
}

/// One platform user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl DirectoryConfig {
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for user in &self.users {
            if user.id.trim().is_empty() {
                return Err("Directory user id cannot be empty".to_string());
            }
            if !seen.insert(user.id.as_str()) {
                return Err(format!("Duplicate directory user: {}", user.id));
            }
        }
        Ok(())
    }
}

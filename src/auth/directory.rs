//! User directory of the hosting platform
//!
//! Answers whether a user exists and which external groups they belong to.

use crate::config::DirectoryConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Platform user lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, user_id: &str) -> Result<bool>;

    /// External group names of the user; empty for unknown users
    async fn groups_for_user(&self, user_id: &str) -> Result<Vec<String>>;
}

/// Directory loaded from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: HashMap<String, Vec<String>>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        let users = config
            .users
            .iter()
            .map(|u| (u.id.clone(), u.groups.clone()))
            .collect();
        Self { users }
    }

    pub fn with_user<I, S>(mut self, user_id: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users
            .insert(user_id.into(), groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn user_exists(&self, user_id: &str) -> Result<bool> {
        Ok(self.users.contains_key(user_id))
    }

    async fn groups_for_user(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self.users.get(user_id).cloned().unwrap_or_default())
    }
}

//! Mapping of external groups to role names

use crate::config::RbacConfig;
use std::collections::{BTreeMap, BTreeSet};

/// Translates the groups a user belongs to into implied role names
///
/// A group implies a role when it is listed in the explicit mapping or when it
/// is named `<prefix><role name>`.
#[derive(Debug, Clone, Default)]
pub struct GroupRoleMapper {
    prefix: String,
    explicit: BTreeMap<String, String>,
}

impl GroupRoleMapper {
    pub fn new(prefix: impl Into<String>, explicit: BTreeMap<String, String>) -> Self {
        Self {
            prefix: prefix.into(),
            explicit,
        }
    }

    pub fn from_config(config: &RbacConfig) -> Self {
        Self::new(config.group_role_prefix.clone(), config.group_roles.clone())
    }

    /// Implied role names, sorted and without duplicates
    pub fn role_names<S: AsRef<str>>(&self, groups: &[S]) -> Vec<String> {
        let mut names = BTreeSet::new();
        for group in groups {
            let group = group.as_ref().trim();

            if let Some(role) = self.explicit.get(group) {
                names.insert(role.trim().to_string());
            }

            if !self.prefix.is_empty() {
                if let Some(role) = group.strip_prefix(&self.prefix) {
                    let role = role.trim();
                    if !role.is_empty() {
                        names.insert(role.to_string());
                    }
                }
            }
        }
        names.into_iter().collect()
    }
}

//! RBAC configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// RBAC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Club type of this installation; default scope for new roles and group-implied roles
    #[serde(default = "default_club_type")]
    pub club_type: String,
    /// Groups named `<prefix><role name>` imply that role. Empty disables the convention.
    #[serde(default = "default_group_role_prefix")]
    pub group_role_prefix: String,
    /// Explicit group name to role name mapping
    #[serde(default)]
    pub group_roles: BTreeMap<String, String>,
    /// Roles created at startup when absent
    #[serde(default)]
    pub seed_roles: Vec<RoleSeed>,
    /// Additional permission declarations
    #[serde(default)]
    pub operations: Vec<OperationDeclaration>,
    /// Number of recent denials kept for the audit endpoint
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            club_type: default_club_type(),
            group_role_prefix: default_group_role_prefix(),
            group_roles: BTreeMap::new(),
            seed_roles: Vec::new(),
            operations: Vec::new(),
            audit_capacity: default_audit_capacity(),
        }
    }
}

impl RbacConfig {
    /// Validate RBAC configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.club_type.trim().is_empty() {
            return Err("Club type cannot be empty".to_string());
        }

        for (group, role) in &self.group_roles {
            if group.trim().is_empty() || role.trim().is_empty() {
                return Err("Group role mappings need a group and a role name".to_string());
            }
        }

        for seed in &self.seed_roles {
            if seed.name.trim().is_empty() {
                return Err("Seed role name cannot be empty".to_string());
            }
            if seed.permissions.iter().any(|p| p.trim().is_empty()) {
                return Err(format!("Seed role '{}' has an empty permission", seed.name));
            }
        }

        for declaration in &self.operations {
            declaration.validate()?;
        }

        Ok(())
    }
}

/// A role created at startup if no role with that name exists in its club type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSeed {
    pub name: String,
    /// Defaults to the installation's club type
    #[serde(default)]
    pub club_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Permission declaration supplied by configuration
///
/// Without `operation` the permissions apply to the whole resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDeclaration {
    pub resource: String,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Route served by this operation
    #[serde(default)]
    pub route: Option<RouteDeclaration>,
}

impl OperationDeclaration {
    pub fn validate(&self) -> Result<(), String> {
        if self.resource.trim().is_empty() {
            return Err("Operation declaration needs a resource".to_string());
        }
        if self.permissions.iter().any(|p| p.trim().is_empty()) {
            return Err(format!(
                "Operation declaration for '{}' has an empty permission",
                self.resource
            ));
        }
        if let Some(route) = &self.route {
            if self.operation.is_none() {
                return Err(format!(
                    "Route {} {} must name an operation of '{}'",
                    route.method, route.path, self.resource
                ));
            }
            route.validate()?;
        }
        Ok(())
    }
}

/// HTTP route bound to a declared operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDeclaration {
    pub method: String,
    pub path: String,
}

impl RouteDeclaration {
    pub fn validate(&self) -> Result<(), String> {
        if actix_web::http::Method::from_bytes(self.method.to_uppercase().as_bytes()).is_err() {
            return Err(format!("Invalid HTTP method: {}", self.method));
        }
        if !self.path.starts_with('/') {
            return Err(format!("Route path must start with '/': {}", self.path));
        }
        Ok(())
    }
}

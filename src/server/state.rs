//! Application state shared across HTTP handlers

use crate::auth::directory::{StaticUserDirectory, UserDirectory};
use crate::auth::identity::{self, CallerIdentity};
use crate::auth::jwt::JwtHandler;
use crate::auth::rbac::{AuditLog, AuthorizationGate, PermissionRegistry, RbacSystem};
use crate::config::Config;
use crate::server::routes;
use crate::storage::{self, RoleStore};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so every worker shares one instance.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Roles, assignments and permission resolution
    pub rbac: Arc<RbacSystem>,
    /// Request-time permission enforcement
    pub gate: Arc<AuthorizationGate>,
    /// Caller identification
    pub identity: Arc<dyn CallerIdentity>,
    /// Recent denials
    pub audit: Arc<AuditLog>,
    /// Token issuing and verification
    pub jwt: Arc<JwtHandler>,
}

impl AppState {
    /// Assemble the state around an existing store and directory
    pub fn new(
        config: Config,
        store: Arc<dyn RoleStore>,
        directory: Arc<dyn UserDirectory>,
    ) -> Result<Self> {
        let rbac_config = config.rbac();

        let registry = routes::declare_operations(PermissionRegistry::builder())
            .declare_all(&rbac_config.operations)
            .build()?;
        info!(
            "Permission registry ready with {} declarations and {} routes",
            registry.declared_count(),
            registry.bindings().len()
        );

        let rbac = Arc::new(RbacSystem::new(rbac_config, store, directory));
        let audit = Arc::new(AuditLog::new(rbac_config.audit_capacity));
        let gate = Arc::new(AuthorizationGate::new(
            Arc::new(registry),
            rbac.clone(),
            audit.clone(),
        ));
        let jwt = Arc::new(JwtHandler::new(config.auth()));
        let identity = identity::from_config(config.auth(), jwt.clone())?;

        Ok(Self {
            config: Arc::new(config),
            rbac,
            gate,
            identity,
            audit,
            jwt,
        })
    }

    /// Connect storage, load the directory and seed the configured roles
    pub async fn from_config(config: Config) -> Result<Self> {
        let store = storage::connect(config.storage()).await?;
        let directory = Arc::new(StaticUserDirectory::from_config(config.directory()));
        let state = Self::new(config, store, directory)?;

        state
            .rbac
            .seed_roles(&state.config.rbac().seed_roles)
            .await?;
        Ok(state)
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

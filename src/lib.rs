//! # Clubhouse
//!
//! Role-based access control for a membership and association management add-on.
//!
//! ## Features
//!
//! - **Permission declarations**: operations declare the permission strings they need
//! - **Role store**: named roles scoped by club type, assigned to platform users
//! - **Permission resolution**: a user's effective permissions are the union over
//!   their direct and group-implied roles
//! - **Authorization gate**: request-time enforcement with a 403 on the first
//!   missing permission
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use clubhouse::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/clubhouse.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedded
//!
//! ```rust,no_run
//! use clubhouse::auth::rbac::{NewRole, OperationKey};
//! use clubhouse::server::AppState;
//!
//! # async fn run(state: AppState) -> clubhouse::Result<()> {
//! let treasurer = state
//!     .rbac
//!     .create_role(NewRole::new("Treasurer").with_permissions(["finance.export"]))
//!     .await?;
//! state.rbac.assign_role("alice", treasurer.id).await?;
//!
//! let decision = state
//!     .gate
//!     .authorize(&OperationKey::new("finance", "export"), Some("alice"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::rbac::{
    AuthorizationGate, GateDecision, NewRole, OperationKey, PermissionRegistry, RbacSystem, Role,
};
pub use config::Config;
pub use storage::RoleStore;
pub use utils::error::{ClubhouseError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("CLUBHOUSE_BUILD_TIME"),
            git_hash: env!("CLUBHOUSE_GIT_HASH"),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, built {})", self.version, self.git_hash, self.build_time)
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}

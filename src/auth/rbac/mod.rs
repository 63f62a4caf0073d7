//! Role-Based Access Control (RBAC) system
//!
//! Permission declarations, role administration, permission resolution and the
//! authorization gate that enforces them.

pub mod audit;
pub mod gate;
pub mod group_mapping;
pub mod helpers;
mod permissions;
pub mod registry;
mod system;
mod types;

// Re-export public types and structs
pub use audit::{AuditLog, AuditRecorder, DenialEvent, DenialKind};
pub use gate::{AuthorizationGate, DenialReason, GateDecision};
pub use group_mapping::GroupRoleMapper;
pub use permissions::PermissionResolver;
pub use registry::{PermissionRegistry, PermissionRegistryBuilder, RouteBinding};
pub use system::RbacSystem;
pub use types::{
    DEFAULT_CLUB_TYPE, NewRole, OperationKey, PermissionCheck, Role, RoleUpdate,
};

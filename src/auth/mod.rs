//! Authentication and authorization
//!
//! Caller identification, the platform user directory and role-based access control.

pub mod directory;
pub mod identity;
pub mod jwt;
pub mod rbac;

// Re-export commonly used types
pub use directory::{StaticUserDirectory, UserDirectory};
pub use identity::{CallerIdentity, JwtIdentity, TrustedHeaderIdentity};
pub use jwt::JwtHandler;
pub use rbac::{AuthorizationGate, GateDecision, OperationKey, PermissionRegistry, RbacSystem};

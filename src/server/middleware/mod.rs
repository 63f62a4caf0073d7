//! HTTP middleware

mod caller;
mod permission_gate;

pub use caller::Caller;
pub use permission_gate::{PermissionGate, PermissionGateService};

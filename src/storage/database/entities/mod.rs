/// Role entity module
pub mod role;
/// User role assignment entity module
pub mod user_role;

pub use role::Entity as Role;
pub use user_role::Entity as UserRole;

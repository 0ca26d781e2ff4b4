//! Bearer-token authorization.
//!
//! Token issuance belongs to the identity service; this module only verifies
//! HS256 tokens signed with the shared secret and gates routers by role.

pub mod gate;
pub mod jwt;
pub mod role;

pub use gate::{require_role, CurrentUser, RoleGate};
pub use jwt::{Claims, JwtKeys};
pub use role::UserRole;

/// Roles admitted to event management.
pub const EVENT_MANAGERS: &[UserRole] = &[UserRole::Admin, UserRole::Manager];

//! Well-known platform role constants.
//!
//! These must match the `type` claim issued by the platform's login
//! endpoint. The console only ever admits the ONG role.

/// NGO organization account.
pub const ROLE_ONG: &str = "ONG";

/// Individual donor account.
pub const ROLE_DONOR: &str = "DONOR";

/// The single role allowed to open a console session.
pub const ALLOWED_ROLE: &str = ROLE_ONG;

/// Returns `true` if `role` may hold a console session.
pub fn is_allowed_role(role: &str) -> bool {
    role == ALLOWED_ROLE
}

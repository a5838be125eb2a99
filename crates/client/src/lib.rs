//! Typed HTTP client for the GreenHub platform API.
//!
//! Every remote operation has an explicit request/response schema and is
//! parsed at the boundary; a shape mismatch is an error, never a silently
//! missing field.

pub mod api;
pub mod schemas;
pub mod traits;

pub use api::{ApiClient, ApiError};
pub use traits::{AuthApi, ProjectApi};

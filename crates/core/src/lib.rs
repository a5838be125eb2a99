//! Domain types and validation for the GreenHub ONG console.
//!
//! Everything in this crate is pure: no network, no filesystem. The only
//! binary-data work is decoding image headers in memory to read pixel
//! dimensions before an attachment is accepted.

pub mod category;
pub mod credentials;
pub mod draft;
pub mod image;
pub mod roles;
pub mod types;

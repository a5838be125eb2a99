//! The GreenHub ONG administration console.
//!
//! A thin terminal front end over the platform's HTTP API: session
//! handling (login, restore, logout, role gate) and the project draft
//! form (category loading, validation, AI-assisted content, image
//! attachment, multipart submission).

pub mod auth;
pub mod commands;
pub mod config;
pub mod form;
pub mod session;

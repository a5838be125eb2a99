//! Request and response schemas for every platform API operation.

use serde::{Deserialize, Serialize};

use greenhub_core::image::ImageAttachment;
use greenhub_core::types::DbId;

/// Body of `POST /login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /login`: a JWT-style bearer token.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Organization registration body for `POST /ong`.
#[derive(Debug, Serialize)]
pub struct OngRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /gemini/createInfo`.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub description: &'a str,
}

/// Envelope returned by `POST /gemini/createInfo`.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub data: GeneratedContent,
}

/// AI-generated project content.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub description: String,
}

/// A validated draft, ready to be assembled into one multipart request.
#[derive(Debug, Clone)]
pub struct ProjectSubmission {
    pub name: String,
    pub description: String,
    pub category_id: DbId,
    pub image: Option<ImageAttachment>,
}

//! REST client for the GreenHub platform HTTP endpoints.
//!
//! Wraps login, organization registration, category listing, AI content
//! generation, and project creation using [`reqwest`].

use std::time::Duration;

use greenhub_core::category::Category;
use greenhub_core::types::DbId;

use crate::schemas::{
    GenerateContentRequest, GenerateContentResponse, GeneratedContent, LoginRequest,
    LoginResponse, OngRegistration, ProjectSubmission,
};

/// HTTP client for one GreenHub platform deployment.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the platform REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Server error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message when present, else a generic fallback.
        message: String,
    },
}

/// Fallback message used when a failed response carries no `message` field.
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

impl ApiClient {
    /// Create a new client for a platform deployment.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:3333`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client with an overall per-request timeout.
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Authenticate with the platform.
    ///
    /// Sends `POST /login`. The returned token is opaque here; decoding
    /// and the role gate happen in the session layer.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Register a new ONG account.
    ///
    /// Sends `POST /ong`. The response body is not meaningful.
    pub async fn register_account(&self, body: &OngRegistration) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/ong", self.base_url))
            .json(body)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Fetch the ordered category reference list.
    ///
    /// Sends `GET /category`.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self
            .client
            .get(format!("{}/category", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Generate a project title and description from a free-text seed.
    ///
    /// Sends `POST /gemini/createInfo` and unwraps the `data` envelope.
    pub async fn generate_project_content(
        &self,
        description: &str,
    ) -> Result<GeneratedContent, ApiError> {
        let response = self
            .client
            .post(format!("{}/gemini/createInfo", self.base_url))
            .json(&GenerateContentRequest { description })
            .send()
            .await?;

        let envelope: GenerateContentResponse = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Submit a project as a single multipart request.
    ///
    /// Sends `POST /project/create/{ong_id}` with fields `name`,
    /// `description`, `categoryProjectId`, and the optional
    /// `project-image` part, authenticated with `token`.
    pub async fn create_project(
        &self,
        token: &str,
        ong_id: DbId,
        submission: ProjectSubmission,
    ) -> Result<serde_json::Value, ApiError> {
        let mut form = reqwest::multipart::Form::new()
            .text("name", submission.name)
            .text("description", submission.description)
            .text("categoryProjectId", submission.category_id.to_string());

        if let Some(image) = submission.image {
            let part = reqwest::multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(image.media_type.as_mime())?;
            form = form.part("project-image", part);
        }

        let response = self
            .client
            .post(format!("{}/project/create/{}", self.base_url, ong_id))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        tracing::debug!(ong_id, "Project submission sent");
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`ApiError::Api`] carrying the server's
    /// `message` field (when the body has one) on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected schema.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Extract the `message` field from an error body, falling back to
/// [`GENERIC_SERVER_ERROR`] when the body has no usable message.
fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_extracted_from_json_body() {
        let body = r#"{"message":"Invalid email or password"}"#;
        assert_eq!(server_message(body), "Invalid email or password");
    }

    #[test]
    fn test_server_message_falls_back_on_non_json_body() {
        assert_eq!(server_message("<html>502</html>"), GENERIC_SERVER_ERROR);
    }

    #[test]
    fn test_server_message_falls_back_on_missing_field() {
        assert_eq!(server_message(r#"{"error":"nope"}"#), GENERIC_SERVER_ERROR);
    }

    #[test]
    fn test_api_error_display_includes_status_and_message() {
        let err = ApiError::Api {
            status: 401,
            message: "Invalid email or password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server error (401): Invalid email or password"
        );
    }
}

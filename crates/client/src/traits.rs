//! Seam traits over the remote API.
//!
//! The session store and the draft form depend on these traits rather than
//! on [`ApiClient`](crate::ApiClient) directly, so their state machines can
//! be driven by a stub in tests.

use async_trait::async_trait;

use greenhub_core::category::Category;
use greenhub_core::types::DbId;

use crate::api::{ApiClient, ApiError};
use crate::schemas::{GeneratedContent, LoginResponse, ProjectSubmission};

/// The authentication surface of the remote API.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
}

/// The project-creation surface of the remote API.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    async fn generate_project_content(
        &self,
        description: &str,
    ) -> Result<GeneratedContent, ApiError>;

    async fn create_project(
        &self,
        token: &str,
        ong_id: DbId,
        submission: ProjectSubmission,
    ) -> Result<serde_json::Value, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        ApiClient::login(self, email, password).await
    }
}

#[async_trait]
impl ProjectApi for ApiClient {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        ApiClient::list_categories(self).await
    }

    async fn generate_project_content(
        &self,
        description: &str,
    ) -> Result<GeneratedContent, ApiError> {
        ApiClient::generate_project_content(self, description).await
    }

    async fn create_project(
        &self,
        token: &str,
        ong_id: DbId,
        submission: ProjectSubmission,
    ) -> Result<serde_json::Value, ApiError> {
        ApiClient::create_project(self, token, ong_id, submission).await
    }
}

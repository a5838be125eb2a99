//! Session store and role gate.
//!
//! Single source of truth for "is the user authenticated, and as whom".
//! The token and its decoded identity always change together: a session is
//! either fully established (token decoded, role admitted, file persisted)
//! or absent.

use std::fs;
use std::path::PathBuf;

use validator::Validate;

use greenhub_client::api::GENERIC_SERVER_ERROR;
use greenhub_client::{ApiError, AuthApi};
use greenhub_core::credentials::Credentials;
use greenhub_core::roles;
use greenhub_core::types::DbId;

use crate::auth::{decode_claims, Claims};

/// An established session: the bearer token plus its decoded identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub identity: Claims,
}

impl Session {
    /// The id of the organization this session administers.
    pub fn ong_id(&self) -> Option<DbId> {
        self.identity.ong.as_ref().map(|o| o.id)
    }
}

/// Authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The server issued a valid token, but for a role the console does
    /// not admit.
    #[error("Access restricted. Only accounts registered as an ONG may sign in")]
    Forbidden,

    /// Bad credentials, transport failure, or an unusable token. Carries
    /// the server's message when one was provided.
    #[error("{0}")]
    Invalid(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            // `message` already falls back to the generic text when the
            // server body had none.
            ApiError::Api { message, .. } => AuthError::Invalid(message),
            ApiError::Request(e) => {
                tracing::warn!(error = %e, "Login transport failure");
                AuthError::Invalid(GENERIC_SERVER_ERROR.to_string())
            }
        }
    }
}

/// Holds the current session and its single durable side effect: the
/// token file. Absence of the file means "logged out".
pub struct SessionStore {
    token_path: PathBuf,
    session: Option<Session>,
}

impl SessionStore {
    pub fn new(token_path: PathBuf) -> Self {
        Self {
            token_path,
            session: None,
        }
    }

    /// The current session, if one is established.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Authenticate against the platform and establish a session.
    ///
    /// Credentials are validated locally first; then the token returned by
    /// `POST /login` is decoded and gated on the ONG role. A token for any
    /// other role is discarded — nothing is persisted and the store stays
    /// unset — even though the server considered the credentials valid.
    pub async fn login(
        &mut self,
        api: &dyn AuthApi,
        credentials: &Credentials,
    ) -> Result<&Session, AuthError> {
        credentials
            .validate()
            .map_err(|e| AuthError::Invalid(first_violation_message(&e)))?;

        let response = api.login(&credentials.email, &credentials.password).await?;

        let identity = decode_claims(&response.token)
            .map_err(|e| AuthError::Invalid(format!("Unusable token from server: {e}")))?;

        if !roles::is_allowed_role(&identity.role) {
            tracing::warn!(role = %identity.role, "Login refused by role gate");
            return Err(AuthError::Forbidden);
        }

        self.persist_token(&response.token)?;
        tracing::info!(sub = identity.sub, "Session established");

        self.session = Some(Session {
            token: response.token,
            identity,
        });
        Ok(self.session.as_ref().expect("session was just established"))
    }

    /// Restore a previously persisted session without contacting the
    /// server.
    ///
    /// A missing file means logged out. A file whose token no longer
    /// decodes (malformed, or expired `exp`) fails safe: the stale file is
    /// removed and no session is established.
    pub fn restore(&mut self) -> Option<&Session> {
        let token = match fs::read_to_string(&self.token_path) {
            Ok(token) => token.trim().to_string(),
            Err(_) => return None,
        };

        match decode_claims(&token) {
            Ok(identity) => {
                tracing::debug!(sub = identity.sub, "Session restored from disk");
                self.session = Some(Session { token, identity });
                self.session.as_ref()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Persisted token no longer decodes; discarding it");
                let _ = fs::remove_file(&self.token_path);
                None
            }
        }
    }

    /// Clear the session from memory and durable storage.
    ///
    /// Safe to call when no session exists.
    pub fn logout(&mut self) {
        self.session = None;
        match fs::remove_file(&self.token_path) {
            Ok(()) => tracing::info!("Session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, "Could not remove token file"),
        }
    }

    /// Write the token file, creating parent directories as needed.
    fn persist_token(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AuthError::Invalid(format!("Could not persist session: {e}")))?;
        }
        fs::write(&self.token_path, token)
            .map_err(|e| AuthError::Invalid(format!("Could not persist session: {e}")))
    }
}

/// Flatten a `validator` error report into its first human-readable
/// message.
fn first_violation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid credentials".to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use tempfile::TempDir;

    use greenhub_client::schemas::LoginResponse;

    use super::*;
    use crate::auth::tests::{mint_token, ong_claims};

    /// Stub login endpoint returning a fixed result.
    struct StubAuth {
        result: Result<String, (u16, String)>,
    }

    impl StubAuth {
        fn issuing(token: String) -> Self {
            Self { result: Ok(token) }
        }

        fn failing(status: u16, message: &str) -> Self {
            Self {
                result: Err((status, message.to_string())),
            }
        }
    }

    #[async_trait]
    impl AuthApi for StubAuth {
        async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
            match &self.result {
                Ok(token) => Ok(LoginResponse {
                    token: token.clone(),
                }),
                Err((status, message)) => Err(ApiError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("token"))
    }

    fn creds() -> Credentials {
        Credentials::new("a@b.com", "1234")
    }

    #[tokio::test]
    async fn test_login_establishes_and_persists_session() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = store_in(&dir);
        let api = StubAuth::issuing(mint_token(&ong_claims()));

        let session = store.login(&api, &creds()).await.expect("login succeeds");
        assert_eq!(session.identity.sub, 42);
        assert_eq!(session.ong_id(), Some(7));
        assert!(dir.path().join("token").exists());
    }

    #[tokio::test]
    async fn test_disallowed_role_is_forbidden_and_nothing_persisted() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = store_in(&dir);

        let mut claims = ong_claims();
        claims.role = "DONOR".to_string();
        let api = StubAuth::issuing(mint_token(&claims));

        let result = store.login(&api, &creds()).await;
        assert_matches!(result, Err(AuthError::Forbidden));
        assert!(store.session().is_none());
        assert!(
            !dir.path().join("token").exists(),
            "a refused token must not be persisted"
        );
    }

    #[tokio::test]
    async fn test_server_message_surfaces_on_invalid_credentials() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = store_in(&dir);
        let api = StubAuth::failing(401, "Invalid email or password");

        let result = store.login(&api, &creds()).await;
        assert_matches!(result, Err(AuthError::Invalid(msg)) => {
            assert_eq!(msg, "Invalid email or password");
        });
        assert!(store.session().is_none());
    }

    #[tokio::test]
    async fn test_local_credential_validation_blocks_network_call() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = store_in(&dir);
        // The stub would succeed, but validation must reject first.
        let api = StubAuth::issuing(mint_token(&ong_claims()));

        let result = store
            .login(&api, &Credentials::new("not-an-email", "1234"))
            .await;
        assert_matches!(result, Err(AuthError::Invalid(_)));
        assert!(store.session().is_none());
    }

    #[tokio::test]
    async fn test_restore_then_logout_clears_durable_storage() {
        let dir = TempDir::new().expect("tempdir");
        let api = StubAuth::issuing(mint_token(&ong_claims()));

        {
            let mut store = store_in(&dir);
            store.login(&api, &creds()).await.expect("login succeeds");
        }

        // Fresh store, as after a process restart.
        let mut store = store_in(&dir);
        assert!(store.restore().is_some());

        store.logout();
        assert!(store.session().is_none());

        let mut store = store_in(&dir);
        assert!(
            store.restore().is_none(),
            "restore after logout must yield no session"
        );
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = store_in(&dir);

        store.logout();
        store.logout();
        assert!(store.session().is_none());
        assert!(!dir.path().join("token").exists());
    }

    #[test]
    fn test_restore_fails_safe_on_corrupted_token() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("token");
        std::fs::write(&path, "corrupted-garbage").expect("write");

        let mut store = store_in(&dir);
        assert!(store.restore().is_none());
        assert!(!path.exists(), "stale token file must be removed");
    }

    #[test]
    fn test_restore_fails_safe_on_expired_token() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("token");

        let mut claims = ong_claims();
        claims.exp = chrono::Utc::now().timestamp() - 300;
        std::fs::write(&path, mint_token(&claims)).expect("write");

        let mut store = store_in(&dir);
        assert!(store.restore().is_none());
        assert!(!path.exists());
    }
}

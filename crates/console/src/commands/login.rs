use anyhow::bail;

use greenhub_core::credentials::Credentials;

use crate::config::ConsoleConfig;
use crate::session::SessionStore;

/// Sign in and persist the session token.
pub async fn run(config: &ConsoleConfig, email: String, password: String) -> anyhow::Result<()> {
    let api = super::api_client(config)?;
    let mut store = SessionStore::new(config.token_path.clone());
    let credentials = Credentials::new(email, password);

    match store.login(&api, &credentials).await {
        Ok(session) => {
            println!("Login successful, welcome!");
            if let Some(path) = &session.identity.image_path {
                tracing::debug!(image_path = %path, "Profile image available");
            }
            Ok(())
        }
        Err(e) => bail!("{e}"),
    }
}

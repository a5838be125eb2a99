use anyhow::bail;

use greenhub_client::schemas::OngRegistration;

use crate::config::ConsoleConfig;

/// Register a new ONG account.
pub async fn run(
    config: &ConsoleConfig,
    name: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let api = super::api_client(config)?;
    let body = OngRegistration {
        name,
        email,
        password,
    };

    match api.register_account(&body).await {
        Ok(()) => {
            println!("Registration submitted. You can now log in.");
            Ok(())
        }
        Err(e) => bail!("Could not register the account: {e}"),
    }
}

use crate::config::ConsoleConfig;
use crate::session::SessionStore;

/// Clear the session from memory and durable storage.
pub fn run(config: &ConsoleConfig) -> anyhow::Result<()> {
    let mut store = SessionStore::new(config.token_path.clone());
    store.logout();
    println!("Logged out.");
    Ok(())
}

use crate::config::ConsoleConfig;
use crate::session::SessionStore;

/// Print the restored session identity, if any.
pub fn run(config: &ConsoleConfig) -> anyhow::Result<()> {
    let mut store = SessionStore::new(config.token_path.clone());

    match store.restore() {
        Some(session) => {
            println!("Account #{} ({})", session.identity.sub, session.identity.role);
            if let Some(ong_id) = session.ong_id() {
                println!("Organization #{ong_id}");
            }
            if let Some(path) = &session.identity.image_path {
                println!("Profile image: {path}");
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

use anyhow::bail;

use crate::config::ConsoleConfig;

/// List the project categories known to the platform.
pub async fn run(config: &ConsoleConfig) -> anyhow::Result<()> {
    let api = super::api_client(config)?;

    match api.list_categories().await {
        Ok(categories) if categories.is_empty() => {
            println!("No categories available.");
            Ok(())
        }
        Ok(categories) => {
            for category in &categories {
                println!("{:>4}  {}", category.id, category.name);
            }
            Ok(())
        }
        Err(e) => bail!("Could not load categories: {e}"),
    }
}

//! Console subcommands. Each command builds its own API client and
//! session store, runs one operation, and reports to the terminal.

use std::time::Duration;

use anyhow::Context;

use greenhub_client::ApiClient;

use crate::config::ConsoleConfig;

pub mod categories;
pub mod create;
pub mod login;
pub mod logout;
pub mod register;
pub mod whoami;

/// Build the API client from console configuration.
pub(crate) fn api_client(config: &ConsoleConfig) -> anyhow::Result<ApiClient> {
    ApiClient::with_timeout(
        config.api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Could not build the HTTP client")
}

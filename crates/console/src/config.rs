use std::path::PathBuf;

/// Console configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local platform deployment.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the platform API (default: `http://localhost:3333`).
    pub api_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Location of the persisted bearer token
    /// (default: `~/.greenhub/token`).
    pub token_path: PathBuf,
}

impl ConsoleConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `GREENHUB_API_URL`              | `http://localhost:3333` |
    /// | `GREENHUB_REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `GREENHUB_TOKEN_PATH`           | `~/.greenhub/token`     |
    ///
    /// # Panics
    ///
    /// Panics if the timeout is not a valid `u64`, or if no token path is
    /// given and the home directory cannot be determined.
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("GREENHUB_API_URL").unwrap_or_else(|_| "http://localhost:3333".into());

        let request_timeout_secs: u64 = std::env::var("GREENHUB_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("GREENHUB_REQUEST_TIMEOUT_SECS must be a valid u64");

        let token_path = std::env::var("GREENHUB_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .expect("Could not determine the home directory; set GREENHUB_TOKEN_PATH")
                    .join(".greenhub")
                    .join("token")
            });

        Self {
            api_url,
            request_timeout_secs,
            token_path,
        }
    }
}

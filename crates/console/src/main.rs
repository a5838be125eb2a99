use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greenhub_console::commands;
use greenhub_console::commands::create::CreateProjectArgs;
use greenhub_console::config::ConsoleConfig;

#[derive(Parser)]
#[command(name = "greenhub", version, about = "GreenHub ONG administration console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as an ONG account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show the current session identity
    Whoami,
    /// Register a new ONG account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List the project categories
    Categories,
    /// Create a project from a draft
    CreateProject(CreateProjectArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenhub=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ConsoleConfig::from_env();
    tracing::debug!(api_url = %config.api_url, "Loaded console configuration");

    match cli.command {
        Commands::Login { email, password } => commands::login::run(&config, email, password).await,
        Commands::Logout => commands::logout::run(&config),
        Commands::Whoami => commands::whoami::run(&config),
        Commands::Register {
            name,
            email,
            password,
        } => commands::register::run(&config, name, email, password).await,
        Commands::Categories => commands::categories::run(&config).await,
        Commands::CreateProject(args) => commands::create::run(&config, args).await,
    }
}

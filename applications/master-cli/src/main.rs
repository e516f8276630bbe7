//! Master CLI - playlist management for a master node

mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::CliConfig;
use master_client::MasterClient;
use master_state::AppContext;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "master-cli")]
#[command(about = "Manage playlists on a master node", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Node password; when given, log in before running the command
    #[arg(short, long, global = true, env = "MASTER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the session is logged in
    Status,
    /// Log in with --password
    Login,
    /// End the session
    Logout,
    /// List playlist names
    Playlists,
    /// Print a playlist as JSON
    Show {
        /// Playlist name
        name: String,
    },
    /// Validate a JSON playlist file and save it on the node
    Save {
        /// Playlist name
        name: String,
        /// JSON file with the playlist document
        file: PathBuf,
    },
    /// Delete a playlist
    Delete {
        /// Playlist name
        name: String,
    },
    /// List a media folder
    Ls {
        /// Path relative to the media folder
        #[arg(default_value = "")]
        path: String,
        /// Only list folders
        #[arg(long)]
        folders_only: bool,
    },
    /// Validate a JSON playlist file without contacting the node
    Check {
        /// JSON file with the playlist document
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "master_cli=info,master_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let ctx = AppContext::with_notification_timeout(config.notification_timeout());

    if let Commands::Check { file } = &cli.command {
        let result = commands::check(&ctx, file).await;
        return Ok(finish(&ctx, result));
    }

    let client = MasterClient::with_options(&config.origin(), ctx.clone(), config.client_options())
        .context("Failed to create client")?;
    tracing::debug!(url = %client.base_url(), "Using master node");

    let result = execute(&client, cli).await;
    Ok(finish(&ctx, result))
}

async fn execute(client: &MasterClient, cli: Cli) -> anyhow::Result<()> {
    if let Some(password) = cli.password.as_deref() {
        commands::login(client, password).await?;
    } else if matches!(cli.command, Commands::Login) {
        anyhow::bail!("--password or MASTER_PASSWORD is required to log in");
    }

    match cli.command {
        Commands::Status => commands::status(client).await,
        Commands::Login | Commands::Check { .. } => Ok(()),
        Commands::Logout => commands::logout(client).await,
        Commands::Playlists => commands::playlists(client).await,
        Commands::Show { name } => commands::show(client, &name).await,
        Commands::Save { name, file } => commands::save(client, &name, &file).await,
        Commands::Delete { name } => commands::delete(client, &name).await,
        Commands::Ls { path, folders_only } => commands::ls(client, &path, folders_only).await,
    }
}

/// Report the outcome through the notification banner.
fn finish(ctx: &AppContext, result: anyhow::Result<()>) -> ExitCode {
    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ctx.show_error_notification(format!("{:#}", e));
            ExitCode::FAILURE
        }
    };
    commands::print_notification(&ctx.snapshot());
    ctx.shutdown();
    code
}

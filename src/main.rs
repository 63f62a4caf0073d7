//! Clubhouse - role-based access control service
//!
//! # Environment Variables
//!
//! - `CLUBHOUSE_HOST`, `CLUBHOUSE_PORT`: listen address
//! - `CLUBHOUSE_DATABASE_URL`: SQLite or PostgreSQL URL (enables the database store)
//! - `CLUBHOUSE_JWT_SECRET`: HS256 secret for bearer tokens
//! - `CLUBHOUSE_CLUB_TYPE`: club type of this installation
//! - `CLUBHOUSE_LOG_LEVEL`: log filter when `RUST_LOG` is unset
//!
//! A `.env` file in the working directory is loaded first.

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use clubhouse::auth::jwt::JwtHandler;
use clubhouse::utils::logging::init_logging;
use clubhouse::{Config, Result, server};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_CONFIG_PATH: &str = "config/clubhouse.yaml";

/// Clubhouse - roles and permissions for membership management
#[derive(Parser, Debug)]
#[command(name = "clubhouse")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to config/clubhouse.yaml when present)
    #[arg(short, long, global = true, env = "CLUBHOUSE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service (default)
    Serve {
        /// Override the listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a signed access token for a user
    IssueToken {
        /// User id placed in the `sub` claim
        #[arg(short, long)]
        user: String,
    },
}

async fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path).await?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            Config::from_file(DEFAULT_CONFIG_PATH).await?
        }
        None => return Config::from_env(),
    };
    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref()).await?;

    match args.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.app.server.host = host;
            }
            if let Some(port) = port {
                config.app.server.port = port;
            }
            config.validate()?;

            init_logging(&config.app.logging)?;
            server::run_server(config).await
        }
        Commands::IssueToken { user } => {
            let jwt = JwtHandler::new(config.auth());
            let token = jwt.create_access_token(&user)?;
            let claims = jwt.verify_token(&token)?;

            println!("{}", token);
            if let Some(remaining) = jwt.time_until_expiry(&claims) {
                eprintln!("Token for {} expires in {} seconds", claims.sub, remaining);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line config errors readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

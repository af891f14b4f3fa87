mod config;
mod database;
mod entities;
mod http_server;
mod logging;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config, database::Database, http_server::app::HttpServerConfig,
    logging::setup_logging,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "SHOWBILL_CONFIG")]
    config: Option<PathBuf>,

    /// Console log level
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level
    #[arg(long, default_value = "info", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(
        long,
        default_value = "error.log",
        env = "SHOWBILL_LOG_FILE",
        global = true
    )]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the listings site
    Serve {
        /// The port to run the server on, overriding the config file
        #[arg(short, long, env = "SHOWBILL_HTTP_PORT")]
        port: Option<u16>,

        /// The address to bind to, overriding the config file
        #[arg(long, env = "SHOWBILL_HTTP_HOST")]
        host: Option<String>,
    },
    /// Apply pending database migrations and exit
    Migrate,
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, Some(args.log_file.clone()), args.log_file_level)?;

    log::debug!("Showbill starting");

    if let Commands::Config(config_commands) = &args.command {
        match config_commands {
            ConfigCommands::CreateDefault => {
                let path = Config::create_default()?;
                log::info!("Default config available at {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        }
        return Ok(());
    }

    log::debug!("Loading configuration");
    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .with_context(|| "Failed to load showbill config")?;

    let database = Database::open(&config.database_path()).await?;

    match args.command {
        Commands::Migrate => {
            log::info!("Database migrations are up to date");
        }
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.port);
            let host = host.unwrap_or_else(|| config.host.clone());
            log::info!("Starting HTTP server on {}:{}", host, port);
            http_server::app::start(HttpServerConfig {
                host,
                port,
                database,
            })
            .await?;
        }
        Commands::Config(_) => {}
    }

    Ok(())
}

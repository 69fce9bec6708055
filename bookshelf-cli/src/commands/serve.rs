//! HTTP server command

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use bookshelf_server::config::{
    health_check_interval, parse_flag, DEFAULT_DATABASE_URL, DEFAULT_HEALTH_CHECK_INTERVAL_SECS,
    DEFAULT_HOST, DEFAULT_PORT,
};
use bookshelf_server::ServerConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "BIND_HOST", default_value_t = DEFAULT_HOST)]
    pub host: IpAddr,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Seed the database with the fixture dataset at startup
    #[arg(
        long,
        env = "RESET_DATABASE",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = reset_flag
    )]
    pub reset_database: bool,

    /// Seconds between database readiness checks
    #[arg(long, env = "HEALTH_CHECK_INTERVAL_SECS", default_value_t = DEFAULT_HEALTH_CHECK_INTERVAL_SECS)]
    pub health_check_interval: u64,
}

impl ServeArgs {
    /// Arguments for `bookshelf` run without a subcommand: flags are absent,
    /// so every value comes from the environment or its default.
    pub fn from_env() -> Self {
        Self::parse_from(["bookshelf"])
    }
}

fn reset_flag(value: &str) -> Result<bool, Infallible> {
    Ok(parse_flag(value))
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            bind_addr: SocketAddr::new(args.host, args.port),
            database_url: args.database_url,
            reset_database: args.reset_database,
            health_check_interval: health_check_interval(args.health_check_interval),
        }
    }
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::from(args);
    tracing::info!(
        bind = %config.bind_addr,
        reset_database = config.reset_database,
        "Starting bookshelf server"
    );

    bookshelf_server::serve(config)
        .await
        .context("Server error")
}

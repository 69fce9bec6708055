//! bookshelf CLI - runs the authors/books read API
//!
//! - `bookshelf` / `bookshelf serve`: start the HTTP server
//! - `bookshelf seed`: reset the database to the fixture dataset and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", version, about = "Read API over authors and books")]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default when no command is given)
    Serve(commands::ServeArgs),

    /// Clear both collections and insert the fixture dataset
    Seed(commands::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; variables may come from the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Some(Commands::Serve(args)) => commands::run_serve(args).await?,
        Some(Commands::Seed(args)) => commands::run_seed(args).await?,
        None => commands::run_serve(commands::ServeArgs::from_env()).await?,
    }
    Ok(())
}

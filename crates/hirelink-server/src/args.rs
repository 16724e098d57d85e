use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for hirelink-server
#[derive(Debug, Parser)]
#[command(
    name = "hirelink-server",
    version,
    about = "REST API for the hirelink marketplace"
)]
pub struct CliArgs {
    /// Port to bind (overrides HIRELINK_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Postgres connection string (overrides DATABASE_URL)
    #[arg(long = "database-url")]
    pub database_url: Option<String>,

    /// Path to a custom location dataset (JSON); defaults to the bundled one
    #[arg(short = 'l', long = "locations")]
    pub locations: Option<PathBuf>,
}

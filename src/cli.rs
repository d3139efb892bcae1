use clap::Parser;
use std::path::PathBuf;

/// Triage - conversational support-ticket assistant
#[derive(Parser, Debug, Clone)]
#[command(name = "triage", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "TRIAGE_CONFIG", default_value = "triage.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "TRIAGE_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "TRIAGE_PORT")]
    pub port: Option<u16>,

    /// Database connection URL (sqlite://, postgres://, mysql://)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

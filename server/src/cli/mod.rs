use clap::Parser;
use std::path::PathBuf;

/// Server CLI for fishy-server
#[derive(Parser, Debug, Clone)]
#[command(name = "fishy-server", version, about = "Super Fishy game server")]
pub struct ServerCli {
    /// Path to config file
    #[arg(long, default_value = "fishy-server.toml")]
    pub config: PathBuf,

    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Grace window in seconds before an abandoned room is evicted (overrides config)
    #[arg(long)]
    pub grace: Option<u64>,

    /// Persist CLI overrides back to the config file
    #[arg(long, default_value_t = false)]
    pub persist: bool,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

//! Main entry point for the Super Fishy game server.

use fishy_server::{cli, config, server};

use anyhow::Context;
use clap::Parser;
use config::Config;
use server::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::ServerCli::parse();

    // Quiet by default: our crates at INFO, everything else at WARN.
    let log_filter = if cli.debug {
        "debug".to_string()
    } else {
        "fishy_server=info,fishy_shared=info,warn".to_string()
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .with_file(cli.debug)
        .with_line_number(cli.debug)
        .init();

    let config_path: PathBuf = cli.config.clone();

    // Load or create config file (creates file if missing).
    let mut cfg = Config::load_or_create(&config_path)
        .with_context(|| format!("loading or creating config '{}'", config_path.display()))?;

    // Apply CLI overrides in-memory (non-persistent by default).
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    if let Some(grace) = cli.grace {
        cfg.cleanup_grace_secs = grace;
    }

    if cli.persist {
        cfg.save(&config_path)
            .with_context(|| format!("saving updated config '{}'", config_path.display()))?;
    }

    tracing::info!(
        config = %config_path.display(),
        port = cfg.port,
        grace_secs = cfg.cleanup_grace_secs
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let state = AppState::new(cfg, Some(config_path));

    server::run_server(addr, state).await?;
    Ok(())
}

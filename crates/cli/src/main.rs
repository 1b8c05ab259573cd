mod cli;
mod commands;
mod config;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use patternpal_core::config::load_dotenv;
use patternpal_core::{Config, ScanContext};

use crate::cli::{CliArgs, Command};
use crate::commands::App;
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    load_dotenv();
    let env = Config::from_env();
    env.log_summary();

    let settings = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    // Ctrl-C stops the scan at the next container or file boundary.
    let ctx = ScanContext::new();
    let cancel = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received");
            cancel.cancel();
        }
    });

    let app = App {
        env,
        settings,
        format: args.format,
        ctx,
    };

    let output = match &args.command {
        Command::Scan { frames, libraries } => commands::scan(&app, frames, libraries).await?,
        Command::Frame {
            frames,
            id,
            team_files,
            libraries,
            scene,
        } => commands::frame(&app, frames, id, team_files, libraries, scene.as_deref()).await?,
        Command::Lint { scene, rules } => commands::lint(&app, scene, rules).await?,
    };

    println!("{}", output);
    Ok(())
}

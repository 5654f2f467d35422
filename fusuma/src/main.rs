#![cfg_attr(not(target_os = "macos"), allow(dead_code))]

mod action;
#[cfg(target_os = "macos")]
mod app;
mod auto_close;
mod config;
mod handler;
mod host;
mod hotkey;
mod launch_agent;
#[cfg(target_os = "macos")]
mod macos;
mod maximize;
mod notify;
mod pid;

use anyhow::{Context, Result};
use argh::FromArgs;
use config::Config;
use pid::{PidFile, PID_FILE};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Hotkey window placement for macOS.
#[derive(FromArgs)]
struct Args {
    /// config file (default: ~/.config/fusuma/config.json)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// print the built-in configuration as JSON and exit
    #[argh(switch)]
    print_default_config: bool,

    /// validate the configuration and exit
    #[argh(switch)]
    check: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    if args.print_default_config {
        println!("{}", serde_json::to_string_pretty(&Config::default())?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = match args.config {
        Some(path) => path,
        None => Config::default_path().context("Could not determine home directory")?,
    };
    let config = Config::load(&path)?;
    tracing::debug!("Config: {}", notify::describe(&config));

    if args.check {
        println!("{}: ok", path.display());
        return Ok(());
    }

    tracing::info!("fusuma starting");

    let _pid_file = PidFile::acquire(Path::new(PID_FILE))?;

    if let Err(e) = launch_agent::sync(config.open_at_login) {
        tracing::warn!("Failed to update login item: {}", notify::describe_error(&e));
    }

    run(&config)
}

#[cfg(target_os = "macos")]
fn run(config: &Config) -> Result<()> {
    app::App::run(config)
}

#[cfg(not(target_os = "macos"))]
fn run(_config: &Config) -> Result<()> {
    anyhow::bail!("fusuma only runs on macOS")
}

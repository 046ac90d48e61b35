//! Multi-select - Interactive multi-select control in the terminal
//!
//! Builds a multi-select control from a TOML file and/or command line
//! options, lets the user drive it with keyboard and mouse, and prints the
//! final selection as JSON.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use multi_select::{Cli, MultiSelect, TuiApp, WidgetConfig};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.sample_config {
        print!("{}", WidgetConfig::sample_config());
        return Ok(());
    }

    let log_path = match cli.log_file.clone() {
        Some(path) => path,
        None => get_log_path(&std::env::current_dir()?, &cli),
    };

    // The terminal belongs to the TUI, so logs only go to the file
    let _guard = setup_file_only_logging(&cli, &log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Multi-select starting"
    );

    let config = load_config(&cli)?;
    anyhow::ensure!(
        !config.items.is_empty(),
        "No menu items: pass --item or a config file with [[items]]"
    );
    if cli.verbose {
        info!(?config, "Configuration loaded");
    }

    let title = config
        .label
        .clone()
        .unwrap_or_else(|| "Multi-select".to_string());
    let widget = MultiSelect::attach(&config)?;

    let mut app = TuiApp::new(widget, title)?;
    let detail = app.run()?;

    info!(index = ?detail.index, value = ?detail.value, "Session complete");
    println!("{}", serde_json::to_string_pretty(&detail)?);

    Ok(())
}

/// Determine the log file path based on config file or timestamp
fn get_log_path(base_dir: &Path, cli: &Cli) -> PathBuf {
    let log_dir = base_dir.join("Log");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    match cli.config_name() {
        Some(config_name) => log_dir.join(format!("{}_{}.log", config_name, timestamp)),
        None => log_dir.join(format!("Interactive_{}.log", timestamp)),
    }
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> multi_select::Result<WidgetConfig> {
    let config = if let Some(ref config_path) = cli.config {
        let resolved_path = resolve_config_path(config_path);
        info!(config_file = %resolved_path.display(), "Loading configuration from file");
        let file_config = WidgetConfig::load_from_file(&resolved_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    Ok(config)
}

/// Resolve config path; a bare name may omit the .toml extension
fn resolve_config_path(config_path: &Path) -> PathBuf {
    if config_path.exists() || config_path.extension().is_some() {
        return config_path.to_path_buf();
    }
    config_path.with_extension("toml")
}

/// Setup logging to file only (the terminal is owned by the TUI)
fn setup_file_only_logging(cli: &Cli, log_path: &Path) -> Result<WorkerGuard> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(fmt::layer().json().with_ansi(false).with_writer(non_blocking))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
    }

    Ok(guard)
}

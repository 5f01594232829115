// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! hostwatch - Lightweight host monitor for embedded Linux
//!
//! Serves a live web dashboard or draws a full-screen terminal dashboard
//! from procfs and sysfs readings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hostwatch::{ui, Config, SnapshotBuilder, WebServer, NAME, VERSION};

/// hostwatch - Lightweight host monitor for embedded Linux
#[derive(Parser, Debug)]
#[command(name = "hostwatch")]
#[command(author = "bad-antics")]
#[command(version = VERSION)]
#[command(about = "Host metrics over a live web dashboard or a terminal UI")]
struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides the config file)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Serve the web dashboard
    Web {
        /// HTTP port
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Draw the full-screen terminal dashboard
    Terminal,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if let Mode::Web { port, bind } = &args.mode {
        if let Some(port) = port {
            config.web.port = *port;
        }
        if let Some(bind) = bind {
            config.web.bind_address = bind.clone();
        }
    }
    config.validate()?;

    let terminal_mode = matches!(args.mode, Mode::Terminal);
    init_logging(&config.log_level, args.log_file.as_deref(), terminal_mode)?;

    info!("{} v{}", NAME, VERSION);
    info!("Configuration loaded from {:?}", config_path);

    let builder = Arc::new(SnapshotBuilder::new(&config.sensors));

    match args.mode {
        Mode::Web { .. } => {
            let rt = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            rt.block_on(run_web(config, builder))?;
        }
        Mode::Terminal => {
            ui::run_terminal(builder, &config.terminal)?;
        }
    }

    Ok(())
}

/// Install the global subscriber.
///
/// The terminal dashboard owns stdout and stderr, so without a log file its
/// output is discarded.
fn init_logging(level: &str, log_file: Option<&Path>, terminal_mode: bool) -> Result<()> {
    let (filter, rejected) = match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if terminal_mode => (BoxMakeWriter::new(std::io::sink), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .with_thread_ids(true)
        .with_ansi(ansi)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(e) = rejected {
        warn!("Invalid log level {:?} ({}), using info", level, e);
    }
    Ok(())
}

/// Serve the web dashboard until Ctrl+C
async fn run_web(config: Config, builder: Arc<SnapshotBuilder>) -> Result<()> {
    let server = WebServer::new(config.web.clone(), builder);
    let listener = server.bind().await?;

    let (shutdown_tx, _) = broadcast::channel(1);
    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, cleaning up...");
                let _ = signal_tx.send(());
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    info!("Press Ctrl+C to shutdown");
    server.serve(listener, shutdown_tx).await?;

    info!("{} shutdown complete", NAME);
    Ok(())
}

//! Linkplay Notifier - forwards Linkplay server log events to Discord.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use linkplay_notifier::catalog::FileSongCatalog;
use linkplay_notifier::config::{ConfigError, ConfigLoader, NotifierConfig, UnmatchedLines};
use linkplay_notifier::display;
use linkplay_notifier::sink::{
    ConsoleSink, DiscordConfig, DiscordWebhook, NotificationSink, NotifyError,
};
use linkplay_notifier::watcher::{LogTailer, Monitor, WatcherError};

#[derive(Parser)]
#[command(
    name = "linkplay-notifier",
    about = "Forward Linkplay server log events to a Discord webhook",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Config file (default: ./.linkplay-notifier.toml, then the user config dir).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Log file to tail (overrides LOG_FILE_PATH).
    #[arg(short, long)]
    log_file: Option<PathBuf>,
    /// Print notifications instead of sending them.
    #[arg(long)]
    dry_run: bool,
    /// Send a generic info notification for unrecognized lines.
    #[arg(long)]
    forward_unmatched: bool,
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Watcher(#[from] WatcherError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Layer defaults, config file, environment and CLI flags.
fn load_config(cli: &Cli) -> Result<NotifierConfig, ConfigError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path.clone()),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    config.apply_env(|key| std::env::var(key).ok());

    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }
    if cli.forward_unmatched {
        config.unmatched = UnmatchedLines::Forward;
    }

    config.validate()?;
    Ok(config)
}

fn build_sink(config: &NotifierConfig, dry_run: bool) -> Result<Arc<dyn NotificationSink>, NotifyError> {
    if dry_run {
        return Ok(Arc::new(ConsoleSink));
    }
    let discord = DiscordConfig::from_notifier(config)?;
    Ok(Arc::new(DiscordWebhook::new(discord)?))
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = load_config(&cli)?;
    let log_file = config.log_file.clone().ok_or(ConfigError::MissingLogFile)?;

    let sink = build_sink(&config, cli.dry_run)?;
    let tailer = LogTailer::open_at_end(log_file.clone()).await?;

    if config.songlist.is_none() {
        tracing::warn!("SONGLIST_PATH not set, song titles will show ids");
    }
    if config.jacket_dir.is_none() {
        tracing::warn!("JACKET_PATH not set, notifications will not include jackets");
    }
    let catalog = Arc::new(FileSongCatalog::new(
        config.songlist.clone(),
        config.jacket_dir.clone(),
    ));

    tracing::info!(
        log_file = %log_file.display(),
        sink = sink.sink_type(),
        unmatched = ?config.unmatched,
        poll_interval_ms = config.poll_interval_ms,
        "Starting Linkplay notifier"
    );
    display::print_monitoring_start(&log_file, sink.sink_type());

    let mut monitor = Monitor::new(tailer, catalog, sink)
        .with_poll_interval(config.poll_interval())
        .with_unmatched(config.unmatched);

    monitor
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let dotenv = dotenvy::dotenv();
    init_tracing(cli.verbose);
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            display::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

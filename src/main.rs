use analytics::Dashboard;
use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{Logging, SourceOverrides};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod summary;

/// The main entry point for the sentiment dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.sources.apply(&mut config);
    config
        .validate()
        .context("Invalid command-line overrides")?;

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&config.logging)?;

    tracing::debug!(
        trades = %config.data.trades_path.display(),
        sentiment = %config.data.sentiment_path.display(),
        "Building dashboard."
    );

    // Load, join and aggregate once. Both surfaces only read the result.
    let dashboard = Dashboard::build(&config.data);

    // Execute the appropriate command
    match cli.command {
        Commands::Summary(args) => summary::print(&dashboard, args.json)?,
        Commands::Serve(args) => {
            let mut addr = config.server.socket_addr();
            if let Some(host) = args.host {
                addr.set_ip(host);
            }
            if let Some(port) = args.port {
                addr.set_port(port);
            }
            web_server::run_server(addr, dashboard).await?;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Trader performance versus market sentiment.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./dashboard.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    sources: SourceOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the headline metrics and per-sentiment breakdown.
    Summary(SummaryArgs),
    /// Serve the dashboard data as a read-only JSON API.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct SummaryArgs {
    /// Emit the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// Interface to bind (overrides `server.host`).
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to bind (overrides `server.port`).
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber: stderr always, plus a daily rolling file
/// when `logging.directory` is set. `RUST_LOG` takes precedence over
/// `logging.level`.
fn init_tracing(logging: &Logging) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "sentiment-dash.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

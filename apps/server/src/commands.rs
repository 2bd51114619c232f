//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use markdrop_shared::{AppConfig, expand_home, init_config, load_config, load_config_from};
use markdrop_store::DocumentStore;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// markdrop, a personal drop-and-serve markdown host.
#[derive(Parser)]
#[command(
    name = "markdrop",
    version,
    about = "Host markdown documents dropped onto a web page.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Start the HTTP server.
    Serve {
        /// Address to bind (overrides the config file).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file).
        #[arg(short, long, env = "MARKDROP_PORT")]
        port: Option<u16>,

        /// Directory where documents are stored (overrides the config file).
        #[arg(long, env = "MARKDROP_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Path to an alternate config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the current document catalog.
    List {
        /// Directory where documents are stored (overrides the config file).
        #[arg(long, env = "MARKDROP_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Path to an alternate config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "markdrop=info",
        1 => "markdrop=debug",
        _ => "markdrop=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve {
            host,
            port,
            data_dir,
            config,
        } => cmd_serve(host, port, data_dir, config.as_deref()).await,
        Command::List { data_dir, config } => cmd_list(data_dir, config.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load(config_path)?;

    let root = storage_root(data_dir, &config)?;
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);

    let store = DocumentStore::open(&root).await?;
    let app = crate::routes::router(store);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("cannot bind {addr}: {e}"))?;

    info!(%addr, root = %root.display(), "markdrop listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when ctrl-c is received, letting in-flight requests drain.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

async fn cmd_list(data_dir: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let config = load(config_path)?;
    let root = storage_root(data_dir, &config)?;

    let store = DocumentStore::open(&root).await?;
    let entries = store.list().await?;

    if entries.is_empty() {
        println!("no documents stored in {}", root.display());
        return Ok(());
    }

    for entry in &entries {
        match entry.modified {
            Some(ts) => println!("{}  {}", ts.format("%Y-%m-%d %H:%M"), entry.name),
            None => println!("{}", entry.name),
        }
    }

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("wrote default config to {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let rendered =
        toml::to_string_pretty(&config).map_err(|e| eyre!("cannot render config: {e}"))?;
    print!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the config, either from the given path or the default location.
fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Resolve the storage root: CLI flag wins over the config file value.
fn storage_root(data_dir: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir),
        None => Ok(expand_home(&config.storage.root)?),
    }
}

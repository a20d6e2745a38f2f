use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinerow_core::config::{CatalogKind, LayoutPreference};
use cinerow_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "cinerow")]
#[command(author, version, about = "A terminal media catalog browser")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read the page from a JSON file instead of the mock catalog
    #[arg(short = 'c', long = "catalog", global = true)]
    catalog: Option<PathBuf>,

    /// Seed for generated ratings and watch progress
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Always show the row navigation arrows
    #[arg(long, global = true)]
    touch: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Fetch the page and print every non-empty row
    Rows,
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

impl Cli {
    /// Command line flags take precedence over the configuration file
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.catalog {
            config.catalog.source = CatalogKind::File;
            config.catalog.path = Some(path.clone());
        }
        if let Some(seed) = self.seed {
            config.catalog.seed = seed;
        }
        if self.touch {
            config.ui.layout = LayoutPreference::Touch;
        }
    }
}

/// Log to `<data_dir>/cinerow.log` while the TUI owns the terminal, stderr otherwise
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;
    cli.apply_overrides(&mut config);

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    let config = Arc::new(config);

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Rows) => commands::rows::run(&config).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Path => commands::config::path(),
        },
    }
}

//! relief-app CLI - drive the disaster relief dashboard without a browser.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relief_app::state::AppState;
use relief_core::{DashboardConfig, Tab};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "relief-app")]
#[command(version)]
#[command(about = "Disaster relief coordination dashboard, headless")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "relief.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the scripted walkthrough and print each snapshot
    Demo,

    /// Print the initial dashboard snapshot
    Snapshot {
        /// Tab to select before printing
        #[arg(short, long, default_value = "report")]
        tab: Tab,
    },

    /// Drive the dashboard from stdin line commands
    Interactive,

    /// Validate configuration file
    Validate,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Demo => {
            let state = AppState::load(&cli.config)?;
            let steps = relief_app::run_demo(&state);
            println!("{}", serde_json::to_string_pretty(&steps)?);
        }
        Commands::Snapshot { tab } => {
            let state = AppState::load(&cli.config)?;
            let snapshot = relief_app::run_snapshot(&state, tab);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Interactive => {
            let state = AppState::load(&cli.config)?;
            let stdin = std::io::BufReader::new(std::io::stdin());
            let mut stdout = std::io::stdout();
            relief_app::runtime::run_interactive(&state, stdin, &mut stdout)?;
        }
        Commands::Validate => {
            let config = DashboardConfig::load(&cli.config)
                .with_context(|| format!("validating {}", cli.config.display()))?;
            tracing::info!(path = %cli.config.display(), "configuration OK");
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

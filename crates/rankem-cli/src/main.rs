//! Rankem CLI - Rank things by comparing them two at a time.

use clap::Parser;
use rankem_cli::commands;
use rankem_cli::repl;
use rankem_cli::{Cli, Command, Config, Formatter, Workspace};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> rankem_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging goes to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RANKEM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Load config, writing the defaults on first run
    let config_path = cli.config.map(PathBuf::from);
    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => {
            let path = Config::path()?;
            if !path.exists() {
                let defaults = Config::default();
                if let Err(e) = defaults.save_to(&path) {
                    tracing::warn!("Could not write default config to {}: {}", path.display(), e);
                }
            }
            Config::load_from(&path)?
        }
    };

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Open the database
    let database = match cli.database {
        Some(path) => PathBuf::from(path),
        None => config.database_path()?,
    };
    let mut workspace = Workspace::open(&database, config.rating.engine()?)?;

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut workspace, &config, config_path.as_deref(), &formatter)?
        }
        Some(cmd) => commands::execute(cmd, &mut workspace, &formatter)?,
    }

    Ok(())
}

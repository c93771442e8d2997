//! Wallrun - headless runner for the third-person wall-running controller
//!
//! Usage: `wallrun [settings.toml] [--trace <out.json>] [--save-settings]`

mod scenario;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use settings::GameSettings;

#[derive(Parser)]
#[command(name = "wallrun")]
#[command(about = "Run the scripted wall-running scenario headlessly", long_about = None)]
struct Cli {
    /// Settings file (default: ~/.config/wallrun/settings.toml)
    settings: Option<PathBuf>,
    /// Write a per-tick JSON trace to this file
    #[arg(long)]
    trace: Option<PathBuf>,
    /// Save the effective settings to the default location
    #[arg(long)]
    save_settings: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Cli::parse();
    info!("Starting wallrun...");

    let mut settings = GameSettings::load(args.settings.as_deref());
    if args.trace.is_some() {
        settings.scenario.trace_path = args.trace;
    }
    settings.validate().context("invalid settings")?;

    if args.save_settings {
        settings.save()?;
    }

    let outcome = scenario::run(&settings, &scenario::default_script())?;
    info!(
        "Final position ({:.2}, {:.2}, {:.2}), animation {:?}",
        outcome.final_position.x,
        outcome.final_position.y,
        outcome.final_position.z,
        outcome.final_animation
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_all_options() {
        let cli = Cli::try_parse_from([
            "wallrun",
            "custom.toml",
            "--trace",
            "out.json",
            "--save-settings",
        ])
        .unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.trace, Some(PathBuf::from("out.json")));
        assert!(cli.save_settings);
    }

    #[test]
    fn test_cli_defaults_and_unknown_option() {
        let cli = Cli::try_parse_from(["wallrun"]).unwrap();
        assert!(cli.settings.is_none() && cli.trace.is_none() && !cli.save_settings);
        assert!(Cli::try_parse_from(["wallrun", "--fly"]).is_err());
    }
}

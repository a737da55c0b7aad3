use std::path::PathBuf;

use anyhow::{Context, Result};
use daybook_core::config::DaybookConfig;
use owo_colors::OwoColorize;

pub fn run(events_file: Option<PathBuf>) -> Result<()> {
    let config_path = DaybookConfig::config_path()?;
    let mut config = DaybookConfig::load().context("Failed to load daybook config")?;

    if let Some(events_file) = events_file {
        config.events_file = events_file;
        config
            .save()
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("{} {}", "Events file set to".green(), config.events_path().display());
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", config.events_path().display());

    Ok(())
}

//! Config command
//!
//! Manage gigdesk configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use gd_core::config::{Config, LOCAL_CONFIG_PATH};
use std::fs;
use std::path::{Path, PathBuf};

use super::AppContext;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print which configuration file is in use
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, ctx: &AppContext) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(ctx, json),
        ConfigCommand::Init { force } => init(ctx.source.as_deref(), force),
        ConfigCommand::Path => show_path(ctx),
    }
}

fn show_config(ctx: &AppContext, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    match &ctx.source {
        Some(path) => println!("{}", path.display().to_string().dimmed()),
        None => println!("{}", "(defaults)".dimmed()),
    }
    println!();
    println!("{}", ctx.config.to_toml_string()?);

    Ok(())
}

/// Write the default configuration to `path`, or the project-local file
pub fn init(path: Option<&Path>, force: bool) -> Result<()> {
    use colored::Colorize;

    let path: PathBuf = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_PATH));

    if path.exists() && !force {
        eprintln!(
            "{} {} already exists. Use --force to overwrite.",
            "⚠".yellow(),
            path.display()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = Config::default().to_toml_string()?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    eprintln!("{} Created {}", "✓".green(), path.display());
    Ok(())
}

fn show_path(ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    match &ctx.source {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("{} No configuration file found, using defaults", "⚠".yellow());
            if let Some(user) = Config::user_path() {
                eprintln!("  Searched: {}", LOCAL_CONFIG_PATH);
                eprintln!("  Searched: {}", user.display().to_string().dimmed());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init(Some(&path), false).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[export]\nfilename_prefix = \"mine\"\n").unwrap();

        init(Some(&path), false).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("mine"));

        init(Some(&path), true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("admin-report"));
    }
}

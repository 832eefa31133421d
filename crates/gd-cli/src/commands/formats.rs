//! Formats command

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::AppContext;

/// Arguments for the formats command
#[derive(Debug, Args)]
pub struct FormatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FormatInfo {
    name: &'static str,
    extension: &'static str,
    mime_type: &'static str,
    default: bool,
}

/// Execute the formats command
pub fn execute(args: FormatsArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let default = ctx.config.export.default_format;
    let formats: Vec<FormatInfo> = ctx
        .config
        .export_manager()
        .available_formats()
        .into_iter()
        .map(|f| FormatInfo {
            name: f.as_str(),
            extension: f.extension(),
            mime_type: f.mime_type(),
            default: f == default,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&formats)?);
        return Ok(());
    }

    println!("{}", "Export formats:".bold());
    for info in &formats {
        let marker = if info.default { " (default)" } else { "" };
        println!(
            "  {:<6} .{:<5} {}{}",
            info.name.cyan(),
            info.extension,
            info.mime_type.dimmed(),
            marker.green()
        );
    }
    Ok(())
}

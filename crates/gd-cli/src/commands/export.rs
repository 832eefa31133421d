//! Export command
//!
//! Export saved admin list responses to a report file.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use gd_core::auth::Session;
use gd_core::emit::{Emitter, FileEmitter, StdoutEmitter};
use gd_core::export::CsvQuoting;
use gd_core::flow::{ExportFlow, FlowTimings, NoopPacer, Pacer, ThreadPacer};
use gd_core::report::{DatasetAssembler, RecordFilter};
use gd_core::types::{ExportFormat, ReportPeriod, Role};

use super::AppContext;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// HTML report to print as PDF
    Pdf,
    /// Tab-separated sheet with BOM
    Excel,
    /// Comma-separated values
    Csv,
    /// JSON with export metadata
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Excel => ExportFormat::Excel,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Reporting period options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Week,
    Month,
    Quarter,
    Year,
    All,
}

impl From<PeriodArg> for ReportPeriod {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Week => ReportPeriod::Week,
            PeriodArg::Month => ReportPeriod::Month,
            PeriodArg::Quarter => ReportPeriod::Quarter,
            PeriodArg::Year => ReportPeriod::Year,
            PeriodArg::All => ReportPeriod::All,
        }
    }
}

/// Role filter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Admin,
    Client,
    Freelancer,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::Client => Role::Client,
            RoleArg::Freelancer => Role::Freelancer,
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Saved list responses (JSON), exported in the order given
    #[arg(long, short, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Export format [default: from config]
    #[arg(long, short, value_enum)]
    pub format: Option<FormatArg>,

    /// Reporting period [default: from config]
    #[arg(long, short, value_enum)]
    pub period: Option<PeriodArg>,

    /// Output directory [default: from config]
    #[arg(long, short, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the report to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Keep records whose name or email contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Keep records with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Keep records with this role
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,

    /// Filename prefix [default: from config]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Saved login response; the signed-in user must be an admin
    #[arg(long, env = "GIGDESK_SESSION")]
    pub session: Option<PathBuf>,

    /// Skip the pause before encoding
    #[arg(long)]
    pub no_delay: bool,

    /// Quote CSV/Excel fields per RFC 4180
    #[arg(long)]
    pub strict_csv: bool,
}

impl ExportArgs {
    fn filter(&self) -> RecordFilter {
        RecordFilter {
            search: self.search.clone(),
            status: self.status.clone(),
            role: self.role.map(Role::from),
        }
    }
}

/// Shows a spinner while the export dialog "prepares" the file
struct SpinnerPacer;

impl Pacer for SpinnerPacer {
    fn pause(&self, duration: Duration) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Preparing export...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        ThreadPacer.pause(duration);
        spinner.finish_and_clear();
    }
}

/// Execute the export command
pub fn execute(args: ExportArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let config = &ctx.config;

    if let Some(path) = &args.session {
        let session = Session::from_file(path)
            .with_context(|| format!("Failed to load session from {}", path.display()))?;
        session.require_role(Role::Admin)?;
        tracing::info!("Exporting as {}", session.user().email);
    }

    let format: ExportFormat = args
        .format
        .map(ExportFormat::from)
        .unwrap_or(config.export.default_format);
    let period: ReportPeriod = args
        .period
        .map(ReportPeriod::from)
        .unwrap_or(config.export.default_period);

    // Assemble dataset
    let mut assembler = DatasetAssembler::new(period).with_filter(args.filter());
    for path in &args.input {
        assembler
            .add_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }
    let dataset = assembler.finish();

    eprintln!(
        "Exporting {} records as {}...",
        dataset.len().to_string().yellow(),
        format.to_string().cyan()
    );

    // Set up exporter
    let mut manager = config.export_manager();
    if let Some(prefix) = &args.prefix {
        manager = manager.with_prefix(prefix.clone());
    }
    if args.strict_csv {
        manager = manager.with_csv_quoting(CsvQuoting::Rfc4180);
    }

    let emitter: Box<dyn Emitter> = if args.stdout {
        Box::new(StdoutEmitter)
    } else {
        let dir = args
            .output
            .clone()
            .unwrap_or_else(|| config.export.output_dir.clone());
        Box::new(FileEmitter::new(dir))
    };

    let mut timings: FlowTimings = config.flow.timings();
    if args.no_delay || args.stdout {
        timings.simulated_delay = Duration::ZERO;
    }
    let pacer: Box<dyn Pacer> = if timings.simulated_delay.is_zero() {
        Box::new(NoopPacer)
    } else {
        Box::new(SpinnerPacer)
    };

    // Export
    let mut flow = ExportFlow::new(timings);
    let file = flow.run(&manager, &dataset, format, emitter.as_ref(), pacer.as_ref())?;

    match &file.path {
        Some(path) => eprintln!(
            "{} Exported {} rows to {}",
            "✓".green(),
            file.rows,
            path.display()
        ),
        None => eprintln!("{} Exported {} rows", "✓".green(), file.rows),
    }

    Ok(())
}

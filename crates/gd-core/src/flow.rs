//! Export flow state machine
//!
//! ```text
//! idle --begin--> exporting --complete(ok)--> success --tick--> idle
//!                      \--complete(err)--> idle
//! ```
//!
//! The pause between `begin` and encoding is presentation latency only;
//! no background work happens during it.

use crate::emit::{EmittedFile, Emitter};
use crate::error::{GigDeskError, Result};
use crate::export::ExportManager;
use crate::report::ReportDataset;
use crate::types::ExportFormat;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default pause before encoding
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1000);

/// Default time the success state stays visible
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_millis(2000);

/// Current state of an export dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Exporting {
        format: ExportFormat,
        started_at: Instant,
    },
    Success {
        file: EmittedFile,
        shown_at: Instant,
    },
}

impl ExportState {
    pub fn name(&self) -> &'static str {
        match self {
            ExportState::Idle => "idle",
            ExportState::Exporting { .. } => "exporting",
            ExportState::Success { .. } => "success",
        }
    }
}

/// Timing knobs for the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTimings {
    pub simulated_delay: Duration,
    pub success_display: Duration,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            simulated_delay: DEFAULT_SIMULATED_DELAY,
            success_display: DEFAULT_SUCCESS_DISPLAY,
        }
    }
}

/// Waits out the simulated delay
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Blocks the current thread
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Skips the delay entirely
pub struct NoopPacer;

impl Pacer for NoopPacer {
    fn pause(&self, _duration: Duration) {}
}

/// Drives one export dialog through its states
pub struct ExportFlow {
    state: ExportState,
    timings: FlowTimings,
}

impl ExportFlow {
    pub fn new(timings: FlowTimings) -> Self {
        Self {
            state: ExportState::Idle,
            timings,
        }
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    pub fn timings(&self) -> FlowTimings {
        self.timings
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ExportState::Idle)
    }

    /// `idle -> exporting`
    pub fn begin(&mut self, format: ExportFormat, now: Instant) -> Result<()> {
        if !self.is_idle() {
            return Err(self.invalid("begin"));
        }
        debug!("Export flow: idle -> exporting ({})", format);
        self.state = ExportState::Exporting {
            format,
            started_at: now,
        };
        Ok(())
    }

    /// `exporting -> success` on success, `exporting -> idle` on failure
    ///
    /// The outcome is handed back so callers can surface the error.
    pub fn complete(&mut self, outcome: Result<EmittedFile>, now: Instant) -> Result<EmittedFile> {
        if !matches!(self.state, ExportState::Exporting { .. }) {
            return Err(self.invalid("complete"));
        }

        match outcome {
            Ok(file) => {
                debug!("Export flow: exporting -> success ({})", file.filename);
                self.state = ExportState::Success {
                    file: file.clone(),
                    shown_at: now,
                };
                Ok(file)
            }
            Err(err) => {
                warn!("Export failed: {}", err);
                self.state = ExportState::Idle;
                Err(err)
            }
        }
    }

    /// Auto-close the success state once its display time is over
    ///
    /// Returns true when the flow went back to idle.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let ExportState::Success { shown_at, .. } = &self.state {
            if now.saturating_duration_since(*shown_at) >= self.timings.success_display {
                debug!("Export flow: success -> idle");
                self.state = ExportState::Idle;
                return true;
            }
        }
        false
    }

    /// Time left before the success state closes itself
    pub fn success_remaining(&self, now: Instant) -> Option<Duration> {
        match &self.state {
            ExportState::Success { shown_at, .. } => Some(
                self.timings
                    .success_display
                    .saturating_sub(now.saturating_duration_since(*shown_at)),
            ),
            _ => None,
        }
    }

    /// Run a complete export: begin, pause, encode, emit, complete
    pub fn run(
        &mut self,
        manager: &ExportManager,
        dataset: &ReportDataset,
        format: ExportFormat,
        emitter: &dyn Emitter,
        pacer: &dyn Pacer,
    ) -> Result<EmittedFile> {
        self.begin(format, Instant::now())?;
        pacer.pause(self.timings.simulated_delay);

        let outcome = manager
            .export(dataset, format)
            .and_then(|payload| emitter.emit(&payload));
        let file = self.complete(outcome, Instant::now())?;

        info!("Exported {} rows to {}", file.rows, file.filename);
        Ok(file)
    }

    fn invalid(&self, action: &str) -> GigDeskError {
        GigDeskError::InvalidTransition {
            action: action.to_string(),
            state: self.state.name().to_string(),
        }
    }
}

impl Default for ExportFlow {
    fn default() -> Self {
        Self::new(FlowTimings::default())
    }
}

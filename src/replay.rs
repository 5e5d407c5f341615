//! Recorded input trace replay.
//!
//! A trace is a time-ordered list of [`TraceEntry`] values, stored as YAML
//! (or JSON when the file extension is `.json`). Replaying feeds every entry
//! through a fresh [`InputArbiter`] and [`InputPreprocessor`] built from the
//! given config and reports what the arbiter decided.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use commonkit_config::{Config, InputMethod};
use commonkit_input::{InputArbiter, InputPreprocessor, RawInput, RequestOutcome};

/// Errors that can occur while loading or replaying a trace.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML trace: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid JSON trace: {0}")]
    Json(#[from] serde_json::Error),

    #[error("trace entry {index} at {time}s is earlier than the entry before it")]
    OutOfOrder { index: usize, time: f64 },

    #[error("trace entry {index} has a non-finite time")]
    InvalidTime { index: usize },
}

/// One timestamped trace event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Seconds since the start of the trace
    pub time: f64,
    pub event: TraceEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Raw device input, classified by the preprocessor
    Input(RawInput),
    /// Direct request for a method, bypassing classification
    Request { method: InputMethod },
    Lock {
        reason: String,
        method: InputMethod,
        add: bool,
    },
    Filter {
        method: InputMethod,
        reason: String,
        filtered: bool,
    },
    /// Periodic scheduler callback
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    Yaml,
    Json,
}

impl TraceFormat {
    /// `.json` files are JSON; everything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TraceFormat::Json,
            _ => TraceFormat::Yaml,
        }
    }
}

pub fn parse_trace(contents: &str, format: TraceFormat) -> Result<Vec<TraceEntry>, ReplayError> {
    let entries = match format {
        TraceFormat::Yaml => {
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_yaml_ng::from_str(contents)?
            }
        }
        TraceFormat::Json => serde_json::from_str(contents)?,
    };
    Ok(entries)
}

pub fn load_trace(path: &Path) -> Result<Vec<TraceEntry>, ReplayError> {
    let contents = std::fs::read_to_string(path)?;
    let entries = parse_trace(&contents, TraceFormat::from_path(path))?;
    log::info!("Loaded {} trace entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// A committed input method change observed during replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeRecord {
    pub time: f64,
    pub previous: InputMethod,
    pub current: InputMethod,
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>9.3}s  {} -> {}",
            self.time, self.previous, self.current
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplaySummary {
    pub changes: Vec<ChangeRecord>,
    /// Changes dropped by thrash protection
    pub suppressed: usize,
    /// Inputs that implied no input method
    pub ignored: usize,
    /// Re-announcements of an unchanged method (gamepad profile switches)
    pub refreshes: usize,
    pub final_method: InputMethod,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "changes:    {}", self.changes.len())?;
        writeln!(f, "suppressed: {}", self.suppressed)?;
        writeln!(f, "ignored:    {}", self.ignored)?;
        writeln!(f, "refreshes:  {}", self.refreshes)?;
        write!(f, "final:      {}", self.final_method)
    }
}

/// Replay `entries` against an arbiter configured from `config`.
pub fn replay(entries: &[TraceEntry], config: &Config) -> Result<ReplaySummary, ReplayError> {
    let mut arbiter = InputArbiter::from_config(config);
    let preprocessor = InputPreprocessor::new(&config.gamepad);
    let changes = arbiter.subscribe_channel();

    let mut summary = ReplaySummary::default();
    let mut previous_time = f64::NEG_INFINITY;

    for (index, entry) in entries.iter().enumerate() {
        if !entry.time.is_finite() {
            return Err(ReplayError::InvalidTime { index });
        }
        if entry.time < previous_time {
            return Err(ReplayError::OutOfOrder {
                index,
                time: entry.time,
            });
        }
        previous_time = entry.time;
        let now = entry.time;

        let outcome = match &entry.event {
            TraceEvent::Input(input) => {
                let outcome = preprocessor.process(&mut arbiter, input, now);
                if outcome.is_none() {
                    summary.ignored += 1;
                }
                outcome
            }
            TraceEvent::Request { method } => Some(arbiter.request_input_method(*method, now)),
            TraceEvent::Lock {
                reason,
                method,
                add,
            } => {
                arbiter.add_or_remove_input_type_lock(reason, *method, *add);
                None
            }
            TraceEvent::Filter {
                method,
                reason,
                filtered,
            } => {
                arbiter.set_input_type_filter(*method, reason, *filtered);
                None
            }
            TraceEvent::Tick => {
                arbiter.tick(now);
                None
            }
        };

        if outcome == Some(RequestOutcome::Suppressed) {
            summary.suppressed += 1;
        }

        for change in changes.try_iter() {
            if change.previous == change.current {
                summary.refreshes += 1;
            } else {
                summary.changes.push(ChangeRecord {
                    time: now,
                    previous: change.previous,
                    current: change.current,
                });
            }
        }
    }

    summary.final_method = arbiter.current_input_type();
    log::info!(
        "Replayed {} entries: {} changes, {} suppressed",
        entries.len(),
        summary.changes.len(),
        summary.suppressed
    );
    Ok(summary)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recording session state machine.
//!
//! ```text
//! NotStarted --start--> Recording --stop--> Completed
//!                           ^                   |
//!                           +-------start-------+
//! ```
//!
//! There is no timeout or error transition out of `Recording`; only an
//! explicit stop ends a run. Callers must serialize access (the HTTP layer
//! keeps the session behind a mutex shared with the tick task).

use chrono::{DateTime, Utc};

use crate::models::{ActiveRun, CompletedRun, RunMetrics, RunMode, Sample};

/// Invalid session transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("A run is already being recorded")]
    AlreadyRecording,

    #[error("No run is being recorded")]
    NotRecording,
}

#[derive(Debug)]
enum SessionState {
    NotStarted,
    Recording(ActiveRun),
    Completed,
}

/// Point-in-time view of the session for live display.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub mode: RunMode,
    pub started_at: Option<DateTime<Utc>>,
    pub sample_count: usize,
    /// Metrics as of the last tick; `None` before the first tick of a run.
    pub metrics: Option<RunMetrics>,
    /// Number of samples `metrics` was computed over.
    pub metrics_sample_count: Option<usize>,
    /// Most recent sample, for centering a live map.
    pub last_sample: Option<Sample>,
}

/// Owns the active run and the last completed one.
#[derive(Debug)]
pub struct RecordingSession {
    state: SessionState,
    last_completed: Option<CompletedRun>,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::NotStarted,
            last_completed: None,
        }
    }

    pub fn mode(&self) -> RunMode {
        match self.state {
            SessionState::NotStarted => RunMode::NotStarted,
            SessionState::Recording(_) => RunMode::Recording,
            SessionState::Completed => RunMode::Completed,
        }
    }

    /// Begin a new, empty run.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if let SessionState::Recording(_) = self.state {
            return Err(SessionError::AlreadyRecording);
        }

        tracing::info!(started_at = %now, "Run recording started");
        self.state = SessionState::Recording(ActiveRun::new(now));
        Ok(())
    }

    /// Append a sample from the location source to the active run.
    pub fn append(&mut self, sample: Sample) -> Result<usize, SessionError> {
        let SessionState::Recording(run) = &mut self.state else {
            return Err(SessionError::NotRecording);
        };

        run.push(sample);
        let count = run.samples().len();
        tracing::debug!(
            latitude = sample.latitude,
            longitude = sample.longitude,
            samples = count,
            "Sample appended"
        );
        Ok(count)
    }

    /// Periodic refresh of live metrics. Returns `None` when not recording.
    pub fn tick(&mut self) -> Option<RunMetrics> {
        match &mut self.state {
            SessionState::Recording(run) => Some(run.metrics()),
            _ => None,
        }
    }

    /// Stop recording and freeze the run.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<&CompletedRun, SessionError> {
        let state = std::mem::replace(&mut self.state, SessionState::Completed);
        let run = match state {
            SessionState::Recording(run) => run,
            other => {
                self.state = other;
                return Err(SessionError::NotRecording);
            }
        };

        let completed = run.finish(now);
        let metrics = completed.metrics();
        tracing::info!(
            samples = completed.samples().len(),
            distance_meters = ?metrics.distance_meters,
            duration_seconds = ?metrics.duration_seconds,
            "Run recording stopped"
        );

        Ok(&*self.last_completed.insert(completed))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        match &self.state {
            SessionState::Recording(run) => {
                let refreshed = run.last_refreshed();
                SessionSnapshot {
                    mode: RunMode::Recording,
                    started_at: Some(run.started_at()),
                    sample_count: run.samples().len(),
                    metrics: refreshed.map(|(_, metrics)| metrics),
                    metrics_sample_count: refreshed.map(|(count, _)| count),
                    last_sample: run.samples().last().copied(),
                }
            }
            _ => SessionSnapshot {
                mode: self.mode(),
                started_at: None,
                sample_count: 0,
                metrics: None,
                metrics_sample_count: None,
                last_sample: None,
            },
        }
    }

    /// Samples of the run being recorded, if any.
    pub fn active_samples(&self) -> Option<&[Sample]> {
        match &self.state {
            SessionState::Recording(run) => Some(run.samples()),
            _ => None,
        }
    }

    /// The most recently completed run, handed to the display side.
    pub fn last_completed(&self) -> Option<&CompletedRun> {
        self.last_completed.as_ref()
    }
}

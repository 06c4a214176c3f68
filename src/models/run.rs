// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run model: the samples of one recording session and their metrics.
//!
//! A run is split into two types so the append-only/immutable lifecycle is
//! enforced by the compiler: [`ActiveRun`] accepts samples while recording,
//! [`CompletedRun`] is frozen at stop time and exposes no mutation.

use chrono::{DateTime, Utc};
use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Sample;
use crate::services::metrics;

/// Recording mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RunMode {
    #[default]
    NotStarted,
    Recording,
    Completed,
}

impl RunMode {
    /// Two-state projection: started vs stopped.
    pub fn is_active(self) -> bool {
        matches!(self, RunMode::Recording)
    }
}

/// Derived metrics of a sample sequence.
///
/// `None` means "not enough data to measure" (fewer than two samples),
/// which is not the same as a zero-length run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunMetrics {
    /// Cumulative great-circle path length (meters)
    pub distance_meters: Option<f64>,
    /// Last sample time minus first sample time (seconds)
    pub duration_seconds: Option<f64>,
}

/// A run that is still being recorded.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    started_at: DateTime<Utc>,
    samples: Vec<Sample>,
    /// Last computed metrics and the sample count they cover.
    refreshed: Option<(usize, RunMetrics)>,
}

impl ActiveRun {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            samples: Vec::new(),
            refreshed: None,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Append a sample in arrival order.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Metrics for the current samples, recomputed only after an append.
    pub fn metrics(&mut self) -> RunMetrics {
        let count = self.samples.len();
        match self.refreshed {
            Some((covered, metrics)) if covered == count => metrics,
            _ => {
                let metrics = metrics::compute_metrics(&self.samples);
                self.refreshed = Some((count, metrics));
                metrics
            }
        }
    }

    /// Metrics from the last refresh, labelled with the number of samples
    /// they were computed over. That count lags `samples().len()` until the
    /// next refresh.
    pub fn last_refreshed(&self) -> Option<(usize, RunMetrics)> {
        self.refreshed
    }

    /// Freeze the run. Metrics are computed one final time here.
    pub fn finish(self, stopped_at: DateTime<Utc>) -> CompletedRun {
        let metrics = metrics::compute_metrics(&self.samples);
        CompletedRun {
            started_at: self.started_at,
            stopped_at,
            samples: self.samples,
            metrics,
        }
    }
}

/// A run whose recording has stopped. Immutable.
#[derive(Debug, Clone)]
pub struct CompletedRun {
    started_at: DateTime<Utc>,
    stopped_at: DateTime<Utc>,
    samples: Vec<Sample>,
    metrics: RunMetrics,
}

impl CompletedRun {
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn stopped_at(&self) -> DateTime<Utc> {
        self.stopped_at
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn metrics(&self) -> RunMetrics {
        self.metrics
    }

    pub fn first_sample(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn coordinates(&self) -> Option<Vec<Coord<f64>>> {
        metrics::extract_coordinate_path(&self.samples)
    }

    /// Path as a line string, or `None` for an empty run.
    pub fn path(&self) -> Option<LineString<f64>> {
        self.coordinates().map(LineString::new)
    }
}

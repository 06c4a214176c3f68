// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Endpoint markers shown at the start and end of a run path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Sample;
use crate::time_utils::format_full_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RunPointKind {
    Start,
    End,
}

impl RunPointKind {
    pub fn title(self) -> &'static str {
        match self {
            RunPointKind::Start => "Run Started Here",
            RunPointKind::End => "Run Ended Here",
        }
    }
}

/// A labelled point on the run path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunPoint {
    pub kind: RunPointKind,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    /// Human-readable capture time
    pub subtitle: String,
}

impl RunPoint {
    pub fn from_sample(kind: RunPointKind, sample: &Sample) -> Self {
        Self {
            kind,
            latitude: sample.latitude,
            longitude: sample.longitude,
            timestamp: sample.timestamp,
            title: kind.title().to_string(),
            subtitle: format_full_timestamp(sample.timestamp),
        }
    }
}

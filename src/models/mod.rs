// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod marker;
pub mod run;
pub mod sample;

pub use marker::{RunPoint, RunPointKind};
pub use run::{ActiveRun, CompletedRun, RunMetrics, RunMode};
pub use sample::{LatLng, LocationUpdate, Sample};

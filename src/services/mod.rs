// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod display;
pub mod metrics;
pub mod session;

pub use display::{DisplayError, DistanceUnit, PathBounds, RunDisplay};
pub use session::{RecordingSession, SessionError, SessionSnapshot};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run-Tracker: record runs from GPS samples
//!
//! This crate provides the backend API for recording a run from a stream of
//! location updates, computing its distance and duration, and presenting the
//! finished run for display on a map.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod ticker;
pub mod time_utils;

use config::Config;
use services::RecordingSession;
use tokio::sync::Mutex;

/// Shared application state.
///
/// The recording session is the single owner of the active run; the mutex
/// serializes location appends against live metric refreshes.
pub struct AppState {
    pub config: Config,
    pub session: Mutex<RecordingSession>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: Mutex::new(RecordingSession::new()),
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Periodic refresh of live run metrics.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::AppState;

/// Spawn the background task that refreshes live metrics on every tick.
///
/// The tick only reads samples; it never appends or changes the mode.
pub fn spawn_live_refresh(state: Arc<AppState>) -> JoinHandle<()> {
    let period = state.config.tick_interval;
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let mut session = state.session.lock().await;
            if let Some(metrics) = session.tick() {
                tracing::trace!(
                    distance_meters = ?metrics.distance_meters,
                    duration_seconds = ?metrics.duration_seconds,
                    "Live metrics refreshed"
                );
            }
        }
    })
}

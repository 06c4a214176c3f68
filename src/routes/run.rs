// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run recording routes.
//!
//! The location source drives `start`/`locations`/`stop`; the display side
//! reads the live snapshot and the last completed run.

use crate::error::{AppError, Result};
use crate::models::{LatLng, LocationUpdate, RunMode};
use crate::services::display::{self, placeholder_distance};
use crate::services::{DistanceUnit, RunDisplay};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Upper bound on samples accepted in one request.
const MAX_BATCH_SIZE: usize = 1000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/run", get(get_live))
        .route("/api/run/start", post(start_run))
        .route("/api/run/locations", post(append_locations))
        .route("/api/run/stop", post(stop_run))
        .route("/api/run/last", get(get_last_run))
        .route("/api/run/last/geojson", get(get_last_run_geojson))
}

#[derive(Deserialize)]
struct UnitQuery {
    /// "mi" or "km"; falls back to the configured default
    unit: Option<String>,
}

impl UnitQuery {
    fn resolve(&self, default: DistanceUnit) -> Result<DistanceUnit> {
        match self.unit.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(default),
        }
    }
}

// ─── Recording ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StartResponse {
    pub mode: RunMode,
    pub started_at: String,
}

async fn start_run(State(state): State<Arc<AppState>>) -> Result<Json<StartResponse>> {
    let now = chrono::Utc::now();
    let mut session = state.session.lock().await;
    session.start(now)?;

    Ok(Json(StartResponse {
        mode: session.mode(),
        started_at: format_utc_rfc3339(now),
    }))
}

#[derive(Deserialize)]
struct LocationBatch {
    locations: Vec<LocationUpdate>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AppendResponse {
    pub accepted: usize,
    pub sample_count: usize,
}

fn validate_batch(batch: &LocationBatch) -> Result<()> {
    if batch.locations.is_empty() {
        return Err(AppError::BadRequest(
            "At least one location is required".to_string(),
        ));
    }
    if batch.locations.len() > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "At most {} locations per request",
            MAX_BATCH_SIZE
        )));
    }

    for (index, update) in batch.locations.iter().enumerate() {
        if !update.latitude.is_finite() || !update.longitude.is_finite() {
            return Err(AppError::BadRequest(format!(
                "Location {} has a non-finite coordinate",
                index
            )));
        }
        update.validate().map_err(|e| {
            AppError::BadRequest(format!("Location {} out of range: {}", index, e))
        })?;
    }
    Ok(())
}

/// Append samples from the location source, in the order given.
///
/// The whole batch is validated before anything is appended.
async fn append_locations(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<LocationBatch>,
) -> Result<Json<AppendResponse>> {
    validate_batch(&batch)?;

    let received_at = chrono::Utc::now();
    let accepted = batch.locations.len();
    let mut session = state.session.lock().await;
    if session.mode() != RunMode::Recording {
        return Err(crate::services::SessionError::NotRecording.into());
    }

    let mut sample_count = 0;
    for update in batch.locations {
        sample_count = session.append(update.into_sample(received_at))?;
    }

    Ok(Json(AppendResponse {
        accepted,
        sample_count,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StopResponse {
    pub mode: RunMode,
    pub started_at: String,
    pub stopped_at: String,
    pub sample_count: usize,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
}

async fn stop_run(State(state): State<Arc<AppState>>) -> Result<Json<StopResponse>> {
    let now = chrono::Utc::now();
    let mut session = state.session.lock().await;
    let completed = session.stop(now)?;
    let metrics = completed.metrics();

    let response = StopResponse {
        mode: RunMode::Completed,
        started_at: format_utc_rfc3339(completed.started_at()),
        stopped_at: format_utc_rfc3339(completed.stopped_at()),
        sample_count: completed.samples().len(),
        distance_meters: metrics.distance_meters,
        duration_seconds: metrics.duration_seconds,
    };
    Ok(Json(response))
}

// ─── Live Display ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LiveResponse {
    pub mode: RunMode,
    pub started_at: Option<String>,
    pub sample_count: usize,
    pub unit: DistanceUnit,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
    /// Number of samples the metrics above were computed over; may trail
    /// `sample_count` until the next tick
    pub metrics_sample_count: Option<usize>,
    pub distance_text: Option<String>,
    pub duration_text: Option<String>,
    /// Most recent position, for centering the map
    pub last_location: Option<LatLng>,
    /// Path so far, once it can be drawn
    pub path: Option<Vec<LatLng>>,
}

/// Live view of the session. Metrics are those of the last tick.
async fn get_live(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UnitQuery>,
) -> Result<Json<LiveResponse>> {
    let unit = params.resolve(state.config.default_distance_unit)?;
    let session = state.session.lock().await;
    let snapshot = session.snapshot();

    let distance_meters = snapshot.metrics.and_then(|m| m.distance_meters);
    let duration_seconds = snapshot.metrics.and_then(|m| m.duration_seconds);

    let distance_text = match (snapshot.mode, distance_meters) {
        (_, Some(meters)) => Some(display::format_distance(meters, unit)),
        (RunMode::NotStarted, None) => Some(placeholder_distance(unit)),
        _ => None,
    };

    // A path needs two points before it can be drawn
    let path: Option<Vec<LatLng>> = session
        .active_samples()
        .filter(|samples| samples.len() > 1)
        .map(|samples| samples.iter().map(LatLng::from).collect());

    Ok(Json(LiveResponse {
        mode: snapshot.mode,
        started_at: snapshot.started_at.map(format_utc_rfc3339),
        sample_count: snapshot.sample_count,
        unit,
        distance_meters,
        duration_seconds,
        metrics_sample_count: snapshot.metrics_sample_count,
        distance_text,
        duration_text: duration_seconds.map(display::format_duration),
        last_location: snapshot.last_sample.as_ref().map(LatLng::from),
        path,
    }))
}

// ─── Completed Run ───────────────────────────────────────────

async fn get_last_run(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UnitQuery>,
) -> Result<Json<RunDisplay>> {
    let unit = params.resolve(state.config.default_distance_unit)?;
    let session = state.session.lock().await;
    let run = session
        .last_completed()
        .ok_or_else(|| AppError::NotFound("No completed run".to_string()))?;

    Ok(Json(display::build_display(run, unit)?))
}

async fn get_last_run_geojson(State(state): State<Arc<AppState>>) -> Result<Json<GeoJson>> {
    let session = state.session.lock().await;
    let run = session
        .last_completed()
        .ok_or_else(|| AppError::NotFound("No completed run".to_string()))?;

    Ok(Json(display::to_geojson(run)))
}

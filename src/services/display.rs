// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation of completed runs.
//!
//! Everything here is derived from a [`CompletedRun`]'s raw values: unit
//! conversion, label formatting, endpoint markers and path export for
//! map overlays.

use geo::BoundingRect;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{CompletedRun, RunPoint, RunPointKind, Sample};
use crate::time_utils::format_utc_rfc3339;

const METERS_PER_MILE: f64 = 1609.344;
const METERS_PER_KILOMETER: f64 = 1000.0;
/// Google/Strava encoded polyline precision.
const POLYLINE_PRECISION: u32 = 5;

/// Unit the user chose for distance display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "mi")]
    Miles,
    #[serde(rename = "km")]
    Kilometers,
}

impl DistanceUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
        }
    }

    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Miles => meters / METERS_PER_MILE,
            DistanceUnit::Kilometers => meters / METERS_PER_KILOMETER,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DistanceUnit {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Kilometers),
            other => Err(DisplayError::UnknownUnit(other.to_string())),
        }
    }
}

/// Distance label, e.g. "3.11 mi".
pub fn format_distance(meters: f64, unit: DistanceUnit) -> String {
    format!("{:.2} {}", unit.from_meters(meters), unit.symbol())
}

/// Label shown before any run has been measured.
pub fn placeholder_distance(unit: DistanceUnit) -> String {
    format_distance(0.0, unit)
}

/// Duration label: whole seconds below one minute, whole minutes otherwise.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.0} s", seconds)
    } else {
        format!("{:.0} min", seconds / 60.0)
    }
}

/// Start marker at the first sample and end marker at the last one.
pub fn endpoint_markers(samples: &[Sample]) -> Option<(RunPoint, RunPoint)> {
    let first = samples.first()?;
    let last = samples.last()?;
    Some((
        RunPoint::from_sample(RunPointKind::Start, first),
        RunPoint::from_sample(RunPointKind::End, last),
    ))
}

/// Encode the run path as a precision-5 polyline.
pub fn encode_path(run: &CompletedRun) -> Result<Option<String>, DisplayError> {
    let Some(path) = run.path() else {
        return Ok(None);
    };
    polyline::encode_coordinates(path, POLYLINE_PRECISION)
        .map(Some)
        .map_err(|e| DisplayError::Polyline(e.to_string()))
}

/// Extent of a run path, for fitting the map to the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PathBounds {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl PathBounds {
    /// GeoJSON bbox order: `[min_lon, min_lat, max_lon, max_lat]`.
    pub fn to_bbox(self) -> Vec<f64> {
        vec![
            self.min_longitude,
            self.min_latitude,
            self.max_longitude,
            self.max_latitude,
        ]
    }
}

/// Bounding box of the run path, or `None` for an empty run.
pub fn path_bounds(run: &CompletedRun) -> Option<PathBounds> {
    let rect = run.path()?.bounding_rect()?;
    Some(PathBounds {
        min_latitude: rect.min().y,
        min_longitude: rect.min().x,
        max_latitude: rect.max().y,
        max_longitude: rect.max().x,
    })
}

/// Completed run as presented to the display side.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunDisplay {
    pub started_at: String,
    pub stopped_at: String,
    pub sample_count: usize,
    pub unit: DistanceUnit,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
    /// `None` while the run has fewer than two samples
    pub distance_text: Option<String>,
    pub duration_text: Option<String>,
    pub start_marker: Option<RunPoint>,
    pub end_marker: Option<RunPoint>,
    pub bounds: Option<PathBounds>,
    pub polyline: Option<String>,
}

pub fn build_display(run: &CompletedRun, unit: DistanceUnit) -> Result<RunDisplay, DisplayError> {
    let metrics = run.metrics();
    let (start_marker, end_marker) = match endpoint_markers(run.samples()) {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };

    Ok(RunDisplay {
        started_at: format_utc_rfc3339(run.started_at()),
        stopped_at: format_utc_rfc3339(run.stopped_at()),
        sample_count: run.samples().len(),
        unit,
        distance_meters: metrics.distance_meters,
        duration_seconds: metrics.duration_seconds,
        distance_text: metrics.distance_meters.map(|m| format_distance(m, unit)),
        duration_text: metrics.duration_seconds.map(format_duration),
        start_marker,
        end_marker,
        bounds: path_bounds(run),
        polyline: encode_path(run)?,
    })
}

fn position(sample: &Sample) -> Vec<f64> {
    vec![sample.longitude, sample.latitude]
}

fn marker_feature(marker: &RunPoint, sample: &Sample) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), serde_json::json!(marker.kind));
    properties.insert("title".to_string(), marker.title.clone().into());
    properties.insert("subtitle".to_string(), marker.subtitle.clone().into());
    properties.insert(
        "timestamp".to_string(),
        format_utc_rfc3339(marker.timestamp).into(),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(position(sample)))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Run as a GeoJSON FeatureCollection: the path plus start/end points.
///
/// The path feature is only emitted once there are at least two samples,
/// since a single position is not a valid LineString.
pub fn to_geojson(run: &CompletedRun) -> GeoJson {
    let samples = run.samples();
    let metrics = run.metrics();
    let mut features = Vec::new();

    if samples.len() >= 2 {
        let mut properties = JsonObject::new();
        properties.insert(
            "distance_meters".to_string(),
            serde_json::json!(metrics.distance_meters),
        );
        properties.insert(
            "duration_seconds".to_string(),
            serde_json::json!(metrics.duration_seconds),
        );

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(
                samples.iter().map(position).collect(),
            ))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
        let (start, end) = (
            RunPoint::from_sample(RunPointKind::Start, first),
            RunPoint::from_sample(RunPointKind::End, last),
        );
        features.push(marker_feature(&start, first));
        features.push(marker_feature(&end, last));
    }

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: path_bounds(run).map(PathBounds::to_bbox),
        features,
        foreign_members: None,
    })
}

/// Errors from presentation helpers.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Unknown distance unit: {0}")]
    UnknownUnit(String),

    #[error("Failed to encode polyline: {0}")]
    Polyline(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActiveRun;
    use chrono::{DateTime, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn completed(points: &[(f64, f64, i64)]) -> CompletedRun {
        let mut run = ActiveRun::new(at(0));
        for (lat, lon, secs) in points {
            run.push(Sample::new(*lat, *lon, at(*secs)));
        }
        run.finish(at(100))
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("mi".parse::<DistanceUnit>().unwrap(), DistanceUnit::Miles);
        assert_eq!("KM".parse::<DistanceUnit>().unwrap(), DistanceUnit::Kilometers);
        assert!("furlong".parse::<DistanceUnit>().is_err());
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(1609.344, DistanceUnit::Miles), "1.00 mi");
        assert_eq!(format_distance(5000.0, DistanceUnit::Kilometers), "5.00 km");
        assert_eq!(placeholder_distance(DistanceUnit::Kilometers), "0.00 km");
    }

    #[test]
    fn test_format_duration_switches_to_minutes() {
        assert_eq!(format_duration(0.0), "0 s");
        assert_eq!(format_duration(42.0), "42 s");
        assert_eq!(format_duration(60.0), "1 min");
        assert_eq!(format_duration(1860.0), "31 min");
    }

    #[test]
    fn test_end_marker_uses_last_sample() {
        let run = completed(&[(1.0, 1.0, 0), (2.0, 2.0, 30), (3.0, 3.0, 90)]);
        let (start, end) = endpoint_markers(run.samples()).unwrap();

        assert_eq!(start.kind, RunPointKind::Start);
        assert_eq!(start.latitude, 1.0);
        assert_eq!(start.timestamp, at(0));
        assert_eq!(start.title, "Run Started Here");

        assert_eq!(end.kind, RunPointKind::End);
        assert_eq!(end.latitude, 3.0);
        assert_eq!(end.timestamp, at(90));
        assert_eq!(end.title, "Run Ended Here");
    }

    #[test]
    fn test_build_display_for_short_run() {
        let run = completed(&[(37.0, -122.0, 5)]);
        let display = build_display(&run, DistanceUnit::Miles).unwrap();

        assert_eq!(display.sample_count, 1);
        assert_eq!(display.distance_text, None);
        assert_eq!(display.duration_text, None);
        // A single sample still has both endpoints
        assert!(display.start_marker.is_some());
        assert!(display.end_marker.is_some());
        assert!(display.polyline.is_some());
    }

    #[test]
    fn test_build_display_for_empty_run() {
        let run = completed(&[]);
        let display = build_display(&run, DistanceUnit::Kilometers).unwrap();

        assert_eq!(display.sample_count, 0);
        assert!(display.start_marker.is_none());
        assert!(display.bounds.is_none());
        assert!(display.polyline.is_none());
    }

    #[test]
    fn test_polyline_round_trips_path() {
        let run = completed(&[(38.5, -120.2, 0), (40.7, -120.95, 10), (43.252, -126.453, 20)]);
        let encoded = encode_path(&run).unwrap().unwrap();
        assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn test_geojson_features() {
        let run = completed(&[(0.0, 0.0, 0), (0.0, 1.0, 10)]);
        let GeoJson::FeatureCollection(collection) = to_geojson(&run) else {
            panic!("expected a feature collection");
        };

        assert_eq!(collection.features.len(), 3);
        let path = collection.features[0].geometry.as_ref().unwrap();
        assert!(matches!(&path.value, Value::LineString(coords) if coords.len() == 2));
        assert_eq!(
            collection.features[2].property("title").and_then(|v| v.as_str()),
            Some("Run Ended Here")
        );
    }

    #[test]
    fn test_path_bounds() {
        assert_eq!(path_bounds(&completed(&[])), None);

        let single = path_bounds(&completed(&[(37.4, -122.1, 0)])).unwrap();
        assert_eq!(single.min_latitude, 37.4);
        assert_eq!(single.max_latitude, 37.4);
        assert_eq!(single.min_longitude, -122.1);
        assert_eq!(single.max_longitude, -122.1);

        let run = completed(&[(37.40, -122.10, 0), (37.45, -122.20, 10), (37.42, -122.05, 20)]);
        let bounds = path_bounds(&run).unwrap();
        assert_eq!(
            bounds,
            PathBounds {
                min_latitude: 37.40,
                min_longitude: -122.20,
                max_latitude: 37.45,
                max_longitude: -122.05,
            }
        );
        assert_eq!(bounds.to_bbox(), vec![-122.20, 37.40, -122.05, 37.45]);

        let display = build_display(&run, DistanceUnit::Miles).unwrap();
        assert_eq!(display.bounds, Some(bounds));
    }

    #[test]
    fn test_geojson_bbox() {
        let empty = completed(&[]);
        let GeoJson::FeatureCollection(collection) = to_geojson(&empty) else {
            panic!("expected a feature collection");
        };
        assert_eq!(collection.bbox, None);

        let run = completed(&[(1.0, 2.0, 0), (-1.0, 3.0, 10)]);
        let GeoJson::FeatureCollection(collection) = to_geojson(&run) else {
            panic!("expected a feature collection");
        };
        assert_eq!(collection.bbox, Some(vec![2.0, -1.0, 3.0, 1.0]));
    }

    #[test]
    fn test_geojson_single_sample_has_no_line() {
        let run = completed(&[(0.0, 0.0, 0)]);
        let GeoJson::FeatureCollection(collection) = to_geojson(&run) else {
            panic!("expected a feature collection");
        };
        assert_eq!(collection.features.len(), 2);
    }
}

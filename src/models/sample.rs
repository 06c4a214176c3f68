// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPS sample model.

use chrono::{DateTime, Utc};
use geo::{Coord, Point};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// One GPS reading delivered by the location source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Capture time reported by the location source
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Coordinate in geo's (x = longitude, y = latitude) convention.
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::from(self.coord())
    }
}

/// A keyed latitude/longitude pair for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Sample> for LatLng {
    fn from(sample: &Sample) -> Self {
        Self {
            latitude: sample.latitude,
            longitude: sample.longitude,
        }
    }
}

/// Inbound location update as posted by the location source.
///
/// Validated at the HTTP boundary only; the recording core trusts
/// whatever it is given and keeps arrival order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationUpdate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Capture time. Missing timestamps are stamped on arrival.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl LocationUpdate {
    pub fn into_sample(self, received_at: DateTime<Utc>) -> Sample {
        Sample {
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: self.timestamp.unwrap_or(received_at),
        }
    }
}

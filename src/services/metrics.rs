// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run metrics: path distance, elapsed duration and coordinate path.
//!
//! All functions are pure over an ordered slice of samples (insertion order
//! is capture order). Fewer than two samples yields `None` for distance and
//! duration, meaning "not yet measurable".

use geo::{Coord, Distance, Haversine};

use crate::models::{RunMetrics, Sample};
use crate::time_utils::seconds_between;

/// Great-circle distance between two samples in meters.
pub fn sample_distance(a: &Sample, b: &Sample) -> f64 {
    Haversine.distance(a.point(), b.point())
}

/// Sum of pairwise great-circle distances between consecutive samples.
pub fn compute_distance(samples: &[Sample]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }

    Some(
        samples
            .windows(2)
            .map(|pair| sample_distance(&pair[0], &pair[1]))
            .sum(),
    )
}

/// Timestamp of the last sample minus timestamp of the first, in seconds.
///
/// Negative if the external clock went backwards between the two.
pub fn compute_duration(samples: &[Sample]) -> Option<f64> {
    match samples {
        [first, .., last] => Some(seconds_between(first.timestamp, last.timestamp)),
        _ => None,
    }
}

/// Coordinates of all samples, in order and unfiltered.
pub fn extract_coordinate_path(samples: &[Sample]) -> Option<Vec<Coord<f64>>> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().map(Sample::coord).collect())
}

pub fn compute_metrics(samples: &[Sample]) -> RunMetrics {
    RunMetrics {
        distance_meters: compute_distance(samples),
        duration_seconds: compute_duration(samples),
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run metric properties over longer, realistic paths.

use chrono::{DateTime, Duration, Utc};
use run_tracker::models::Sample;
use run_tracker::services::metrics::{
    compute_distance, compute_duration, extract_coordinate_path, sample_distance,
};

/// A loop around a running track near Stanford, one sample every 2 s.
fn track_loop() -> Vec<Sample> {
    let start = DateTime::parse_from_rfc3339("2024-05-01T07:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let center = (37.4316, -122.1615);
    let radius_deg = 0.0005;

    (0..=60)
        .map(|i| {
            let angle = (i as f64 / 60.0) * std::f64::consts::TAU;
            Sample::new(
                center.0 + radius_deg * angle.sin(),
                center.1 + radius_deg * angle.cos(),
                start + Duration::seconds(i * 2),
            )
        })
        .collect()
}

#[test]
fn test_distance_grows_with_every_prefix() {
    let samples = track_loop();
    let mut previous = 0.0;

    for end in 2..=samples.len() {
        let distance = compute_distance(&samples[..end]).unwrap();
        assert!(distance >= previous, "path shrank at sample {}", end);
        previous = distance;
    }

    // Loop circumference is a few hundred meters
    assert!(previous > 250.0 && previous < 400.0, "got {}", previous);
}

#[test]
fn test_distance_is_sum_of_legs() {
    let samples = track_loop();
    let legs: f64 = samples
        .windows(2)
        .map(|pair| sample_distance(&pair[0], &pair[1]))
        .sum();
    assert_eq!(compute_distance(&samples), Some(legs));
}

#[test]
fn test_loop_duration_is_two_minutes() {
    let samples = track_loop();
    assert_eq!(compute_duration(&samples), Some(120.0));
}

#[test]
fn test_path_matches_samples() {
    let samples = track_loop();
    let path = extract_coordinate_path(&samples).unwrap();

    assert_eq!(path.len(), samples.len());
    for (coord, sample) in path.iter().zip(&samples) {
        assert_eq!(coord.y, sample.latitude);
        assert_eq!(coord.x, sample.longitude);
    }
}

#[test]
fn test_repeated_timestamps_allowed() {
    let t = DateTime::parse_from_rfc3339("2024-05-01T07:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let samples = [
        Sample::new(1.0, 1.0, t),
        Sample::new(1.0, 1.0001, t),
    ];
    assert_eq!(compute_duration(&samples), Some(0.0));
    assert!(compute_distance(&samples).unwrap() > 0.0);
}

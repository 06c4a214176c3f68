// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Long-form timestamp for marker callouts,
/// e.g. "Tuesday, November 14, 2023 at 10:13:20 PM UTC".
pub fn format_full_timestamp(date: DateTime<Utc>) -> String {
    date.format("%A, %B %-d, %Y at %-I:%M:%S %p UTC").to_string()
}

/// Signed difference `later - earlier` in fractional seconds.
///
/// Nanosecond resolution; spans too long for an `i64` of nanoseconds
/// (about 292 years) fall back to milliseconds.
pub fn seconds_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    let delta = later.signed_duration_since(earlier);
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

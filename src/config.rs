// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::services::DistanceUnit;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Interval of the live metrics refresh while recording
    pub tick_interval: Duration,
    /// Distance unit used when a request does not choose one
    pub default_distance_unit: DistanceUnit,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            tick_interval: Duration::from_secs(1),
            default_distance_unit: DistanceUnit::Miles,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let tick_secs: u64 = match env::var("TICK_INTERVAL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("TICK_INTERVAL_SECS", raw))?,
            Err(_) => 1,
        };
        if tick_secs == 0 {
            return Err(ConfigError::Invalid(
                "TICK_INTERVAL_SECS",
                "0".to_string(),
            ));
        }

        let default_distance_unit = match env::var("DEFAULT_DISTANCE_UNIT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("DEFAULT_DISTANCE_UNIT", raw))?,
            Err(_) => DistanceUnit::default(),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            tick_interval: Duration::from_secs(tick_secs),
            default_distance_unit,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

// ABOUTME: Runtime configuration for the connector loaded from environment variables
// ABOUTME: HTTP timeouts, refresh window, scheduler interval, and credential store location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::constants::{env_vars, time, DEFAULT_DATABASE_URL};
use connector_core::errors::{ConnectorError, ConnectorResult};
use std::env;
use std::time::Duration;

/// Timeouts applied to every outbound provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// Total request timeout
    pub request: Duration,
    /// TCP connect timeout
    pub connect: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(time::DEFAULT_HTTP_TIMEOUT_SECS),
            connect: Duration::from_secs(time::DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Connector runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// Outbound HTTP timeouts
    pub http: HttpTimeouts,
    /// Tokens expiring within this window are refreshed before use
    pub refresh_window: Duration,
    /// Proactive refresh scheduler tick
    pub refresh_interval: Duration,
    /// Credential store connection string
    pub database_url: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            http: HttpTimeouts::default(),
            refresh_window: Duration::from_secs(time::DEFAULT_REFRESH_WINDOW_SECS),
            refresh_interval: Duration::from_secs(time::DEFAULT_REFRESH_INTERVAL_SECS),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
        }
    }
}

impl ConnectorConfig {
    /// Load settings from process environment, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set but is not a positive integer
    /// of at most ten years
    pub fn from_env() -> ConnectorResult<Self> {
        Ok(Self {
            http: HttpTimeouts {
                request: env_secs_or(env_vars::HTTP_TIMEOUT_SECS, time::DEFAULT_HTTP_TIMEOUT_SECS)?,
                connect: env_secs_or(
                    env_vars::CONNECT_TIMEOUT_SECS,
                    time::DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
            },
            refresh_window: env_secs_or(
                env_vars::REFRESH_WINDOW_SECS,
                time::DEFAULT_REFRESH_WINDOW_SECS,
            )?,
            refresh_interval: env_secs_or(
                env_vars::REFRESH_INTERVAL_SECS,
                time::DEFAULT_REFRESH_INTERVAL_SECS,
            )?,
            database_url: env_var_or(env_vars::DATABASE_URL, DEFAULT_DATABASE_URL),
        })
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Read a positive number of seconds from the environment
fn env_secs_or(key: &str, default: u64) -> ConnectorResult<Duration> {
    env::var(key).map_or(Ok(Duration::from_secs(default)), |raw| {
        parse_secs(key, &raw)
    })
}

fn parse_secs(key: &str, raw: &str) -> ConnectorResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ConnectorError::config(format!(
            "{key} must be a positive number of seconds, got {raw:?}"
        ))),
        Ok(secs) if secs > time::MAX_SETTING_SECS => Err(ConnectorError::config(format!(
            "{key} must be at most {} seconds, got {secs}",
            time::MAX_SETTING_SECS
        ))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}

// ABOUTME: Connector-wide constants organized by domain
// ABOUTME: Re-exports OAuth endpoint defaults, environment variable names, and timing limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Provider endpoints and default scopes
pub mod oauth;

/// Environment variable names read at startup
pub mod env_vars {
    /// Suffix appended to a platform prefix for the client identifier
    pub const CLIENT_ID_SUFFIX: &str = "_CLIENT_ID";
    /// Suffix appended to a platform prefix for the client secret
    pub const CLIENT_SECRET_SUFFIX: &str = "_CLIENT_SECRET";
    /// Suffix appended to a platform prefix for the redirect URI
    pub const REDIRECT_URI_SUFFIX: &str = "_REDIRECT_URI";
    /// Optional suffix overriding the requested scope
    pub const SCOPE_SUFFIX: &str = "_SCOPE";

    /// Total request timeout for outbound provider calls
    pub const HTTP_TIMEOUT_SECS: &str = "CONNECTOR_HTTP_TIMEOUT_SECS";
    /// TCP connect timeout for outbound provider calls
    pub const CONNECT_TIMEOUT_SECS: &str = "CONNECTOR_CONNECT_TIMEOUT_SECS";
    /// Window before expiry in which a token counts as due for refresh
    pub const REFRESH_WINDOW_SECS: &str = "CONNECTOR_REFRESH_WINDOW_SECS";
    /// Tick interval of the proactive refresh scheduler
    pub const REFRESH_INTERVAL_SECS: &str = "CONNECTOR_REFRESH_INTERVAL_SECS";
    /// Credential store connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
}

/// Timing defaults and limits
pub mod time {
    /// Default total timeout for a single provider request
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
    /// Default connect timeout for a single provider request
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
    /// Tokens expiring within this many seconds are refreshed proactively
    pub const DEFAULT_REFRESH_WINDOW_SECS: u64 = 300;
    /// Default scheduler tick
    pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 600;
    /// Upper bound accepted for a provider-reported token lifetime (ten years)
    pub const MAX_TOKEN_LIFETIME_SECS: i64 = 10 * 365 * 24 * 60 * 60;
    /// Upper bound accepted for any configured timeout, window, or interval (ten years)
    pub const MAX_SETTING_SECS: u64 = 10 * 365 * 24 * 60 * 60;
}

/// Default credential store location
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

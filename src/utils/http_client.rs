// ABOUTME: Shared HTTP client construction with bounded timeouts for provider calls
// ABOUTME: Every outbound OAuth request goes through a client built here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::errors::{ConnectorError, ConnectorResult};
use reqwest::{Client, ClientBuilder};

use crate::config::HttpTimeouts;

/// Create an HTTP client optimized for OAuth flows
///
/// Token exchanges, refreshes, and profile lookups should be fast, so both the
/// total request time and the connect phase are bounded. A timed-out call surfaces
/// as a transport error, never as a hang.
///
/// # Errors
///
/// Returns a configuration error if the TLS backend cannot be initialized
pub fn oauth_client(timeouts: HttpTimeouts) -> ConnectorResult<Client> {
    create_custom_client(|builder| {
        builder
            .timeout(timeouts.request)
            .connect_timeout(timeouts.connect)
    })
}

/// Create an HTTP client with custom configuration
///
/// # Errors
///
/// Returns a configuration error if the client cannot be built
pub fn create_custom_client<F>(config_fn: F) -> ConnectorResult<Client>
where
    F: FnOnce(ClientBuilder) -> ClientBuilder,
{
    let builder = ClientBuilder::new().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    config_fn(builder)
        .build()
        .map_err(|e| ConnectorError::config(format!("failed to build HTTP client: {e}")))
}

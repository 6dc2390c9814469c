// ABOUTME: Authorization URL construction for the provider consent redirect
// ABOUTME: Pure function of the platform configuration, no network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::constants::oauth::RESPONSE_TYPE_CODE;
use connector_core::errors::{ConnectorError, ConnectorResult};
use url::Url;

use crate::config::PlatformConfig;
use crate::platforms;

/// Build the authorization URL for `config`'s platform
///
/// The result points at the platform's authorize endpoint and carries the client
/// identifier, redirect URI, scope, and `response_type=code`, all URL-encoded, plus
/// any platform-specific extras (Twitter's PKCE challenge).
///
/// # Errors
///
/// Returns a configuration error if the configured authorize endpoint is not a valid URL
pub fn build_auth_url(config: &PlatformConfig) -> ConnectorResult<String> {
    authorization_url(config, None)
}

/// Build the authorization URL with an anti-forgery `state` parameter appended
///
/// # Errors
///
/// Returns a configuration error if the configured authorize endpoint is not a valid URL
pub fn build_auth_url_with_state(config: &PlatformConfig, state: &str) -> ConnectorResult<String> {
    authorization_url(config, Some(state))
}

fn authorization_url(config: &PlatformConfig, state: Option<&str>) -> ConnectorResult<String> {
    let mut url = Url::parse(&config.authorize_url).map_err(|e| {
        ConnectorError::config(format!(
            "invalid authorize URL for {}: {e}",
            config.platform
        ))
    })?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("response_type", RESPONSE_TYPE_CODE)
            .append_pair("scope", &config.scope);

        for (key, value) in platforms::descriptor(config.platform).authorize_extras {
            query.append_pair(key, value);
        }
        if let Some(state) = state {
            query.append_pair("state", state);
        }
    }

    Ok(url.to_string())
}

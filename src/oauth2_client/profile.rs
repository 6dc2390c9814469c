// ABOUTME: Profile resolver fetching the remote account identity with a bearer token
// ABOUTME: Platform-specific response bodies are decoded through the descriptor table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::errors::{ConnectorError, ConnectorResult, UpstreamStage};
use connector_core::models::{Profile, SecretString};
use tracing::{debug, warn};

use super::client::upstream_reason;
use crate::config::PlatformConfig;
use crate::platforms;

/// Looks up the stable account identifier and display name behind an access token
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    client: reqwest::Client,
}

impl ProfileResolver {
    /// Create a resolver sharing an existing connection pool
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch the profile for `access_token`
    ///
    /// # Errors
    ///
    /// Returns `ProfileFetch` on network failure, timeout, non-2xx status, or a body
    /// that does not carry an account identifier
    pub async fn fetch_profile(
        &self,
        config: &PlatformConfig,
        access_token: &SecretString,
    ) -> ConnectorResult<Profile> {
        let platform = config.platform;
        let stage = UpstreamStage::Profile;
        debug!(%platform, url = %config.profile_url, "Fetching provider profile");

        let response = self
            .client
            .get(&config.profile_url)
            .bearer_auth(access_token.expose())
            .send()
            .await
            .map_err(|e| {
                warn!(%platform, error = %e, "Profile endpoint unreachable");
                ConnectorError::from_transport(stage, platform, &e)
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ConnectorError::from_transport(stage, platform, &e))?;

        if !status.is_success() {
            let reason = upstream_reason(&body);
            warn!(
                %platform,
                status = status.as_u16(),
                %reason,
                "Profile endpoint rejected request"
            );
            return Err(ConnectorError::upstream(
                stage,
                platform,
                Some(status.as_u16()),
                reason,
            ));
        }

        let profile = (platforms::descriptor(platform).parse_profile)(&body).map_err(|_| {
            ConnectorError::upstream(
                stage,
                platform,
                Some(status.as_u16()),
                "malformed profile response",
            )
        })?;

        if profile.external_account_id.is_empty() {
            return Err(ConnectorError::upstream(
                stage,
                platform,
                Some(status.as_u16()),
                "profile has no account identifier",
            ));
        }
        Ok(profile)
    }
}

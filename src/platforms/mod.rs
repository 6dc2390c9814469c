// ABOUTME: Platform-variant descriptor table for the supported social platforms
// ABOUTME: Maps each platform to its endpoints, client auth style, parameter builders, and profile parser
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Platform Descriptors
//!
//! Providers disagree on the shape of their OAuth calls: Twitter wants a PKCE
//! verifier and HTTP Basic client credentials, Instagram refreshes with the current
//! access token instead of a refresh token, and every profile endpoint returns a
//! different JSON body. Each platform contributes one static [`PlatformDescriptor`]
//! capturing those differences, and the OAuth client stays generic over it.
//!
//! Adding a platform means adding a [`Platform`] variant, a module here, and one
//! arm in [`descriptor`].

/// Instagram descriptor
pub mod instagram;
/// LinkedIn descriptor
pub mod linkedin;
/// Twitter / X descriptor
pub mod twitter;

use connector_core::models::{Platform, Profile};
use std::fmt;

use crate::config::PlatformConfig;

/// Form parameters for a token endpoint call
pub type FormParams = Vec<(&'static str, String)>;

/// Production endpoint URLs used when a config does not override them
#[derive(Debug, Clone, Copy)]
pub struct OAuthEndpoints {
    /// Authorization endpoint
    pub authorize: &'static str,
    /// Code exchange endpoint
    pub token: &'static str,
    /// Token refresh endpoint
    pub refresh: &'static str,
    /// Profile lookup endpoint
    pub profile: &'static str,
}

/// How the client authenticates itself to the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuth {
    /// `client_id` and `client_secret` travel in the form body
    RequestBody,
    /// `client_id:client_secret` travels in an HTTP Basic header
    BasicHeader,
}

/// Which stored credential a refresh call consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshInput {
    /// A distinct refresh token issued at exchange time
    RefreshToken,
    /// The current access token itself
    AccessToken,
}

/// Static description of one platform's OAuth conventions
pub struct PlatformDescriptor {
    /// Platform described
    pub platform: Platform,
    /// Scope requested when the config does not override it
    pub default_scope: &'static str,
    /// Production endpoints
    pub default_endpoints: OAuthEndpoints,
    /// Client authentication style for exchange and refresh
    pub client_auth: ClientAuth,
    /// Credential consumed by refresh
    pub refresh_input: RefreshInput,
    /// Whether the platform issues refresh tokens worth storing
    pub issues_refresh_token: bool,
    /// Extra query parameters appended to the authorize URL
    pub authorize_extras: &'static [(&'static str, &'static str)],
    /// Form body for the code exchange
    pub exchange_params: fn(&PlatformConfig, &str) -> FormParams,
    /// Form body for a refresh, given the [`RefreshInput`] credential
    pub refresh_params: fn(&PlatformConfig, &str) -> FormParams,
    /// Decode the profile endpoint body
    pub parse_profile: fn(&[u8]) -> Result<Profile, serde_json::Error>,
}

impl fmt::Debug for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformDescriptor")
            .field("platform", &self.platform)
            .field("default_scope", &self.default_scope)
            .field("client_auth", &self.client_auth)
            .field("refresh_input", &self.refresh_input)
            .finish_non_exhaustive()
    }
}

/// Descriptor for `platform`
#[must_use]
pub fn descriptor(platform: Platform) -> &'static PlatformDescriptor {
    match platform {
        Platform::Instagram => &instagram::DESCRIPTOR,
        Platform::Twitter => &twitter::DESCRIPTOR,
        Platform::Linkedin => &linkedin::DESCRIPTOR,
    }
}

/// Client credentials in the body, used by platforms without Basic auth
fn body_credentials(config: &PlatformConfig) -> FormParams {
    vec![
        ("client_id", config.client_id.clone()),
        ("client_secret", config.client_secret.expose().to_owned()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_platform() {
        for platform in Platform::ALL {
            assert_eq!(descriptor(platform).platform, platform);
        }
    }

    #[test]
    fn test_only_instagram_refreshes_with_access_token() {
        let access_token_platforms: Vec<_> = Platform::ALL
            .into_iter()
            .filter(|p| descriptor(*p).refresh_input == RefreshInput::AccessToken)
            .collect();
        assert_eq!(access_token_platforms, vec![Platform::Instagram]);
    }
}

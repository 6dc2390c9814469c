// ABOUTME: Twitter / X OAuth 2.0 conventions: plain PKCE and HTTP Basic client auth
// ABOUTME: Profile comes wrapped in a `data` envelope from the v2 users/me endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::constants::oauth::{
    GRANT_AUTHORIZATION_CODE, GRANT_REFRESH_TOKEN, TWITTER_AUTHORIZE_URL, TWITTER_DEFAULT_SCOPE,
    TWITTER_PKCE_METHOD, TWITTER_PKCE_VERIFIER, TWITTER_PROFILE_URL, TWITTER_REFRESH_URL,
    TWITTER_TOKEN_URL,
};
use connector_core::models::{Platform, Profile};
use serde::Deserialize;

use super::{ClientAuth, FormParams, OAuthEndpoints, PlatformDescriptor, RefreshInput};
use crate::config::PlatformConfig;

pub(crate) static DESCRIPTOR: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Twitter,
    default_scope: TWITTER_DEFAULT_SCOPE,
    default_endpoints: OAuthEndpoints {
        authorize: TWITTER_AUTHORIZE_URL,
        token: TWITTER_TOKEN_URL,
        refresh: TWITTER_REFRESH_URL,
        profile: TWITTER_PROFILE_URL,
    },
    client_auth: ClientAuth::BasicHeader,
    refresh_input: RefreshInput::RefreshToken,
    issues_refresh_token: true,
    // Verifier is a fixed placeholder, so the challenge must be `plain`
    authorize_extras: &[
        ("code_challenge", TWITTER_PKCE_VERIFIER),
        ("code_challenge_method", TWITTER_PKCE_METHOD),
    ],
    exchange_params,
    refresh_params,
    parse_profile,
};

fn exchange_params(config: &PlatformConfig, code: &str) -> FormParams {
    vec![
        ("client_id", config.client_id.clone()),
        ("grant_type", GRANT_AUTHORIZATION_CODE.to_owned()),
        ("redirect_uri", config.redirect_uri.clone()),
        ("code", code.to_owned()),
        ("code_verifier", TWITTER_PKCE_VERIFIER.to_owned()),
    ]
}

fn refresh_params(config: &PlatformConfig, refresh_token: &str) -> FormParams {
    vec![
        ("client_id", config.client_id.clone()),
        ("grant_type", GRANT_REFRESH_TOKEN.to_owned()),
        ("refresh_token", refresh_token.to_owned()),
    ]
}

#[derive(Deserialize)]
struct UsersMeResponse {
    data: TwitterUser,
}

#[derive(Deserialize)]
struct TwitterUser {
    id: String,
    username: String,
}

fn parse_profile(body: &[u8]) -> Result<Profile, serde_json::Error> {
    let response: UsersMeResponse = serde_json::from_slice(body)?;
    Ok(Profile {
        external_account_id: response.data.id,
        display_name: response.data.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_sends_verifier_but_not_secret() {
        let config = PlatformConfig::new(Platform::Twitter, "tw", "tw-secret", "https://a/cb");
        let params = exchange_params(&config, "abc123");
        assert!(params.contains(&("code_verifier", "challenge".to_owned())));
        assert!(params.contains(&("code", "abc123".to_owned())));
        assert!(!params.iter().any(|(k, _)| *k == "client_secret"));
    }

    #[test]
    fn test_parse_profile_unwraps_data() {
        let profile =
            parse_profile(br#"{"data":{"id":"2244994945","name":"Brand","username":"brand"}}"#)
                .unwrap();
        assert_eq!(profile.external_account_id, "2244994945");
        assert_eq!(profile.display_name, "brand");
    }
}

// ABOUTME: Instagram OAuth conventions: body client credentials and access-token refresh
// ABOUTME: Refresh exchanges the current long-lived token for a new one via ig_refresh_token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::constants::oauth::{
    GRANT_AUTHORIZATION_CODE, INSTAGRAM_AUTHORIZE_URL, INSTAGRAM_DEFAULT_SCOPE,
    INSTAGRAM_PROFILE_URL, INSTAGRAM_REFRESH_GRANT, INSTAGRAM_REFRESH_URL, INSTAGRAM_TOKEN_URL,
};
use connector_core::models::{Platform, Profile};
use serde::Deserialize;

use super::{
    body_credentials, ClientAuth, FormParams, OAuthEndpoints, PlatformDescriptor, RefreshInput,
};
use crate::config::PlatformConfig;

pub(crate) static DESCRIPTOR: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Instagram,
    default_scope: INSTAGRAM_DEFAULT_SCOPE,
    default_endpoints: OAuthEndpoints {
        authorize: INSTAGRAM_AUTHORIZE_URL,
        token: INSTAGRAM_TOKEN_URL,
        refresh: INSTAGRAM_REFRESH_URL,
        profile: INSTAGRAM_PROFILE_URL,
    },
    client_auth: ClientAuth::RequestBody,
    refresh_input: RefreshInput::AccessToken,
    issues_refresh_token: false,
    authorize_extras: &[],
    exchange_params,
    refresh_params,
    parse_profile,
};

fn exchange_params(config: &PlatformConfig, code: &str) -> FormParams {
    let mut params = body_credentials(config);
    params.extend([
        ("grant_type", GRANT_AUTHORIZATION_CODE.to_owned()),
        ("redirect_uri", config.redirect_uri.clone()),
        ("code", code.to_owned()),
    ]);
    params
}

// The long-lived token is its own refresh credential.
fn refresh_params(_config: &PlatformConfig, access_token: &str) -> FormParams {
    vec![
        ("grant_type", INSTAGRAM_REFRESH_GRANT.to_owned()),
        ("access_token", access_token.to_owned()),
    ]
}

#[derive(Deserialize)]
struct InstagramProfile {
    id: String,
    username: String,
}

fn parse_profile(body: &[u8]) -> Result<Profile, serde_json::Error> {
    let profile: InstagramProfile = serde_json::from_slice(body)?;
    Ok(Profile {
        external_account_id: profile.id,
        display_name: profile.username,
    })
}

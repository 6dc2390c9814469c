// ABOUTME: LinkedIn OAuth conventions with OpenID userinfo profile lookup
// ABOUTME: Standard authorization-code and refresh-token grants with body client credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::constants::oauth::{
    GRANT_AUTHORIZATION_CODE, GRANT_REFRESH_TOKEN, LINKEDIN_AUTHORIZE_URL, LINKEDIN_DEFAULT_SCOPE,
    LINKEDIN_PROFILE_URL, LINKEDIN_REFRESH_URL, LINKEDIN_TOKEN_URL,
};
use connector_core::models::{Platform, Profile};
use serde::Deserialize;

use super::{
    body_credentials, ClientAuth, FormParams, OAuthEndpoints, PlatformDescriptor, RefreshInput,
};
use crate::config::PlatformConfig;

pub(crate) static DESCRIPTOR: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Linkedin,
    default_scope: LINKEDIN_DEFAULT_SCOPE,
    default_endpoints: OAuthEndpoints {
        authorize: LINKEDIN_AUTHORIZE_URL,
        token: LINKEDIN_TOKEN_URL,
        refresh: LINKEDIN_REFRESH_URL,
        profile: LINKEDIN_PROFILE_URL,
    },
    client_auth: ClientAuth::RequestBody,
    refresh_input: RefreshInput::RefreshToken,
    issues_refresh_token: true,
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

fn refresh_params(config: &PlatformConfig, refresh_token: &str) -> FormParams {
    let mut params = body_credentials(config);
    params.extend([
        ("grant_type", GRANT_REFRESH_TOKEN.to_owned()),
        ("refresh_token", refresh_token.to_owned()),
    ]);
    params
}

/// OpenID Connect userinfo claims
#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

fn parse_profile(body: &[u8]) -> Result<Profile, serde_json::Error> {
    let info: UserInfo = serde_json::from_slice(body)?;
    let display_name = info.name.unwrap_or_else(|| {
        [info.given_name, info.family_name]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    });
    Ok(Profile {
        external_account_id: info.sub,
        display_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_falls_back_to_given_and_family_name() {
        let profile =
            parse_profile(br#"{"sub":"li_7","given_name":"Ada","family_name":"Lovelace"}"#)
                .unwrap();
        assert_eq!(profile.external_account_id, "li_7");
        assert_eq!(profile.display_name, "Ada Lovelace");
    }

    #[test]
    fn test_refresh_params_carry_body_credentials() {
        let config = PlatformConfig::new(Platform::Linkedin, "li", "li-secret", "https://a/cb");
        let params = refresh_params(&config, "r1");
        assert!(params.contains(&("client_secret", "li-secret".to_owned())));
        assert!(params.contains(&("refresh_token", "r1".to_owned())));
    }
}

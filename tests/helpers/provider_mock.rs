// ABOUTME: Wiremock stubs for the token, refresh, and profile endpoints of each platform
// ABOUTME: Matches on grant type, code, and bearer token so stubs never shadow each other
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{json, Value};
use social_connector::models::{InternalUserId, LinkedAccount, Platform};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use super::TestConnector;

pub const fn token_path(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "/oauth/access_token",
        Platform::Twitter => "/2/oauth2/token",
        Platform::Linkedin => "/oauth/v2/accessToken",
    }
}

pub const fn refresh_path(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "/refresh_access_token",
        Platform::Twitter => "/2/oauth2/token",
        Platform::Linkedin => "/oauth/v2/accessToken",
    }
}

pub const fn profile_path(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "/me",
        Platform::Twitter => "/2/users/me",
        Platform::Linkedin => "/v2/userinfo",
    }
}

const fn refresh_grant(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "grant_type=ig_refresh_token",
        Platform::Twitter | Platform::Linkedin => "grant_type=refresh_token",
    }
}

/// Profile body in the platform's own shape
pub fn profile_body(platform: Platform, external_id: &str, display_name: &str) -> Value {
    match platform {
        Platform::Instagram => json!({ "id": external_id, "username": display_name }),
        Platform::Twitter => {
            json!({ "data": { "id": external_id, "name": "Brand", "username": display_name } })
        }
        Platform::Linkedin => {
            json!({ "sub": external_id, "name": display_name, "email_verified": true })
        }
    }
}

/// Token response body
pub fn token_body(access: &str, refresh: Option<&str>, expires_in: i64) -> Value {
    let mut body = json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": expires_in,
    });
    if let Some(refresh) = refresh {
        body["refresh_token"] = json!(refresh);
    }
    body
}

/// Stub one code exchange for `code`
pub async fn mount_exchange(
    t: &TestConnector,
    platform: Platform,
    code: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("POST"))
        .and(path(token_path(platform)))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains(format!("code={code}")))
        .respond_with(response)
        .up_to_n_times(1)
        .mount(&t.server)
        .await;
}

/// Stub the profile lookup for `access_token`
pub async fn mount_profile(
    t: &TestConnector,
    platform: Platform,
    access_token: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path(profile_path(platform)))
        .and(header("authorization", format!("Bearer {access_token}").as_str()))
        .respond_with(response)
        .mount(&t.server)
        .await;
}

/// Stub one refresh call consuming `credential`
pub async fn mount_refresh(
    t: &TestConnector,
    platform: Platform,
    credential: &str,
    response: ResponseTemplate,
) {
    let field = if platform == Platform::Instagram {
        "access_token"
    } else {
        "refresh_token"
    };
    Mock::given(method("POST"))
        .and(path(refresh_path(platform)))
        .and(body_string_contains(refresh_grant(platform)))
        .and(body_string_contains(format!("{field}={credential}")))
        .respond_with(response)
        .up_to_n_times(1)
        .mount(&t.server)
        .await;
}

/// Parameters of a successful connect
pub struct Connect<'a> {
    pub platform: Platform,
    pub code: &'a str,
    pub user: &'a str,
    pub access: &'a str,
    pub refresh: Option<&'a str>,
    pub expires_in: i64,
    pub external_id: &'a str,
    pub display_name: &'a str,
}

impl Default for Connect<'_> {
    fn default() -> Self {
        Self {
            platform: Platform::Linkedin,
            code: "code-1",
            user: super::USER_A,
            access: "access-1",
            refresh: Some("refresh-1"),
            expires_in: 3600,
            external_id: "ext-1",
            display_name: "Brand Page",
        }
    }
}

/// Stub a successful exchange and profile, then run `complete_auth`
pub async fn connect(t: &TestConnector, params: &Connect<'_>) -> LinkedAccount {
    mount_exchange(
        t,
        params.platform,
        params.code,
        ResponseTemplate::new(200).set_body_json(token_body(
            params.access,
            params.refresh,
            params.expires_in,
        )),
    )
    .await;
    mount_profile(
        t,
        params.platform,
        params.access,
        ResponseTemplate::new(200).set_body_json(profile_body(
            params.platform,
            params.external_id,
            params.display_name,
        )),
    )
    .await;

    t.connector
        .complete_auth(
            params.platform.as_str(),
            params.code,
            &InternalUserId::new(params.user),
        )
        .await
        .unwrap()
}

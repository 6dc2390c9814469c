// ABOUTME: Integration tests for the connect flow: code exchange, profile lookup, and atomic upsert
// ABOUTME: Providers are faked with wiremock; failures must leave no trace in the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use chrono::{Duration, Utc};
use helpers::provider_mock::{
    connect, mount_exchange, mount_profile, profile_body, token_body, Connect,
};
use helpers::{setup, setup_with_store, test_config, user, USER_A, USER_B};
use social_connector::config::HttpTimeouts;
use social_connector::database_plugins::InMemoryCredentialStore;
use social_connector::errors::{ConnectorError, ErrorCode};
use social_connector::models::Platform;
use std::sync::Arc;
use wiremock::matchers::{any, header, method};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_connect_instagram_scenario() {
    let t = setup(&[Platform::Instagram]).await;
    mount_exchange(
        &t,
        Platform::Instagram,
        "abc123",
        ResponseTemplate::new(200).set_body_json(token_body("tok1", None, 3600)),
    )
    .await;
    mount_profile(
        &t,
        Platform::Instagram,
        "tok1",
        ResponseTemplate::new(200).set_body_json(profile_body(
            Platform::Instagram,
            "ig_42",
            "brand_handle",
        )),
    )
    .await;

    let account = t
        .connector
        .complete_auth("instagram", "abc123", &user(USER_A))
        .await
        .unwrap();

    assert_eq!(account.platform, Platform::Instagram);
    assert_eq!(account.external_account_id, "ig_42");
    assert_eq!(account.display_name, "brand_handle");
    assert!(account.is_active);
    assert_eq!(account.access_token.as_ref().unwrap().expose(), "tok1");
    assert!(account.refresh_token.is_none());
    assert_eq!(account.internal_user_id, user(USER_A));
}

#[tokio::test]
async fn test_expiry_is_exchange_time_plus_reported_lifetime() {
    let t = setup(&[Platform::Linkedin]).await;
    let before = Utc::now();
    let account = connect(
        &t,
        &Connect {
            expires_in: 3600,
            ..Connect::default()
        },
    )
    .await;
    let after = Utc::now();

    let stored = t.stored(&account).await;
    assert!(stored.token_expires_at >= before + Duration::seconds(3600));
    assert!(stored.token_expires_at <= after + Duration::seconds(3600));
}

#[tokio::test]
async fn test_reconnect_same_user_updates_single_record() {
    let t = setup(&[Platform::Linkedin]).await;
    let first = connect(&t, &Connect::default()).await;
    let second = connect(
        &t,
        &Connect {
            code: "code-2",
            access: "access-2",
            refresh: Some("refresh-2"),
            display_name: "Renamed Page",
            ..Connect::default()
        },
    )
    .await;

    assert_eq!(first.id, second.id);
    let accounts = t.connector.list_accounts(&user(USER_A)).await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].display_name, "Renamed Page");

    let stored = t.stored(&second).await;
    assert_eq!(stored.access_token.unwrap().expose(), "access-2");
    assert_eq!(stored.refresh_token.unwrap().expose(), "refresh-2");
}

#[tokio::test]
async fn test_reconnect_after_disconnect_reactivates() {
    let t = setup(&[Platform::Linkedin]).await;
    let first = connect(&t, &Connect::default()).await;
    t.connector
        .disconnect_account(&user(USER_A), first.id)
        .await
        .unwrap();

    let again = connect(
        &t,
        &Connect {
            code: "code-2",
            access: "access-2",
            ..Connect::default()
        },
    )
    .await;
    assert_eq!(again.id, first.id);
    assert!(again.is_active);
    assert_eq!(again.access_token.unwrap().expose(), "access-2");
}

#[tokio::test]
async fn test_connect_by_other_user_is_ownership_conflict() {
    let t = setup(&[Platform::Instagram]).await;
    let owned = connect(
        &t,
        &Connect {
            platform: Platform::Instagram,
            access: "tok-a",
            refresh: None,
            external_id: "ig_42",
            display_name: "brand_handle",
            ..Connect::default()
        },
    )
    .await;
    let before = t.stored(&owned).await;

    mount_exchange(
        &t,
        Platform::Instagram,
        "code-b",
        ResponseTemplate::new(200).set_body_json(token_body("tok-b", None, 7200)),
    )
    .await;
    mount_profile(
        &t,
        Platform::Instagram,
        "tok-b",
        ResponseTemplate::new(200).set_body_json(profile_body(
            Platform::Instagram,
            "ig_42",
            "hijacked",
        )),
    )
    .await;

    let err = t
        .connector
        .complete_auth("instagram", "code-b", &user(USER_B))
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::AccountOwnershipConflict { .. }));
    assert_eq!(err.code(), ErrorCode::ResourceConflict);

    let after = t.stored(&owned).await;
    assert_eq!(after.internal_user_id, user(USER_A));
    assert_eq!(after.display_name, "brand_handle");
    assert_eq!(after.access_token.unwrap().expose(), "tok-a");
    assert_eq!(after.token_expires_at, before.token_expires_at);
    assert!(t.connector.list_accounts(&user(USER_B)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_platform_makes_no_request() {
    let t = setup(&[Platform::Instagram]).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&t.server)
        .await;

    for identifier in ["friendster", "linkedin"] {
        let err = t
            .connector
            .complete_auth(identifier, "abc123", &user(USER_A))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectorError::UnsupportedPlatform { .. }));
    }
    assert_eq!(t.request_count().await, 0);
}

#[tokio::test]
async fn test_empty_code_is_missing_code() {
    let t = setup(&[Platform::Twitter]).await;
    let err = t
        .connector
        .complete_auth("twitter", "", &user(USER_A))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConnectorError::MissingCode {
            platform: Platform::Twitter
        }
    ));
    assert_eq!(t.request_count().await, 0);
}

#[tokio::test]
async fn test_exchange_rejection_stores_nothing() {
    let t = setup(&[Platform::Linkedin]).await;
    mount_exchange(
        &t,
        Platform::Linkedin,
        "bad-code",
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_request",
            "error_description": "Unable to retrieve access token"
        })),
    )
    .await;

    let err = t
        .connector
        .complete_auth("linkedin", "bad-code", &user(USER_A))
        .await
        .unwrap_err();
    match &err {
        ConnectorError::TokenExchange {
            platform, status, ..
        } => {
            assert_eq!(*platform, Platform::Linkedin);
            assert_eq!(*status, Some(400));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.user_message(), "Failed to authenticate with LinkedIn");
    assert!(t.connector.list_accounts(&user(USER_A)).await.unwrap().is_empty());
    // No profile lookup after a failed exchange
    assert_eq!(t.request_count().await, 1);
}

#[tokio::test]
async fn test_exchange_without_expires_in_is_rejected() {
    let t = setup(&[Platform::Instagram]).await;
    mount_exchange(
        &t,
        Platform::Instagram,
        "abc123",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "access_token": "tok1", "user_id": 42 })),
    )
    .await;

    let err = t
        .connector
        .complete_auth("instagram", "abc123", &user(USER_A))
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::TokenExchange { .. }));
    assert!(t.connector.list_accounts(&user(USER_A)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_failure_stores_nothing() {
    let t = setup(&[Platform::Twitter]).await;
    mount_exchange(
        &t,
        Platform::Twitter,
        "abc123",
        ResponseTemplate::new(200).set_body_json(token_body("tw-access", Some("tw-refresh"), 7200)),
    )
    .await;
    mount_profile(
        &t,
        Platform::Twitter,
        "tw-access",
        ResponseTemplate::new(503),
    )
    .await;

    let err = t
        .connector
        .complete_auth("twitter", "abc123", &user(USER_A))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConnectorError::ProfileFetch {
            status: Some(503),
            ..
        }
    ));
    assert!(t.connector.list_accounts(&user(USER_A)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exchange_timeout_is_token_exchange_error() {
    let mut config = test_config();
    config.http = HttpTimeouts {
        request: std::time::Duration::from_millis(200),
        connect: std::time::Duration::from_millis(200),
    };
    let t = setup_with_store(
        &[Platform::Linkedin],
        Arc::new(InMemoryCredentialStore::new()),
        config,
    )
    .await;
    mount_exchange(
        &t,
        Platform::Linkedin,
        "slow-code",
        ResponseTemplate::new(200)
            .set_body_json(token_body("late", Some("late-r"), 3600))
            .set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let err = t
        .connector
        .complete_auth("linkedin", "slow-code", &user(USER_A))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConnectorError::TokenExchange { status: None, .. }
    ));
    assert!(t.connector.list_accounts(&user(USER_A)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_timeout_is_profile_fetch_error() {
    let mut config = test_config();
    config.http = HttpTimeouts {
        request: std::time::Duration::from_millis(200),
        connect: std::time::Duration::from_millis(200),
    };
    let t = setup_with_store(
        &[Platform::Linkedin],
        Arc::new(InMemoryCredentialStore::new()),
        config,
    )
    .await;
    mount_exchange(
        &t,
        Platform::Linkedin,
        "code-1",
        ResponseTemplate::new(200).set_body_json(token_body("access-1", Some("refresh-1"), 3600)),
    )
    .await;
    mount_profile(
        &t,
        Platform::Linkedin,
        "access-1",
        ResponseTemplate::new(200)
            .set_body_json(profile_body(Platform::Linkedin, "ext-1", "Brand Page"))
            .set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let err = t
        .connector
        .complete_auth("linkedin", "code-1", &user(USER_A))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConnectorError::ProfileFetch { status: None, .. }
    ));
    assert!(t.connector.list_accounts(&user(USER_A)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_twitter_exchange_uses_basic_auth_and_pkce_verifier() {
    let t = setup(&[Platform::Twitter]).await;
    // tw-client:tw-secret-value
    Mock::given(method("POST"))
        .and(header(
            "authorization",
            "Basic dHctY2xpZW50OnR3LXNlY3JldC12YWx1ZQ==",
        ))
        .and(wiremock::matchers::body_string_contains(
            "code_verifier=challenge",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body("tw-access", Some("tw-r"), 7200)),
        )
        .mount(&t.server)
        .await;
    mount_profile(
        &t,
        Platform::Twitter,
        "tw-access",
        ResponseTemplate::new(200).set_body_json(profile_body(Platform::Twitter, "tw_1", "brand")),
    )
    .await;

    let account = t
        .connector
        .complete_auth("x", "abc123", &user(USER_A))
        .await
        .unwrap();
    assert_eq!(account.platform, Platform::Twitter);
    assert_eq!(account.refresh_token.unwrap().expose(), "tw-r");

    let requests = t.server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(!body.contains("client_secret"));
}

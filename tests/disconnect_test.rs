// ABOUTME: Integration tests for disconnecting linked accounts and reporting connection status
// ABOUTME: Disconnect is owner-scoped, idempotent, and wipes stored credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::provider_mock::{connect, Connect};
use helpers::{setup, user, USER_A, USER_B};
use social_connector::errors::{ConnectorError, ErrorCode};
use social_connector::models::Platform;
use uuid::Uuid;

#[tokio::test]
async fn test_disconnect_clears_credentials() {
    let t = setup(&[Platform::Linkedin]).await;
    let account = connect(&t, &Connect::default()).await;

    t.connector
        .disconnect_account(&user(USER_A), account.id)
        .await
        .unwrap();

    let stored = t.stored(&account).await;
    assert!(!stored.is_active);
    assert!(stored.access_token.is_none());
    assert!(stored.refresh_token.is_none());
    assert_eq!(stored.external_account_id, "ext-1");
    assert!(stored.updated_at >= account.updated_at);
}

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    let t = setup(&[Platform::Linkedin]).await;
    let account = connect(&t, &Connect::default()).await;
    let owner = user(USER_A);

    t.connector.disconnect_account(&owner, account.id).await.unwrap();
    let first = t.stored(&account).await;
    t.connector.disconnect_account(&owner, account.id).await.unwrap();
    let second = t.stored(&account).await;

    assert!(!second.is_active);
    assert_eq!(first.updated_at, second.updated_at);
}

#[tokio::test]
async fn test_disconnect_by_other_user_is_not_found() {
    let t = setup(&[Platform::Linkedin]).await;
    let account = connect(&t, &Connect::default()).await;

    let err = t
        .connector
        .disconnect_account(&user(USER_B), account.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::NotFound { .. }));
    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
    assert_eq!(err.code().http_status(), 404);

    let stored = t.stored(&account).await;
    assert!(stored.is_active);
    assert_eq!(stored.access_token.unwrap().expose(), "access-1");
}

#[tokio::test]
async fn test_disconnect_unknown_account_is_not_found() {
    let t = setup(&[Platform::Linkedin]).await;
    let err = t
        .connector
        .disconnect_account(&user(USER_A), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_accounts_is_scoped_and_secret_free() {
    let t = setup(&[Platform::Instagram, Platform::Linkedin]).await;
    connect(&t, &Connect::default()).await;
    connect(
        &t,
        &Connect {
            platform: Platform::Instagram,
            code: "ig-code",
            access: "ig-access-secret",
            refresh: None,
            external_id: "ig_42",
            display_name: "brand_handle",
            ..Connect::default()
        },
    )
    .await;
    connect(
        &t,
        &Connect {
            code: "code-b",
            user: USER_B,
            access: "access-b",
            external_id: "ext-b",
            ..Connect::default()
        },
    )
    .await;

    let accounts = t.connector.list_accounts(&user(USER_A)).await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().all(|a| a.external_account_id != "ext-b"));

    let json = serde_json::to_string(&accounts).unwrap();
    assert!(!json.contains("ig-access-secret"));
    assert!(!json.contains("refresh-1"));
}

#[tokio::test]
async fn test_connection_status_per_configured_platform() {
    let t = setup(&[Platform::Instagram, Platform::Linkedin]).await;
    let account = connect(&t, &Connect::default()).await;

    let status = t.connector.connection_status(&user(USER_A)).await.unwrap();
    assert_eq!(status.len(), 2);
    assert!(status[&Platform::Linkedin]);
    assert!(!status[&Platform::Instagram]);
    assert!(!status.contains_key(&Platform::Twitter));

    t.connector
        .disconnect_account(&user(USER_A), account.id)
        .await
        .unwrap();
    let status = t.connector.connection_status(&user(USER_A)).await.unwrap();
    assert!(!status[&Platform::Linkedin]);
}

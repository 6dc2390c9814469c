// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Mock provider endpoints with wiremock and build connectors wired to them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod provider_mock;

use social_connector::config::{ConnectorConfig, HttpTimeouts, PlatformConfig, PlatformRegistry};
use social_connector::database_plugins::{CredentialStore, InMemoryCredentialStore};
use social_connector::models::{InternalUserId, LinkedAccount, Platform};
use social_connector::SocialConnector;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

pub const USER_A: &str = "user-a";
pub const USER_B: &str = "user-b";

/// A connector whose configured platforms all point at one mock server
pub struct TestConnector {
    pub connector: SocialConnector,
    pub store: Arc<dyn CredentialStore>,
    pub server: MockServer,
}

impl TestConnector {
    /// Linked account as currently stored
    pub async fn stored(&self, account: &LinkedAccount) -> LinkedAccount {
        self.store
            .get_linked_account(account.id)
            .await
            .unwrap()
            .expect("account should exist")
    }

    /// Number of requests the mock provider has seen
    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.unwrap().len()
    }
}

/// Runtime settings with short timeouts for tests
pub fn test_config() -> ConnectorConfig {
    ConnectorConfig {
        http: HttpTimeouts {
            request: Duration::from_secs(2),
            connect: Duration::from_secs(1),
        },
        ..ConnectorConfig::default()
    }
}

pub fn user(id: &str) -> InternalUserId {
    InternalUserId::new(id)
}

pub fn client_credentials(platform: Platform) -> (&'static str, &'static str) {
    match platform {
        Platform::Instagram => ("ig-client", "ig-secret-value"),
        Platform::Twitter => ("tw-client", "tw-secret-value"),
        Platform::Linkedin => ("li-client", "li-secret-value"),
    }
}

pub fn redirect_uri(platform: Platform) -> String {
    format!("https://dashboard.example.com/auth/{platform}/callback")
}

/// Settings for `platform` with every endpoint on `server`
pub fn platform_config(platform: Platform, server: &MockServer) -> PlatformConfig {
    let (client_id, client_secret) = client_credentials(platform);
    PlatformConfig::new(platform, client_id, client_secret, redirect_uri(platform))
        .with_base_url(&server.uri())
        .unwrap()
}

/// Connector over an in-memory store with `platforms` configured
pub async fn setup(platforms: &[Platform]) -> TestConnector {
    setup_with_store(platforms, Arc::new(InMemoryCredentialStore::new()), test_config()).await
}

pub async fn setup_with_store(
    platforms: &[Platform],
    store: Arc<dyn CredentialStore>,
    config: ConnectorConfig,
) -> TestConnector {
    let server = MockServer::start().await;
    let registry =
        PlatformRegistry::new(platforms.iter().map(|p| platform_config(*p, &server)));
    let connector = SocialConnector::new(registry, store.clone(), config).unwrap();
    TestConnector {
        connector,
        store,
        server,
    }
}

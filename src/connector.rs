// ABOUTME: Connector facade composing URL building, code exchange, profile lookup, and storage
// ABOUTME: The only surface the HTTP layer calls to connect, refresh, and disconnect social accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Social Connector
//!
//! [`SocialConnector`] is constructed once at startup from an explicit
//! [`PlatformRegistry`], a [`CredentialStore`], and a [`ConnectorConfig`], then
//! shared across requests. Each operation runs to completion within one request and
//! performs its provider calls sequentially.
//!
//! ```text
//! begin_auth ──> authorize URL (no network)
//! complete_auth ──> exchange code ──> fetch profile ──> atomic upsert
//! refresh_account ──> refresh call ──> token update
//! ```

use chrono::Utc;
use connector_core::errors::{ConnectorError, ConnectorResult};
use connector_core::models::{
    InternalUserId, LinkedAccount, LinkedAccountSummary, Platform, SecretString,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{ConnectorConfig, PlatformRegistry};
use crate::credentials::CredentialService;
use crate::database_plugins::CredentialStore;
use crate::oauth2_client::{self, OAuth2Client, ProfileResolver};
use crate::refresh::{RefreshScheduler, TokenRefresher};
use crate::utils::http_client::oauth_client;

/// Redirect target and anti-forgery state for a connect attempt
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationRequest {
    /// Platform being connected
    pub platform: Platform,
    /// URL to redirect the user to
    pub authorization_url: String,
    /// Value the HTTP layer must match against the callback's `state`
    pub state: String,
}

/// Multi-platform OAuth connector
#[derive(Clone)]
pub struct SocialConnector {
    registry: Arc<PlatformRegistry>,
    oauth: OAuth2Client,
    profiles: ProfileResolver,
    credentials: CredentialService,
    refresher: TokenRefresher,
    config: ConnectorConfig,
}

impl SocialConnector {
    /// Assemble a connector from explicit dependencies
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(
        registry: PlatformRegistry,
        store: Arc<dyn CredentialStore>,
        config: ConnectorConfig,
    ) -> ConnectorResult<Self> {
        let registry = Arc::new(registry);
        let http = oauth_client(config.http)?;
        let oauth = OAuth2Client::with_http_client(http.clone());
        let profiles = ProfileResolver::new(http);
        let credentials = CredentialService::new(store);
        let refresher = TokenRefresher::new(registry.clone(), oauth.clone(), credentials.clone());

        Ok(Self {
            registry,
            oauth,
            profiles,
            credentials,
            refresher,
            config,
        })
    }

    /// Configured platforms
    #[must_use]
    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Authorization URL for `platform`, without state
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` for unknown or unconfigured identifiers
    pub fn build_auth_url(&self, platform: &str) -> ConnectorResult<String> {
        oauth2_client::build_auth_url(self.registry.resolve(platform)?)
    }

    /// Start a connect flow for `platform`
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` for unknown or unconfigured identifiers
    pub fn begin_auth(&self, platform: &str) -> ConnectorResult<AuthorizationRequest> {
        let config = self.registry.resolve(platform)?;
        let state = Uuid::new_v4().simple().to_string();
        let authorization_url = oauth2_client::build_auth_url_with_state(config, &state)?;
        debug!(platform = %config.platform, "Built authorization URL");

        Ok(AuthorizationRequest {
            platform: config.platform,
            authorization_url,
            state,
        })
    }

    /// Finish a connect flow: exchange `code`, resolve the profile, and link it to `user`
    ///
    /// Nothing is stored unless both provider calls succeed.
    ///
    /// # Errors
    ///
    /// - `UnsupportedPlatform` for unknown or unconfigured identifiers
    /// - `MissingCode` if `code` is empty
    /// - `TokenExchange` / `ProfileFetch` on provider failure
    /// - `AccountOwnershipConflict` if the identity belongs to another user
    pub async fn complete_auth(
        &self,
        platform: &str,
        code: &str,
        user: &InternalUserId,
    ) -> ConnectorResult<LinkedAccount> {
        let config = self.registry.resolve(platform)?;
        let material = self.oauth.exchange_code(config, code).await?;
        let profile = self
            .profiles
            .fetch_profile(config, &material.access_token)
            .await?;

        let account = self
            .credentials
            .upsert_account(
                config.platform,
                &profile.external_account_id,
                user,
                &material,
                &profile.display_name,
            )
            .await?;
        info!(
            platform = %account.platform,
            account_id = %account.id,
            user.id = %user,
            "Social account connected"
        );
        Ok(account)
    }

    /// Refresh the tokens of a linked account
    ///
    /// # Errors
    ///
    /// See [`TokenRefresher::refresh`]
    pub async fn refresh_account(&self, account_id: Uuid) -> ConnectorResult<LinkedAccount> {
        self.refresher.refresh(account_id).await
    }

    /// Disconnect a linked account owned by `user`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `user` owns no record with that id
    pub async fn disconnect_account(
        &self,
        user: &InternalUserId,
        account_id: Uuid,
    ) -> ConnectorResult<()> {
        self.credentials.deactivate_account(user, account_id).await
    }

    /// Every linked account of `user`, without credential material
    ///
    /// # Errors
    ///
    /// Returns `Database` on store failure
    pub async fn list_accounts(
        &self,
        user: &InternalUserId,
    ) -> ConnectorResult<Vec<LinkedAccountSummary>> {
        let accounts = self.credentials.store().list_for_user(user).await?;
        Ok(accounts.iter().map(LinkedAccount::summary).collect())
    }

    /// Whether `user` has an active account on each configured platform
    ///
    /// # Errors
    ///
    /// Returns `Database` on store failure
    pub async fn connection_status(
        &self,
        user: &InternalUserId,
    ) -> ConnectorResult<BTreeMap<Platform, bool>> {
        let accounts = self.credentials.store().list_for_user(user).await?;
        Ok(self
            .registry
            .platforms()
            .map(|platform| {
                let connected = accounts
                    .iter()
                    .any(|account| account.platform == platform && account.is_active);
                (platform, connected)
            })
            .collect())
    }

    /// Current access token of an account owned by `user`
    ///
    /// Refreshes first when the token expires within the configured refresh window.
    /// An account with no refresh credential keeps using its token until it expires.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `user` owns no active record with that id
    /// - `MissingRefreshCredential` if the token has expired and cannot be refreshed
    /// - any other refresh error when a refresh was needed and failed
    pub async fn ensure_valid_token(
        &self,
        user: &InternalUserId,
        account_id: Uuid,
    ) -> ConnectorResult<SecretString> {
        let mut account = self.credentials.get_owned_account(user, account_id).await?;
        if !account.is_active {
            return Err(ConnectorError::account_not_found(account_id));
        }

        let window = chrono::Duration::from_std(self.config.refresh_window)
            .map_err(|e| ConnectorError::config(format!("refresh window out of range: {e}")))?;
        let now = Utc::now();
        if account.expires_within(window, now) {
            debug!(
                %account_id,
                platform = %account.platform,
                "Token near expiry, refreshing before use"
            );
            match self.refresher.refresh(account_id).await {
                Ok(refreshed) => account = refreshed,
                // Nothing to refresh with, but the current token still works
                Err(ConnectorError::MissingRefreshCredential { .. })
                    if !account.is_expired_at(now) =>
                {
                    debug!(
                        %account_id,
                        expires_at = %account.token_expires_at,
                        "No refresh credential, using current token until it expires"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        account
            .access_token
            .ok_or_else(|| ConnectorError::account_not_found(account_id))
    }

    /// Proactive refresh scheduler sharing this connector's components
    #[must_use]
    pub fn refresh_scheduler(&self) -> RefreshScheduler {
        RefreshScheduler::new(
            self.refresher.clone(),
            self.credentials.store().clone(),
            self.config.refresh_window,
            self.config.refresh_interval,
        )
    }
}

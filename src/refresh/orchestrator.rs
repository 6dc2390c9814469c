// ABOUTME: Token refresh orchestrator applying per-platform refresh semantics to a stored account
// ABOUTME: Leaves the stored record untouched unless the provider returns new token material
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::errors::{ConnectorError, ConnectorResult};
use connector_core::models::{LinkedAccount, SecretString};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PlatformRegistry;
use crate::credentials::CredentialService;
use crate::oauth2_client::OAuth2Client;
use crate::platforms::{self, RefreshInput};

/// Refreshes linked accounts on demand
#[derive(Clone)]
pub struct TokenRefresher {
    registry: Arc<PlatformRegistry>,
    oauth: OAuth2Client,
    credentials: CredentialService,
}

impl TokenRefresher {
    /// Create a refresher over shared connector components
    #[must_use]
    pub fn new(
        registry: Arc<PlatformRegistry>,
        oauth: OAuth2Client,
        credentials: CredentialService,
    ) -> Self {
        Self {
            registry,
            oauth,
            credentials,
        }
    }

    /// Refresh the tokens of `account_id` and persist the result
    ///
    /// Refresh only ever updates an existing record. On any failure the stored
    /// token and expiry are left as they were.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the account does not exist
    /// - `UnsupportedPlatform` if the account's platform is no longer configured
    ///   (no request is made)
    /// - `MissingRefreshCredential` if the account is inactive or holds no refresh input
    /// - `TokenRefresh` if the provider call fails
    pub async fn refresh(&self, account_id: Uuid) -> ConnectorResult<LinkedAccount> {
        let account = self.credentials.get_account(account_id).await?;
        let config = self.registry.get(account.platform)?;
        let credential = refresh_credential(&account)?;

        let material = match self.oauth.refresh_token(config, credential).await {
            Ok(material) => material,
            Err(e) => {
                warn!(
                    platform = %account.platform,
                    %account_id,
                    error = %e,
                    "Token refresh failed, keeping stored credentials"
                );
                return Err(e);
            }
        };

        let refreshed = self.credentials.apply_refresh(&account, &material).await?;
        info!(
            platform = %refreshed.platform,
            %account_id,
            expires_at = %refreshed.token_expires_at,
            "Linked account tokens refreshed"
        );
        Ok(refreshed)
    }
}

/// The stored credential the account's platform refreshes with
fn refresh_credential(account: &LinkedAccount) -> ConnectorResult<&SecretString> {
    let missing = || ConnectorError::MissingRefreshCredential {
        platform: account.platform,
        account_id: account.id,
    };
    if !account.is_active {
        return Err(missing());
    }

    let credential = match platforms::descriptor(account.platform).refresh_input {
        RefreshInput::RefreshToken => account.refresh_token.as_ref(),
        RefreshInput::AccessToken => account.access_token.as_ref(),
    };
    credential
        .filter(|secret| !secret.is_empty())
        .ok_or_else(missing)
}

// ABOUTME: Credential store adapter computing token expiry and mapping store outcomes to errors
// ABOUTME: The only component that writes linked accounts, always through atomic store operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use connector_core::errors::{ConnectorError, ConnectorResult};
use connector_core::models::{InternalUserId, LinkedAccount, Platform, TokenMaterial};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database_plugins::{CredentialStore, LinkedAccountUpsert, TokenUpdate, UpsertOutcome};
use crate::platforms;

/// Writes and reads linked accounts on behalf of the connector
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
}

impl CredentialService {
    /// Wrap a credential store
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Underlying store, for read access
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Create or re-consent the link between an external identity and `user`
    ///
    /// Expiry is computed as now plus the provider-reported lifetime. Re-consent by
    /// the owning user replaces the tokens and reactivates the record.
    ///
    /// # Errors
    ///
    /// - `AccountOwnershipConflict` if the identity is linked to another user
    /// - `Database` on store failure
    pub async fn upsert_account(
        &self,
        platform: Platform,
        external_account_id: &str,
        user: &InternalUserId,
        material: &TokenMaterial,
        display_name: &str,
    ) -> ConnectorResult<LinkedAccount> {
        let now = Utc::now();
        let refresh_token = if platforms::descriptor(platform).issues_refresh_token {
            material.refresh_token.clone()
        } else {
            None
        };

        let upsert = LinkedAccountUpsert {
            platform,
            external_account_id: external_account_id.to_owned(),
            internal_user_id: user.clone(),
            display_name: display_name.to_owned(),
            access_token: material.access_token.clone(),
            refresh_token,
            token_expires_at: material.expires_at(now),
            now,
        };

        match self.store.upsert_linked_account(&upsert).await? {
            UpsertOutcome::Stored(account) => {
                info!(
                    %platform,
                    account_id = %account.id,
                    user.id = %user,
                    expires_at = %account.token_expires_at,
                    "Linked account stored"
                );
                Ok(account)
            }
            UpsertOutcome::OwnershipConflict => {
                warn!(
                    %platform,
                    external_account_id,
                    user.id = %user,
                    "Rejected link of account owned by another user"
                );
                Err(ConnectorError::AccountOwnershipConflict {
                    platform,
                    external_account_id: external_account_id.to_owned(),
                })
            }
        }
    }

    /// Disconnect a linked account owned by `user`, wiping its tokens
    ///
    /// Deactivating an already-inactive record succeeds without changes.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record with that id is owned by `user`
    /// - `Database` on store failure
    pub async fn deactivate_account(
        &self,
        user: &InternalUserId,
        account_id: Uuid,
    ) -> ConnectorResult<()> {
        let account = self
            .store
            .deactivate(user, account_id, Utc::now())
            .await?
            .ok_or_else(|| ConnectorError::account_not_found(account_id))?;

        info!(
            platform = %account.platform,
            %account_id,
            user.id = %user,
            "Linked account deactivated"
        );
        Ok(())
    }

    /// Persist refreshed token material on an existing active record
    ///
    /// A refresh response without a refresh token keeps the stored one.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the record vanished or was deactivated mid-refresh
    /// - `Database` on store failure
    pub async fn apply_refresh(
        &self,
        account: &LinkedAccount,
        material: &TokenMaterial,
    ) -> ConnectorResult<LinkedAccount> {
        let now = Utc::now();
        let refresh_token = if platforms::descriptor(account.platform).issues_refresh_token {
            material.refresh_token.clone()
        } else {
            None
        };

        let update = TokenUpdate {
            access_token: material.access_token.clone(),
            refresh_token,
            token_expires_at: material.expires_at(now),
            updated_at: now,
        };

        self.store
            .update_tokens(account.id, &update)
            .await?
            .ok_or_else(|| ConnectorError::account_not_found(account.id))
    }

    /// Get a record by id, active or not
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such record exists
    /// - `Database` on store failure
    pub async fn get_account(&self, account_id: Uuid) -> ConnectorResult<LinkedAccount> {
        self.store
            .get_linked_account(account_id)
            .await?
            .ok_or_else(|| ConnectorError::account_not_found(account_id))
    }

    /// Get a record by id if it is owned by `user`
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such record is owned by `user`
    /// - `Database` on store failure
    pub async fn get_owned_account(
        &self,
        user: &InternalUserId,
        account_id: Uuid,
    ) -> ConnectorResult<LinkedAccount> {
        let account = self.get_account(account_id).await?;
        if &account.internal_user_id != user {
            return Err(ConnectorError::account_not_found(account_id));
        }
        Ok(account)
    }
}

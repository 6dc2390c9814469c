// ABOUTME: In-memory credential store for tests and single-process deployments
// ABOUTME: All mutations run under one write lock so upserts are atomic per external identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use connector_core::errors::DatabaseError;
use connector_core::models::{InternalUserId, LinkedAccount, Platform};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CredentialStore, LinkedAccountUpsert, TokenUpdate, UpsertOutcome};

#[derive(Default)]
struct State {
    accounts: HashMap<Uuid, LinkedAccount>,
    by_external_id: HashMap<(Platform, String), Uuid>,
}

/// Credential store kept entirely in process memory
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn upsert_linked_account(
        &self,
        upsert: &LinkedAccountUpsert,
    ) -> Result<UpsertOutcome, DatabaseError> {
        let mut state = self.state.write().await;
        let key = (upsert.platform, upsert.external_account_id.clone());

        if let Some(id) = state.by_external_id.get(&key).copied() {
            let Some(existing) = state.accounts.get_mut(&id) else {
                return Err(DatabaseError::invalid_data(
                    "by_external_id",
                    format!("index points at missing record {id}"),
                ));
            };
            if existing.internal_user_id != upsert.internal_user_id {
                return Ok(UpsertOutcome::OwnershipConflict);
            }
            existing.display_name.clone_from(&upsert.display_name);
            existing.access_token = Some(upsert.access_token.clone());
            existing.refresh_token.clone_from(&upsert.refresh_token);
            existing.token_expires_at = upsert.token_expires_at;
            existing.is_active = true;
            existing.updated_at = upsert.now;
            return Ok(UpsertOutcome::Stored(existing.clone()));
        }

        let account = LinkedAccount {
            id: Uuid::new_v4(),
            platform: upsert.platform,
            external_account_id: upsert.external_account_id.clone(),
            internal_user_id: upsert.internal_user_id.clone(),
            display_name: upsert.display_name.clone(),
            access_token: Some(upsert.access_token.clone()),
            refresh_token: upsert.refresh_token.clone(),
            token_expires_at: upsert.token_expires_at,
            is_active: true,
            created_at: upsert.now,
            updated_at: upsert.now,
        };
        state.by_external_id.insert(key, account.id);
        state.accounts.insert(account.id, account.clone());
        Ok(UpsertOutcome::Stored(account))
    }

    async fn update_tokens(
        &self,
        account_id: Uuid,
        update: &TokenUpdate,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(account) = state
            .accounts
            .get_mut(&account_id)
            .filter(|account| account.is_active)
        else {
            return Ok(None);
        };

        account.access_token = Some(update.access_token.clone());
        if let Some(refresh_token) = &update.refresh_token {
            account.refresh_token = Some(refresh_token.clone());
        }
        account.token_expires_at = update.token_expires_at;
        account.updated_at = update.updated_at;
        Ok(Some(account.clone()))
    }

    async fn deactivate(
        &self,
        user: &InternalUserId,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(account) = state
            .accounts
            .get_mut(&account_id)
            .filter(|account| &account.internal_user_id == user)
        else {
            return Ok(None);
        };

        if account.is_active {
            account.is_active = false;
            account.updated_at = now;
        }
        account.access_token = None;
        account.refresh_token = None;
        Ok(Some(account.clone()))
    }

    async fn get_linked_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        Ok(self.state.read().await.accounts.get(&account_id).cloned())
    }

    async fn find_by_external_id(
        &self,
        platform: Platform,
        external_account_id: &str,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state
            .by_external_id
            .get(&(platform, external_account_id.to_owned()))
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }

    async fn list_for_user(
        &self,
        user: &InternalUserId,
    ) -> Result<Vec<LinkedAccount>, DatabaseError> {
        let state = self.state.read().await;
        let mut accounts: Vec<_> = state
            .accounts
            .values()
            .filter(|account| &account.internal_user_id == user)
            .cloned()
            .collect();
        accounts.sort_by_key(|account| account.created_at);
        Ok(accounts)
    }

    async fn list_expiring_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<LinkedAccount>, DatabaseError> {
        let state = self.state.read().await;
        let mut accounts: Vec<_> = state
            .accounts
            .values()
            .filter(|account| account.is_active && account.token_expires_at <= cutoff)
            .cloned()
            .collect();
        accounts.sort_by_key(|account| account.token_expires_at);
        Ok(accounts)
    }
}

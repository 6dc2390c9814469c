// ABOUTME: Credential store abstraction for linked social accounts
// ABOUTME: Plugin architecture with in-memory and SQLite backends behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use connector_core::errors::DatabaseError;
use connector_core::models::{InternalUserId, LinkedAccount, Platform, SecretString};
use uuid::Uuid;

/// Backend selection from the connection string
pub mod factory;
/// In-process backend
pub mod memory;

/// SQLite backend
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use factory::{Database, DatabaseType};
pub use memory::InMemoryCredentialStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCredentialStore;

/// Fields written by a connect or re-consent
#[derive(Debug, Clone)]
pub struct LinkedAccountUpsert {
    /// Platform of the external identity
    pub platform: Platform,
    /// Provider-assigned account identifier
    pub external_account_id: String,
    /// User completing the connect flow
    pub internal_user_id: InternalUserId,
    /// Handle or username
    pub display_name: String,
    /// Newly issued access token
    pub access_token: SecretString,
    /// Newly issued refresh token, replaces any stored one
    pub refresh_token: Option<SecretString>,
    /// Computed absolute expiry
    pub token_expires_at: DateTime<Utc>,
    /// Timestamp recorded as `updated_at` (and `created_at` on insert)
    pub now: DateTime<Utc>,
}

/// Result of an atomic upsert
#[derive(Debug, Clone)]
pub enum UpsertOutcome {
    /// Record created or updated for the caller
    Stored(LinkedAccount),
    /// The external identity belongs to another user; nothing was written
    OwnershipConflict,
}

/// Fields written by a successful refresh
#[derive(Debug, Clone)]
pub struct TokenUpdate {
    /// Newly issued access token
    pub access_token: SecretString,
    /// Newly issued refresh token; `None` keeps the stored one
    pub refresh_token: Option<SecretString>,
    /// Computed absolute expiry
    pub token_expires_at: DateTime<Utc>,
    /// Timestamp recorded as `updated_at`
    pub updated_at: DateTime<Utc>,
}

/// Persistence interface over linked accounts
///
/// Every mutation is a single atomic operation in the backing store; callers never
/// read-then-write.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert or update the record keyed by `(platform, external_account_id)`
    ///
    /// Updates only when the existing record is owned by the same user, and
    /// reactivates it. Returns [`UpsertOutcome::OwnershipConflict`] otherwise.
    async fn upsert_linked_account(
        &self,
        upsert: &LinkedAccountUpsert,
    ) -> Result<UpsertOutcome, DatabaseError>;

    /// Replace token material on an active record
    ///
    /// Returns `None` if the record does not exist or is inactive.
    async fn update_tokens(
        &self,
        account_id: Uuid,
        update: &TokenUpdate,
    ) -> Result<Option<LinkedAccount>, DatabaseError>;

    /// Deactivate a record owned by `user` and wipe its tokens
    ///
    /// Already-inactive records are returned unchanged. Returns `None` if no record
    /// with that id is owned by `user`.
    async fn deactivate(
        &self,
        user: &InternalUserId,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkedAccount>, DatabaseError>;

    /// Get a record by id
    async fn get_linked_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<LinkedAccount>, DatabaseError>;

    /// Get the record for an external identity
    async fn find_by_external_id(
        &self,
        platform: Platform,
        external_account_id: &str,
    ) -> Result<Option<LinkedAccount>, DatabaseError>;

    /// All records owned by `user`, active or not, oldest first
    async fn list_for_user(
        &self,
        user: &InternalUserId,
    ) -> Result<Vec<LinkedAccount>, DatabaseError>;

    /// Active records whose token expires at or before `cutoff`
    async fn list_expiring_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<LinkedAccount>, DatabaseError>;
}

// ABOUTME: Credential store factory selecting a backend from the connection string
// ABOUTME: Provides one enum that delegates every store operation to the chosen backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Credential store factory
//!
//! `memory:` (or `memory://`) selects the in-process store, `sqlite:` selects SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use connector_core::errors::DatabaseError;
use connector_core::models::{InternalUserId, LinkedAccount, Platform};
use tracing::{debug, info};
use uuid::Uuid;

use super::memory::InMemoryCredentialStore;
#[cfg(feature = "sqlite")]
use super::sqlite::SqliteCredentialStore;
use super::{CredentialStore, LinkedAccountUpsert, TokenUpdate, UpsertOutcome};

/// Supported store types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Process memory, lost on exit
    Memory,
    /// SQLite file or in-memory database
    SQLite,
}

/// Credential store wrapper that delegates to the appropriate implementation
#[derive(Clone)]
pub enum Database {
    /// In-memory backend
    Memory(InMemoryCredentialStore),
    /// SQLite backend
    #[cfg(feature = "sqlite")]
    SQLite(SqliteCredentialStore),
}

impl Database {
    /// Get a descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "In-memory (non-persistent)",
            #[cfg(feature = "sqlite")]
            Self::SQLite(_) => "SQLite",
        }
    }

    /// Get the store type enum
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::Memory(_) => DatabaseType::Memory,
            #[cfg(feature = "sqlite")]
            Self::SQLite(_) => DatabaseType::SQLite,
        }
    }

    /// Open a store for `database_url` and run its migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not recognized, the `sqlite` feature is
    /// disabled for a SQLite URL, or the database cannot be opened or migrated
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        debug!("Detecting credential store type from URL: {}", database_url);
        let db_type = detect_database_type(database_url)?;
        info!("Detected credential store type: {:?}", db_type);

        match db_type {
            DatabaseType::Memory => Ok(Self::Memory(InMemoryCredentialStore::new())),
            #[cfg(feature = "sqlite")]
            DatabaseType::SQLite => {
                let db = SqliteCredentialStore::new(database_url).await?;
                db.migrate().await?;
                info!("SQLite credential store initialized successfully");
                Ok(Self::SQLite(db))
            }
            #[cfg(not(feature = "sqlite"))]
            DatabaseType::SQLite => Err(DatabaseError::ConnectionFailed(
                "SQLite support not enabled. Enable the 'sqlite' feature flag.".to_owned(),
            )),
        }
    }
}

/// Detect store type from a connection string
///
/// # Errors
///
/// Returns an error if the URL scheme is not recognized
pub fn detect_database_type(database_url: &str) -> Result<DatabaseType, DatabaseError> {
    if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::SQLite)
    } else if database_url == "memory" || database_url.starts_with("memory:") {
        Ok(DatabaseType::Memory)
    } else {
        Err(DatabaseError::ConnectionFailed(format!(
            "Unsupported database URL format: {database_url}. \
             Supported formats: sqlite:path/to/db.sqlite, sqlite::memory:, memory://"
        )))
    }
}

/// Whether a connection string names a store that is discarded when the process exits
#[must_use]
pub fn is_ephemeral(database_url: &str) -> bool {
    matches!(detect_database_type(database_url), Ok(DatabaseType::Memory))
        || database_url.contains(":memory:")
        || database_url.contains("mode=memory")
}

// Implement CredentialStore for the enum by delegating to the appropriate implementation
#[async_trait]
impl CredentialStore for Database {
    async fn upsert_linked_account(
        &self,
        upsert: &LinkedAccountUpsert,
    ) -> Result<UpsertOutcome, DatabaseError> {
        match self {
            Self::Memory(db) => db.upsert_linked_account(upsert).await,
            #[cfg(feature = "sqlite")]
            Self::SQLite(db) => db.upsert_linked_account(upsert).await,
        }
    }

    async fn update_tokens(
        &self,
        account_id: Uuid,
        update: &TokenUpdate,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        match self {
            Self::Memory(db) => db.update_tokens(account_id, update).await,
            #[cfg(feature = "sqlite")]
            Self::SQLite(db) => db.update_tokens(account_id, update).await,
        }
    }

    async fn deactivate(
        &self,
        user: &InternalUserId,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        match self {
            Self::Memory(db) => db.deactivate(user, account_id, now).await,
            #[cfg(feature = "sqlite")]
            Self::SQLite(db) => db.deactivate(user, account_id, now).await,
        }
    }

    async fn get_linked_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        match self {
            Self::Memory(db) => db.get_linked_account(account_id).await,
            #[cfg(feature = "sqlite")]
            Self::SQLite(db) => db.get_linked_account(account_id).await,
        }
    }

    async fn find_by_external_id(
        &self,
        platform: Platform,
        external_account_id: &str,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        match self {
            Self::Memory(db) => db.find_by_external_id(platform, external_account_id).await,
            #[cfg(feature = "sqlite")]
            Self::SQLite(db) => db.find_by_external_id(platform, external_account_id).await,
        }
    }

    async fn list_for_user(
        &self,
        user: &InternalUserId,
    ) -> Result<Vec<LinkedAccount>, DatabaseError> {
        match self {
            Self::Memory(db) => db.list_for_user(user).await,
            #[cfg(feature = "sqlite")]
            Self::SQLite(db) => db.list_for_user(user).await,
        }
    }

    async fn list_expiring_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<LinkedAccount>, DatabaseError> {
        match self {
            Self::Memory(db) => db.list_expiring_before(cutoff).await,
            #[cfg(feature = "sqlite")]
            Self::SQLite(db) => db.list_expiring_before(cutoff).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_database_type() {
        assert_eq!(detect_database_type("sqlite::memory:").unwrap(), DatabaseType::SQLite);
        assert_eq!(detect_database_type("sqlite:./accounts.db").unwrap(), DatabaseType::SQLite);
        assert_eq!(detect_database_type("memory://").unwrap(), DatabaseType::Memory);
        assert!(detect_database_type("postgresql://localhost/db").is_err());
    }

    #[test]
    fn test_is_ephemeral() {
        assert!(is_ephemeral("sqlite::memory:"));
        assert!(is_ephemeral("sqlite:file:accounts?mode=memory"));
        assert!(is_ephemeral("memory://"));
        assert!(!is_ephemeral("sqlite:./accounts.db"));
    }

    #[tokio::test]
    async fn test_new_memory_backend() {
        let db = Database::new("memory://").await.unwrap();
        assert_eq!(db.database_type(), DatabaseType::Memory);
    }
}

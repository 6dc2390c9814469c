// ABOUTME: SQLite credential store backed by sqlx
// ABOUTME: Conditional upsert keyed by (platform, external_account_id) in a single statement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use connector_core::errors::DatabaseError;
use connector_core::models::{InternalUserId, LinkedAccount, Platform, SecretString};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use super::{CredentialStore, LinkedAccountUpsert, TokenUpdate, UpsertOutcome};

const ACCOUNT_COLUMNS: &str = "id, platform, external_account_id, internal_user_id, display_name, \
     access_token, refresh_token, token_expires_at, is_active, created_at, updated_at";

/// SQLite-backed credential store
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Open (creating if missing) the database at `database_url`
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` if the URL is invalid or the database cannot be opened
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?
            .create_if_missing(true);

        // Each connection to `:memory:` is a separate database
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        debug!(database_url, "Opened SQLite credential store");
        Ok(Self { pool })
    }

    /// Create the `linked_accounts` table and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS linked_accounts (
                id TEXT PRIMARY KEY,
                platform TEXT NOT NULL,
                external_account_id TEXT NOT NULL,
                internal_user_id TEXT NOT NULL,
                display_name TEXT NOT NULL,
                access_token TEXT,
                refresh_token TEXT,
                token_expires_at INTEGER NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(platform, external_account_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create linked_accounts table"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_linked_accounts_user ON linked_accounts(internal_user_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create user index"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_linked_accounts_expiry ON linked_accounts(is_active, token_expires_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create expiry index"))?;

        Ok(())
    }

    fn row_to_linked_account(row: &SqliteRow) -> Result<LinkedAccount, DatabaseError> {
        let id: String = row.try_get("id").map_err(decode_failed)?;
        let platform: String = row.try_get("platform").map_err(decode_failed)?;
        let internal_user_id: String = row.try_get("internal_user_id").map_err(decode_failed)?;
        let access_token: Option<String> = row.try_get("access_token").map_err(decode_failed)?;
        let refresh_token: Option<String> = row.try_get("refresh_token").map_err(decode_failed)?;
        let expires_millis: i64 = row.try_get("token_expires_at").map_err(decode_failed)?;

        Ok(LinkedAccount {
            id: Uuid::parse_str(&id).map_err(|e| DatabaseError::invalid_data("id", e.to_string()))?,
            platform: Platform::from_str(&platform)
                .map_err(|e| DatabaseError::invalid_data("platform", e.to_string()))?,
            external_account_id: row.try_get("external_account_id").map_err(decode_failed)?,
            internal_user_id: InternalUserId::new(internal_user_id),
            display_name: row.try_get("display_name").map_err(decode_failed)?,
            access_token: access_token.map(SecretString::from),
            refresh_token: refresh_token.map(SecretString::from),
            token_expires_at: DateTime::from_timestamp_millis(expires_millis).ok_or_else(|| {
                DatabaseError::invalid_data("token_expires_at", expires_millis.to_string())
            })?,
            is_active: row.try_get("is_active").map_err(decode_failed)?,
            created_at: row.try_get("created_at").map_err(decode_failed)?,
            updated_at: row.try_get("updated_at").map_err(decode_failed)?,
        })
    }

    fn rows_to_linked_accounts(rows: &[SqliteRow]) -> Result<Vec<LinkedAccount>, DatabaseError> {
        rows.iter().map(Self::row_to_linked_account).collect()
    }
}

fn decode_failed(source: sqlx::Error) -> DatabaseError {
    DatabaseError::QueryFailed {
        operation: "decode linked account",
        source,
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn upsert_linked_account(
        &self,
        upsert: &LinkedAccountUpsert,
    ) -> Result<UpsertOutcome, DatabaseError> {
        // The WHERE clause turns a cross-user conflict into a no-op with no RETURNING row
        let sql = format!(
            r"
            INSERT INTO linked_accounts (
                id, platform, external_account_id, internal_user_id, display_name,
                access_token, refresh_token, token_expires_at, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1, $9, $10)
            ON CONFLICT(platform, external_account_id) DO UPDATE SET
                display_name = excluded.display_name,
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                token_expires_at = excluded.token_expires_at,
                is_active = 1,
                updated_at = excluded.updated_at
            WHERE linked_accounts.internal_user_id = excluded.internal_user_id
            RETURNING {ACCOUNT_COLUMNS}
            "
        );

        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4().to_string())
            .bind(upsert.platform.as_str())
            .bind(&upsert.external_account_id)
            .bind(upsert.internal_user_id.as_str())
            .bind(&upsert.display_name)
            .bind(upsert.access_token.expose())
            .bind(upsert.refresh_token.as_ref().map(SecretString::expose))
            .bind(upsert.token_expires_at.timestamp_millis())
            .bind(upsert.now)
            .bind(upsert.now)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("upsert linked account"))?;

        row.map_or(Ok(UpsertOutcome::OwnershipConflict), |row| {
            Ok(UpsertOutcome::Stored(Self::row_to_linked_account(&row)?))
        })
    }

    async fn update_tokens(
        &self,
        account_id: Uuid,
        update: &TokenUpdate,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        let sql = format!(
            r"
            UPDATE linked_accounts SET
                access_token = $1,
                refresh_token = COALESCE($2, refresh_token),
                token_expires_at = $3,
                updated_at = $4
            WHERE id = $5 AND is_active = 1
            RETURNING {ACCOUNT_COLUMNS}
            "
        );

        let row = sqlx::query(&sql)
            .bind(update.access_token.expose())
            .bind(update.refresh_token.as_ref().map(SecretString::expose))
            .bind(update.token_expires_at.timestamp_millis())
            .bind(update.updated_at)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("update linked account tokens"))?;

        row.as_ref().map(Self::row_to_linked_account).transpose()
    }

    async fn deactivate(
        &self,
        user: &InternalUserId,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        let sql = format!(
            r"
            UPDATE linked_accounts SET
                access_token = NULL,
                refresh_token = NULL,
                updated_at = CASE WHEN is_active = 1 THEN $1 ELSE updated_at END,
                is_active = 0
            WHERE id = $2 AND internal_user_id = $3
            RETURNING {ACCOUNT_COLUMNS}
            "
        );

        let row = sqlx::query(&sql)
            .bind(now)
            .bind(account_id.to_string())
            .bind(user.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("deactivate linked account"))?;

        row.as_ref().map(Self::row_to_linked_account).transpose()
    }

    async fn get_linked_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM linked_accounts WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("get linked account"))?;

        row.as_ref().map(Self::row_to_linked_account).transpose()
    }

    async fn find_by_external_id(
        &self,
        platform: Platform,
        external_account_id: &str,
    ) -> Result<Option<LinkedAccount>, DatabaseError> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM linked_accounts WHERE platform = $1 AND external_account_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(platform.as_str())
            .bind(external_account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("find linked account by external id"))?;

        row.as_ref().map(Self::row_to_linked_account).transpose()
    }

    async fn list_for_user(
        &self,
        user: &InternalUserId,
    ) -> Result<Vec<LinkedAccount>, DatabaseError> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM linked_accounts WHERE internal_user_id = $1 ORDER BY created_at"
        );
        let rows = sqlx::query(&sql)
            .bind(user.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::query("list linked accounts for user"))?;

        Self::rows_to_linked_accounts(&rows)
    }

    async fn list_expiring_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<LinkedAccount>, DatabaseError> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM linked_accounts \
             WHERE is_active = 1 AND token_expires_at <= $1 ORDER BY token_expires_at"
        );
        let rows = sqlx::query(&sql)
            .bind(cutoff.timestamp_millis())
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::query("list expiring linked accounts"))?;

        Self::rows_to_linked_accounts(&rows)
    }
}

// ABOUTME: Structured error types for credential store operations
// ABOUTME: Wraps sqlx failures with the operation that triggered them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Errors raised by a credential store implementation
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A query against the backing database failed
    #[cfg(feature = "database-errors")]
    #[error("Database query failed while trying to {operation}")]
    QueryFailed {
        /// Operation being performed
        operation: &'static str,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// A stored row could not be mapped back to a model
    #[error("Invalid stored value for {field}: {reason}")]
    InvalidData {
        /// Column or field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Could not open the store
    #[error("Failed to connect to credential store: {0}")]
    ConnectionFailed(String),
}

impl DatabaseError {
    /// Build a `map_err` adapter tagging a sqlx error with the failing operation
    #[cfg(feature = "database-errors")]
    pub fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::QueryFailed { operation, source }
    }

    /// Invalid stored data
    pub fn invalid_data(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field,
            reason: reason.into(),
        }
    }
}

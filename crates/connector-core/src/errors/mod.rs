// ABOUTME: Unified error taxonomy for the social account connector
// ABOUTME: Maps every failure kind to an error code, HTTP status, and user-facing message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Connector Error Handling
//!
//! Every operation of the connector returns [`ConnectorResult`]. No error kind is
//! recovered locally; each one propagates to the caller, which decides whether to
//! offer a retry.

/// Credential store errors
pub mod database;

pub use database::DatabaseError;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Platform;

/// Stable error codes exposed to the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Platform identifier outside the configured set
    UnsupportedPlatform,
    /// A required request input was absent
    MissingRequiredField,
    /// The provider rejected the credentials or the exchange
    ExternalAuthFailed,
    /// The provider could not be reached or answered with an error
    ExternalServiceError,
    /// The external identity belongs to another user
    ResourceConflict,
    /// No matching linked account
    ResourceNotFound,
    /// Invalid or incomplete configuration
    ConfigError,
    /// Credential store failure
    DatabaseError,
}

impl ErrorCode {
    /// HTTP status the routing layer should answer with
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::UnsupportedPlatform | Self::MissingRequiredField => 400,
            Self::ResourceNotFound => 404,
            Self::ResourceConflict => 409,
            Self::ExternalAuthFailed | Self::ExternalServiceError => 502,
            Self::ConfigError | Self::DatabaseError => 500,
        }
    }
}

/// Stage of an outbound provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStage {
    /// Authorization code exchange
    Exchange,
    /// Profile lookup
    Profile,
    /// Token refresh
    Refresh,
}

/// Errors produced by the connector
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// Platform identifier is not one of the configured platforms
    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform {
        /// Identifier as supplied by the caller
        platform: String,
    },

    /// Callback arrived without an authorization code
    #[error("Missing authorization code for {platform}")]
    MissingCode {
        /// Platform the callback was for
        platform: Platform,
    },

    /// Stored account has nothing to refresh with
    #[error("Account {account_id} on {platform} has no refresh credential")]
    MissingRefreshCredential {
        /// Platform of the account
        platform: Platform,
        /// Linked account identifier
        account_id: Uuid,
    },

    /// Code exchange failed (network, timeout, non-2xx, or malformed body)
    #[error("Token exchange with {platform} failed{}: {reason}", status_suffix(*.status))]
    TokenExchange {
        /// Platform called
        platform: Platform,
        /// Upstream HTTP status, if a response was received
        status: Option<u16>,
        /// Short failure description
        reason: String,
    },

    /// Profile lookup failed
    #[error("Profile lookup on {platform} failed{}: {reason}", status_suffix(*.status))]
    ProfileFetch {
        /// Platform called
        platform: Platform,
        /// Upstream HTTP status, if a response was received
        status: Option<u16>,
        /// Short failure description
        reason: String,
    },

    /// Token refresh failed
    #[error("Token refresh with {platform} failed{}: {reason}", status_suffix(*.status))]
    TokenRefresh {
        /// Platform called
        platform: Platform,
        /// Upstream HTTP status, if a response was received
        status: Option<u16>,
        /// Short failure description
        reason: String,
    },

    /// External identity already linked to a different internal user
    #[error("{platform} account {external_account_id} is already linked to another user")]
    AccountOwnershipConflict {
        /// Platform of the external identity
        platform: Platform,
        /// Provider-assigned account identifier
        external_account_id: String,
    },

    /// Referenced record does not exist or is not owned by the caller
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of record
        resource: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Configuration missing or invalid
    #[error("Configuration error: {reason}")]
    Configuration {
        /// What is wrong
        reason: String,
    },

    /// Credential store failure
    #[error("Credential store error")]
    Database {
        /// Underlying store error
        #[from]
        source: DatabaseError,
    },
}

fn status_suffix(status: Option<u16>) -> String {
    status.map_or_else(String::new, |code| format!(" (HTTP {code})"))
}

/// Result alias used across the connector
pub type ConnectorResult<T> = Result<T, ConnectorError>;

impl ConnectorError {
    /// Unsupported platform identifier
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Linked account not found (or not owned by the caller)
    pub fn account_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "Linked account",
            id: id.to_string(),
        }
    }

    /// Upstream failure for the given stage of the flow
    pub fn upstream(
        stage: UpstreamStage,
        platform: Platform,
        status: Option<u16>,
        reason: impl Into<String>,
    ) -> Self {
        let reason = reason.into();
        match stage {
            UpstreamStage::Exchange => Self::TokenExchange {
                platform,
                status,
                reason,
            },
            UpstreamStage::Profile => Self::ProfileFetch {
                platform,
                status,
                reason,
            },
            UpstreamStage::Refresh => Self::TokenRefresh {
                platform,
                status,
                reason,
            },
        }
    }

    /// Classify a transport error (connect failure, timeout, body read) for a stage
    #[cfg(feature = "provider-errors")]
    #[must_use]
    pub fn from_transport(
        stage: UpstreamStage,
        platform: Platform,
        error: &reqwest::Error,
    ) -> Self {
        let reason = if error.is_timeout() {
            "request timed out".to_owned()
        } else if error.is_connect() {
            "connection failed".to_owned()
        } else if error.is_decode() {
            "malformed response body".to_owned()
        } else {
            "request failed".to_owned()
        };
        Self::upstream(stage, platform, error.status().map(|s| s.as_u16()), reason)
    }

    /// Error code for the HTTP layer
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedPlatform { .. } => ErrorCode::UnsupportedPlatform,
            Self::MissingCode { .. } | Self::MissingRefreshCredential { .. } => {
                ErrorCode::MissingRequiredField
            }
            Self::TokenExchange { .. } | Self::TokenRefresh { .. } => ErrorCode::ExternalAuthFailed,
            Self::ProfileFetch { .. } => ErrorCode::ExternalServiceError,
            Self::AccountOwnershipConflict { .. } => ErrorCode::ResourceConflict,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::Configuration { .. } => ErrorCode::ConfigError,
            Self::Database { .. } => ErrorCode::DatabaseError,
        }
    }

    /// Whether the failure came from a provider call
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::TokenExchange { .. } | Self::ProfileFetch { .. } | Self::TokenRefresh { .. }
        )
    }

    /// Message safe to show to the end user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedPlatform { platform } => {
                format!("{platform} is not a supported platform")
            }
            Self::MissingCode { platform } => {
                format!("The {} authorization did not return a code", platform.display_name())
            }
            Self::MissingRefreshCredential { platform, .. } => format!(
                "Your {} connection cannot be refreshed, please reconnect",
                platform.display_name()
            ),
            Self::TokenExchange { platform, .. } | Self::ProfileFetch { platform, .. } => {
                format!("Failed to authenticate with {}", platform.display_name())
            }
            Self::TokenRefresh { platform, .. } => {
                format!("Failed to refresh {} connection", platform.display_name())
            }
            Self::AccountOwnershipConflict { platform, .. } => format!(
                "This {} account is already connected to another user",
                platform.display_name()
            ),
            Self::NotFound { .. } => "Connected account not found".to_owned(),
            Self::Configuration { .. } | Self::Database { .. } => {
                "Internal error, please try again later".to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::UnsupportedPlatform.http_status(), 400);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ResourceConflict.http_status(), 409);
        assert_eq!(ErrorCode::ExternalAuthFailed.http_status(), 502);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_upstream_stage_selects_variant() {
        let err = ConnectorError::upstream(
            UpstreamStage::Refresh,
            Platform::Twitter,
            Some(400),
            "invalid_grant",
        );
        assert!(matches!(
            err,
            ConnectorError::TokenRefresh {
                platform: Platform::Twitter,
                status: Some(400),
                ..
            }
        ));
        assert!(err.is_upstream());
        assert_eq!(err.to_string(), "Token refresh with twitter failed (HTTP 400): invalid_grant");
    }

    #[test]
    fn test_user_message_names_platform() {
        let err = ConnectorError::upstream(
            UpstreamStage::Exchange,
            Platform::Instagram,
            None,
            "request timed out",
        );
        assert_eq!(err.user_message(), "Failed to authenticate with Instagram");
        assert_eq!(err.code(), ErrorCode::ExternalAuthFailed);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ResourceConflict).unwrap();
        assert_eq!(json, "\"RESOURCE_CONFLICT\"");
    }
}

// ABOUTME: Linked account model binding one external social identity to one internal user
// ABOUTME: Includes the opaque internal user id and a secret-free summary for API responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Platform, SecretString};

/// Opaque identifier of a dashboard user, supplied by the session layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternalUserId(String);

impl InternalUserId {
    /// Wrap an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternalUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InternalUserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for InternalUserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One external social identity bound to one internal user
///
/// At most one record exists per `(platform, external_account_id)`. Records are
/// deactivated rather than deleted, and an inactive record holds no tokens.
#[derive(Debug, Clone)]
pub struct LinkedAccount {
    /// Record identifier
    pub id: Uuid,
    /// Platform of the external identity
    pub platform: Platform,
    /// Provider-assigned account identifier
    pub external_account_id: String,
    /// Owning dashboard user, fixed at creation
    pub internal_user_id: InternalUserId,
    /// Handle or username
    pub display_name: String,
    /// Current access token, `None` once deactivated
    pub access_token: Option<SecretString>,
    /// Current refresh token, `None` if never issued or deactivated
    pub refresh_token: Option<SecretString>,
    /// Exchange time plus provider-reported lifetime
    pub token_expires_at: DateTime<Utc>,
    /// `false` means disconnected
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl LinkedAccount {
    /// Whether the access token has expired at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.token_expires_at <= now
    }

    /// Whether the access token expires within `window` of `now`
    ///
    /// A window reaching past the representable range covers every expiry.
    #[must_use]
    pub fn expires_within(&self, window: Duration, now: DateTime<Utc>) -> bool {
        now.checked_add_signed(window)
            .is_none_or(|horizon| self.token_expires_at <= horizon)
    }

    /// Secret-free view of this record
    #[must_use]
    pub fn summary(&self) -> LinkedAccountSummary {
        LinkedAccountSummary::from(self)
    }
}

/// Linked account without credential material, safe to serialize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccountSummary {
    /// Record identifier
    pub id: Uuid,
    /// Platform of the external identity
    pub platform: Platform,
    /// Provider-assigned account identifier
    pub external_account_id: String,
    /// Handle or username
    pub display_name: String,
    /// Access token expiry
    pub token_expires_at: DateTime<Utc>,
    /// Whether the account is connected
    pub is_active: bool,
    /// Whether a refresh token is on file
    pub has_refresh_token: bool,
}

impl From<&LinkedAccount> for LinkedAccountSummary {
    fn from(account: &LinkedAccount) -> Self {
        Self {
            id: account.id,
            platform: account.platform,
            external_account_id: account.external_account_id.clone(),
            display_name: account.display_name.clone(),
            token_expires_at: account.token_expires_at,
            is_active: account.is_active,
            has_refresh_token: account.refresh_token.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(expires_at: DateTime<Utc>) -> LinkedAccount {
        let now = Utc::now();
        LinkedAccount {
            id: Uuid::new_v4(),
            platform: Platform::Linkedin,
            external_account_id: "li_7".to_owned(),
            internal_user_id: InternalUserId::new("user-1"),
            display_name: "Brand Page".to_owned(),
            access_token: Some(SecretString::new("li-access-value")),
            refresh_token: None,
            token_expires_at: expires_at,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        let acct = account(now + Duration::minutes(3));
        assert!(!acct.is_expired_at(now));
        assert!(acct.expires_within(Duration::minutes(5), now));
        assert!(!acct.expires_within(Duration::minutes(1), now));
    }

    #[test]
    fn test_oversized_window_does_not_overflow() {
        let now = Utc::now();
        let acct = account(now + Duration::days(30));
        assert!(acct.expires_within(Duration::MAX, now));
    }

    #[test]
    fn test_summary_omits_tokens() {
        let acct = account(Utc::now());
        let json = serde_json::to_string(&acct.summary()).unwrap();
        assert!(!json.contains("li-access-value"));
        assert!(json.contains("\"platform\":\"linkedin\""));
        assert!(json.contains("\"has_refresh_token\":false"));
    }
}

// ABOUTME: Token material and profile data returned by provider endpoints
// ABOUTME: Expiry is always derived from the provider-reported lifetime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};

use super::SecretString;

/// Credentials returned by a token exchange or refresh
#[derive(Debug, Clone)]
pub struct TokenMaterial {
    /// Access token
    pub access_token: SecretString,
    /// Refresh token, absent for platforms that do not issue one
    pub refresh_token: Option<SecretString>,
    /// Provider-reported lifetime of the access token
    pub expires_in_seconds: i64,
}

impl TokenMaterial {
    /// Absolute expiry for material obtained at `issued_at`
    #[must_use]
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::seconds(self.expires_in_seconds)
    }
}

/// Remote account identity resolved from an access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Stable identifier assigned by the provider
    pub external_account_id: String,
    /// Handle or name shown in the dashboard
    pub display_name: String,
}

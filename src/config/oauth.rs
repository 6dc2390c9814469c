// ABOUTME: Per-platform OAuth client configuration for the social account connector
// ABOUTME: Loads client credentials, redirect URI, scope, and endpoint URLs from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::constants::env_vars;
use connector_core::errors::{ConnectorError, ConnectorResult};
use connector_core::models::{Platform, SecretString};
use sha2::{Digest, Sha256};
use std::env;
use tracing::{info, warn};

use crate::platforms;

/// OAuth settings for one platform, immutable after startup
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Platform these settings belong to
    pub platform: Platform,
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: SecretString,
    /// Callback URL registered with the provider
    pub redirect_uri: String,
    /// Scope string sent to the authorize endpoint
    pub scope: String,
    /// Authorization endpoint
    pub authorize_url: String,
    /// Code exchange endpoint
    pub token_url: String,
    /// Token refresh endpoint
    pub refresh_url: String,
    /// Profile lookup endpoint
    pub profile_url: String,
}

impl PlatformConfig {
    /// Settings using the platform's default scope and production endpoints
    pub fn new(
        platform: Platform,
        client_id: impl Into<String>,
        client_secret: impl Into<SecretString>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        let descriptor = platforms::descriptor(platform);
        let endpoints = &descriptor.default_endpoints;
        Self {
            platform,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: descriptor.default_scope.to_owned(),
            authorize_url: endpoints.authorize.to_owned(),
            token_url: endpoints.token.to_owned(),
            refresh_url: endpoints.refresh.to_owned(),
            profile_url: endpoints.profile.to_owned(),
        }
    }

    /// Point every endpoint at `base_url`, keeping each default path and query
    ///
    /// Used to run the connector against a local mock of the provider.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `base_url` or a default endpoint is not a valid URL
    pub fn with_base_url(mut self, base_url: &str) -> ConnectorResult<Self> {
        let rebase = |endpoint: &str| -> ConnectorResult<String> {
            let original = url::Url::parse(endpoint)
                .map_err(|e| ConnectorError::config(format!("invalid endpoint {endpoint}: {e}")))?;
            let mut rebased = url::Url::parse(base_url)
                .map_err(|e| ConnectorError::config(format!("invalid base URL {base_url}: {e}")))?;
            rebased.set_path(original.path());
            rebased.set_query(original.query());
            Ok(rebased.to_string())
        };
        self.authorize_url = rebase(&self.authorize_url)?;
        self.token_url = rebase(&self.token_url)?;
        self.refresh_url = rebase(&self.refresh_url)?;
        self.profile_url = rebase(&self.profile_url)?;
        Ok(self)
    }

    /// Load settings for `platform` from process environment
    ///
    /// Returns `Ok(None)` when none of the platform's variables are set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing variable when the
    /// platform is only partially configured
    pub fn from_env(platform: Platform) -> ConnectorResult<Option<Self>> {
        Self::from_lookup(platform, |key| env::var(key).ok())
    }

    /// Load settings for `platform` through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing variable when the
    /// platform is only partially configured
    pub fn from_lookup<F>(platform: Platform, lookup: F) -> ConnectorResult<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = platform.env_prefix();
        let read = |suffix: &str| {
            let key = format!("{prefix}{suffix}");
            let value = lookup(&key).filter(|v| !v.trim().is_empty());
            (key, value)
        };

        let (id_key, client_id) = read(env_vars::CLIENT_ID_SUFFIX);
        let (secret_key, client_secret) = read(env_vars::CLIENT_SECRET_SUFFIX);
        let (redirect_key, redirect_uri) = read(env_vars::REDIRECT_URI_SUFFIX);
        let (_, scope) = read(env_vars::SCOPE_SUFFIX);

        match (client_id, client_secret, redirect_uri) {
            (None, None, None) => Ok(None),
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => {
                let mut config = Self::new(platform, client_id, client_secret, redirect_uri);
                if let Some(scope) = scope {
                    config.scope = scope;
                }
                Ok(Some(config))
            }
            (client_id, client_secret, _) => {
                let missing = if client_id.is_none() {
                    id_key
                } else if client_secret.is_none() {
                    secret_key
                } else {
                    redirect_key
                };
                Err(ConnectorError::config(format!(
                    "{platform} is partially configured: {missing} is not set"
                )))
            }
        }
    }

    /// SHA-256 fingerprint of the client secret (first 8 hex chars)
    ///
    /// Lets operators compare secrets across deployments without logging them.
    #[must_use]
    pub fn secret_fingerprint(&self) -> String {
        let digest = Sha256::digest(self.client_secret.expose().as_bytes());
        format!("{digest:x}").chars().take(8).collect()
    }

    /// Log a diagnostic line for this platform and check its settings
    ///
    /// A short client secret only logs a warning.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the redirect URI is not an absolute URL
    pub fn validate_and_log(&self) -> ConnectorResult<()> {
        info!(
            platform = %self.platform,
            client_id = %self.client_id,
            secret_fingerprint = %self.secret_fingerprint(),
            redirect_uri = %self.redirect_uri,
            "OAuth platform configured"
        );

        if let Err(e) = url::Url::parse(&self.redirect_uri) {
            return Err(ConnectorError::config(format!(
                "{} redirect URI {:?} is not an absolute URL: {e}",
                self.platform, self.redirect_uri
            )));
        }
        if self.client_secret.expose().len() < 8 {
            warn!(
                platform = %self.platform,
                "client secret is unusually short ({} chars), check configuration",
                self.client_secret.expose().len()
            );
        }
        Ok(())
    }
}

// ABOUTME: Token exchange and refresh client for the supported social platforms
// ABOUTME: Table-driven request shapes, strict token response validation, timeout-bounded calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::constants::time::MAX_TOKEN_LIFETIME_SECS;
use connector_core::errors::{ConnectorError, ConnectorResult, UpstreamStage};
use connector_core::models::{Platform, SecretString, TokenMaterial};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{HttpTimeouts, PlatformConfig};
use crate::platforms::{self, ClientAuth, FormParams};
use crate::utils::http_client::oauth_client;

/// OAuth 2.0 token endpoint client
///
/// Makes exactly one POST per call and never retries; a failed call is reported to
/// the caller with the platform and, when a response arrived, its HTTP status.
#[derive(Debug, Clone)]
pub struct OAuth2Client {
    client: reqwest::Client,
}

impl OAuth2Client {
    /// Create a client with its own timeout-bounded connection pool
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(timeouts: HttpTimeouts) -> ConnectorResult<Self> {
        Ok(Self::with_http_client(oauth_client(timeouts)?))
    }

    /// Create a client sharing an existing connection pool
    #[must_use]
    pub const fn with_http_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Exchange a one-time authorization code for token material
    ///
    /// # Errors
    ///
    /// - `MissingCode` if `code` is empty (no request is made)
    /// - `TokenExchange` on network failure, timeout, non-2xx status, or a
    ///   response without `access_token` / `expires_in`
    pub async fn exchange_code(
        &self,
        config: &PlatformConfig,
        code: &str,
    ) -> ConnectorResult<TokenMaterial> {
        if code.trim().is_empty() {
            return Err(ConnectorError::MissingCode {
                platform: config.platform,
            });
        }

        let descriptor = platforms::descriptor(config.platform);
        let params = (descriptor.exchange_params)(config, code);
        self.post_token(UpstreamStage::Exchange, config, &config.token_url, &params)
            .await
    }

    /// Obtain fresh token material using the platform's refresh input
    ///
    /// `credential` is the stored refresh token, or the current access token for
    /// platforms that refresh with it.
    ///
    /// # Errors
    ///
    /// Returns `TokenRefresh` on network failure, timeout, non-2xx status, or an
    /// incomplete response
    pub async fn refresh_token(
        &self,
        config: &PlatformConfig,
        credential: &SecretString,
    ) -> ConnectorResult<TokenMaterial> {
        let descriptor = platforms::descriptor(config.platform);
        let params = (descriptor.refresh_params)(config, credential.expose());
        self.post_token(UpstreamStage::Refresh, config, &config.refresh_url, &params)
            .await
    }

    async fn post_token(
        &self,
        stage: UpstreamStage,
        config: &PlatformConfig,
        url: &str,
        params: &FormParams,
    ) -> ConnectorResult<TokenMaterial> {
        let platform = config.platform;
        debug!(%platform, ?stage, url, "Calling provider token endpoint");

        let mut request = self.client.post(url).form(params);
        if platforms::descriptor(platform).client_auth == ClientAuth::BasicHeader {
            request = request.basic_auth(&config.client_id, Some(config.client_secret.expose()));
        }

        let response = request.send().await.map_err(|e| {
            warn!(%platform, ?stage, error = %e, "Token endpoint unreachable");
            ConnectorError::from_transport(stage, platform, &e)
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ConnectorError::from_transport(stage, platform, &e))?;

        if !status.is_success() {
            let reason = upstream_reason(&body);
            warn!(
                %platform,
                ?stage,
                status = status.as_u16(),
                %reason,
                "Token endpoint rejected request"
            );
            return Err(ConnectorError::upstream(
                stage,
                platform,
                Some(status.as_u16()),
                reason,
            ));
        }

        let token: TokenResponse = serde_json::from_slice(&body).map_err(|_| {
            ConnectorError::upstream(
                stage,
                platform,
                Some(status.as_u16()),
                "malformed token response",
            )
        })?;

        token.into_material(stage, platform, status.as_u16())
    }
}

/// OAuth 2.0 token response from provider
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl TokenResponse {
    fn into_material(
        self,
        stage: UpstreamStage,
        platform: Platform,
        status: u16,
    ) -> ConnectorResult<TokenMaterial> {
        let invalid =
            |reason: &str| ConnectorError::upstream(stage, platform, Some(status), reason);

        if self.access_token.is_empty() {
            return Err(invalid("empty access_token"));
        }
        let expires_in_seconds = match self.expires_in {
            None => return Err(invalid("missing expires_in")),
            Some(secs) if secs <= 0 || secs > MAX_TOKEN_LIFETIME_SECS => {
                return Err(invalid("expires_in out of range"));
            }
            Some(secs) => secs,
        };

        Ok(TokenMaterial {
            access_token: SecretString::from(self.access_token),
            refresh_token: self
                .refresh_token
                .filter(|token| !token.is_empty())
                .map(SecretString::from),
            expires_in_seconds,
        })
    }
}

/// Error body shapes used by the supported providers
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<serde_json::Value>,
    error_description: Option<String>,
    message: Option<String>,
}

/// Short failure description from an error body, never echoing the raw payload
pub(crate) fn upstream_reason(body: &[u8]) -> String {
    let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
        return "unexpected response".to_owned();
    };
    let code = match parsed.error {
        Some(serde_json::Value::String(code)) => Some(code),
        // Graph API nests `{ "error": { "message": ... } }`
        Some(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        _ => None,
    };
    code.or(parsed.error_description)
        .or(parsed.message)
        .unwrap_or_else(|| "unexpected response".to_owned())
}

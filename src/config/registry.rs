// ABOUTME: Read-only registry of configured platforms shared across concurrent requests
// ABOUTME: Resolves caller-supplied platform identifiers to their OAuth settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use connector_core::errors::{ConnectorError, ConnectorResult};
use connector_core::models::Platform;
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::oauth::PlatformConfig;

/// Platform settings loaded once at startup
///
/// Only platforms present in the registry can be used; every other identifier,
/// including a known platform that was left unconfigured, resolves to
/// [`ConnectorError::UnsupportedPlatform`].
#[derive(Debug, Clone, Default)]
pub struct PlatformRegistry {
    configs: BTreeMap<Platform, PlatformConfig>,
}

impl PlatformRegistry {
    /// Build a registry from explicit settings (later entries win)
    #[must_use]
    pub fn new(configs: impl IntoIterator<Item = PlatformConfig>) -> Self {
        Self {
            configs: configs
                .into_iter()
                .map(|config| (config.platform, config))
                .collect(),
        }
    }

    /// Load every platform from process environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any platform is partially configured or
    /// has a redirect URI that is not an absolute URL
    pub fn from_env() -> ConnectorResult<Self> {
        let mut configs = Vec::new();
        for platform in Platform::ALL {
            match PlatformConfig::from_env(platform)? {
                Some(config) => {
                    config.validate_and_log()?;
                    configs.push(config);
                }
                None => info!(%platform, "OAuth platform not configured, skipping"),
            }
        }
        if configs.is_empty() {
            warn!("No OAuth platforms configured, every connect attempt will be rejected");
        }
        Ok(Self::new(configs))
    }

    /// Settings for a platform identifier supplied by a caller
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` for unknown or unconfigured identifiers
    pub fn resolve(&self, platform: &str) -> ConnectorResult<&PlatformConfig> {
        let parsed: Platform = platform.parse()?;
        self.configs
            .get(&parsed)
            .ok_or_else(|| ConnectorError::unsupported_platform(platform))
    }

    /// Settings for a known platform
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` if the platform was not configured
    pub fn get(&self, platform: Platform) -> ConnectorResult<&PlatformConfig> {
        self.configs
            .get(&platform)
            .ok_or_else(|| ConnectorError::unsupported_platform(platform.as_str()))
    }

    /// Configured platforms, in stable order
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.configs.keys().copied()
    }
}

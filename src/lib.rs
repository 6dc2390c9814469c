// ABOUTME: Main library entry point for the social account connector
// ABOUTME: Links Instagram, Twitter, and LinkedIn accounts to dashboard users and keeps their tokens fresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Social Connector
//!
//! A multi-platform OAuth 2.0 connector and credential lifecycle manager. It
//! authorizes a user's social accounts, exchanges authorization codes for tokens,
//! links external identities to internal users, and refreshes credentials over time.
//!
//! ## Architecture
//!
//! - **Config**: per-platform client settings and runtime settings, loaded once
//! - **Platforms**: descriptor table capturing each provider's OAuth quirks
//! - **`OAuth2` client**: authorize URLs, code exchange, token refresh, profile lookup
//! - **Database plugins**: the credential store trait and its backends
//! - **Refresh**: on-demand orchestrator and proactive scheduler
//! - **Connector**: the facade the HTTP layer calls
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use social_connector::config::{ConnectorConfig, PlatformRegistry};
//! use social_connector::database_plugins::InMemoryCredentialStore;
//! use social_connector::errors::ConnectorResult;
//! use social_connector::SocialConnector;
//! use std::sync::Arc;
//!
//! fn main() -> ConnectorResult<()> {
//!     let connector = SocialConnector::new(
//!         PlatformRegistry::from_env()?,
//!         Arc::new(InMemoryCredentialStore::new()),
//!         ConnectorConfig::from_env()?,
//!     )?;
//!
//!     let request = connector.begin_auth("instagram")?;
//!     println!("Redirect to {}", request.authorization_url);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Connector facade
pub mod connector;

/// Credential store adapter
pub mod credentials;

/// Credential store abstraction and backends
pub mod database_plugins;

/// Structured logging setup
pub mod logging;

/// OAuth 2.0 client operations
pub mod oauth2_client;

/// Platform-variant descriptor table
pub mod platforms;

/// Token refresh orchestration
pub mod refresh;

/// Shared utilities
pub mod utils;

pub use connector::{AuthorizationRequest, SocialConnector};
pub use connector_core::{constants, errors, models};

// ABOUTME: Configuration module for platform credentials and connector runtime settings
// ABOUTME: Everything here is loaded once at startup and injected into the connector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration for the social account connector
//!
//! - **Environment**: timeouts, refresh window, and store location
//! - **OAuth**: per-platform client credentials and endpoints
//! - **Registry**: the read-only set of configured platforms

/// Runtime settings from environment variables
pub mod environment;
/// Per-platform OAuth settings
pub mod oauth;
/// Registry of configured platforms
pub mod registry;

pub use environment::{ConnectorConfig, HttpTimeouts};
pub use oauth::PlatformConfig;
pub use registry::PlatformRegistry;

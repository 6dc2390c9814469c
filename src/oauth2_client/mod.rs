// ABOUTME: OAuth 2.0 client side of the connector: authorize URLs, token calls, profile lookup
// ABOUTME: Every outbound call is timeout-bounded and shaped by the platform descriptor table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! The connector acts as an OAuth 2.0 client of each social platform on behalf of
//! dashboard users. This module handles:
//! - Authorization URL construction (no network)
//! - Authorization code exchange and token refresh
//! - Profile lookup with the freshly issued access token

/// Authorization URL builder
pub mod authorize;
/// Token exchange and refresh
pub mod client;
/// Profile resolver
pub mod profile;

pub use authorize::{build_auth_url, build_auth_url_with_state};
pub use client::OAuth2Client;
pub use profile::ProfileResolver;

// ABOUTME: Core types and constants for the social account connector
// ABOUTME: Foundation crate with error taxonomy, linked-account models, and platform constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Connector Core
//!
//! Foundation crate providing shared types for the social account connector.
//! It performs no I/O, so it changes rarely and keeps incremental builds cheap.
//!
//! ## Modules
//!
//! - **errors**: `ConnectorError`, `DatabaseError`, and `ErrorCode`
//! - **models**: `Platform`, `LinkedAccount`, `TokenMaterial`, `Profile`, `SecretString`
//! - **constants**: provider endpoints, default scopes, environment variable names, timeouts

/// Unified error taxonomy with error codes and user-facing messages
pub mod errors;

/// Connector constants organized by domain
pub mod constants;

/// Platform, linked-account, and credential models
pub mod models;

// ABOUTME: Token refresh: on-demand orchestrator plus an optional proactive scheduler
// ABOUTME: The scheduler only ever calls the orchestrator, it never writes the store itself
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// On-demand refresh of one linked account
pub mod orchestrator;
/// Interval-driven refresh of accounts nearing expiry
pub mod scheduler;

pub use orchestrator::TokenRefresher;
pub use scheduler::{RefreshScheduler, RefreshSummary};

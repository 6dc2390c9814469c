// ABOUTME: Proactive refresh scheduler for linked accounts nearing token expiry
// ABOUTME: Ticks on an interval and delegates each due account to the on-demand orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use connector_core::errors::{ConnectorError, ConnectorResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::orchestrator::TokenRefresher;
use crate::database_plugins::CredentialStore;

/// Outcome counts of one scheduler pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Accounts found expiring within the window
    pub due: usize,
    /// Accounts refreshed successfully
    pub refreshed: usize,
    /// Accounts with nothing to refresh with, or an unconfigured platform
    pub skipped: usize,
    /// Accounts whose refresh failed
    pub failed: usize,
}

/// Refreshes every active account that expires within `window`, every `interval`
#[derive(Clone)]
pub struct RefreshScheduler {
    refresher: TokenRefresher,
    store: Arc<dyn CredentialStore>,
    window: Duration,
    interval: Duration,
}

impl RefreshScheduler {
    /// Create a scheduler
    #[must_use]
    pub fn new(
        refresher: TokenRefresher,
        store: Arc<dyn CredentialStore>,
        window: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            refresher,
            store,
            window,
            interval,
        }
    }

    /// Run a single pass
    ///
    /// Individual refresh failures are counted and logged; they never abort the pass.
    ///
    /// # Errors
    ///
    /// Returns an error only if the due accounts cannot be listed
    pub async fn run_once(&self) -> ConnectorResult<RefreshSummary> {
        let cutoff = chrono::Duration::from_std(self.window)
            .ok()
            .and_then(|window| Utc::now().checked_add_signed(window))
            .ok_or_else(|| {
                ConnectorError::config(format!(
                    "refresh window of {}s is out of range",
                    self.window.as_secs()
                ))
            })?;
        let due = self.store.list_expiring_before(cutoff).await?;

        let mut summary = RefreshSummary {
            due: due.len(),
            ..RefreshSummary::default()
        };
        for account in due {
            match self.refresher.refresh(account.id).await {
                Ok(_) => summary.refreshed += 1,
                Err(
                    ConnectorError::MissingRefreshCredential { .. }
                    | ConnectorError::UnsupportedPlatform { .. },
                ) => {
                    debug!(
                        account_id = %account.id,
                        platform = %account.platform,
                        "Skipping account without refresh path"
                    );
                    summary.skipped += 1;
                }
                Err(e) => {
                    warn!(
                        account_id = %account.id,
                        platform = %account.platform,
                        upstream = e.is_upstream(),
                        error = %e,
                        "Scheduled refresh failed"
                    );
                    summary.failed += 1;
                }
            }
        }

        if summary.due > 0 {
            info!(
                due = summary.due,
                refreshed = summary.refreshed,
                skipped = summary.skipped,
                failed = summary.failed,
                "Refresh pass complete"
            );
        }
        Ok(summary)
    }

    /// Run passes every interval until `shutdown` flips to `true` or its sender drops
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(
            interval_secs = self.interval.as_secs(),
            window_secs = self.window.as_secs(),
            "Refresh scheduler started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        warn!(error = %e, "Refresh pass could not list due accounts");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Refresh scheduler received shutdown signal");
                        break;
                    }
                }
            }
        }
    }
}

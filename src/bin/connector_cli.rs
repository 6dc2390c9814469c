// ABOUTME: Operator CLI for the social account connector
// ABOUTME: Prints authorization URLs, completes callbacks, lists, refreshes, and disconnects accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Every command except auth-url needs a persistent store
//! export DATABASE_URL=sqlite:./connector.db
//!
//! # Print the consent URL for a platform
//! connector-cli auth-url instagram
//!
//! # Complete a callback by hand
//! connector-cli connect instagram --code abc123 --user user-1
//!
//! # List linked accounts of a user
//! connector-cli accounts --user user-1
//!
//! # Refresh one account on demand
//! connector-cli refresh 7f1c3e0a-1d2b-4c5d-9e8f-0a1b2c3d4e5f
//!
//! # Run the proactive refresh scheduler until Ctrl-C
//! connector-cli watch
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use social_connector::config::{ConnectorConfig, PlatformRegistry};
use social_connector::database_plugins::factory::{self, Database};
use social_connector::logging::LoggingConfig;
use social_connector::models::InternalUserId;
use social_connector::SocialConnector;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "connector-cli",
    about = "Social account connector CLI",
    long_about = "Operator tool for linking, refreshing, and disconnecting social platform accounts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print the authorization URL and state for a platform
    AuthUrl {
        /// Platform identifier (instagram, twitter, x, linkedin)
        platform: String,
    },

    /// Exchange an authorization code and link the account
    Connect {
        /// Platform identifier
        platform: String,

        /// Authorization code from the callback
        #[arg(long)]
        code: String,

        /// Internal user the account is linked to
        #[arg(long)]
        user: String,
    },

    /// List linked accounts of a user
    Accounts {
        /// Internal user id
        #[arg(long)]
        user: String,
    },

    /// Show which configured platforms a user is connected to
    Status {
        /// Internal user id
        #[arg(long)]
        user: String,
    },

    /// Refresh one linked account
    Refresh {
        /// Linked account id
        account_id: Uuid,
    },

    /// Disconnect a linked account and wipe its tokens
    Disconnect {
        /// Linked account id
        account_id: Uuid,

        /// Owning internal user id
        #[arg(long)]
        user: String,
    },

    /// Run the proactive refresh scheduler until interrupted
    Watch,
}

impl Command {
    /// Whether the command reads or writes linked accounts
    const fn uses_stored_accounts(&self) -> bool {
        !matches!(self, Self::AuthUrl { .. })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = ConnectorConfig::from_env().context("invalid connector configuration")?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }
    let registry = PlatformRegistry::from_env().context("invalid platform configuration")?;

    if cli.command.uses_stored_accounts() && factory::is_ephemeral(&config.database_url) {
        bail!(
            "{} is discarded when this command exits; set DATABASE_URL or --database-url \
             to a persistent store such as sqlite:./connector.db",
            config.database_url
        );
    }

    info!("Connecting to credential store: {}", config.database_url);
    let database = Database::new(&config.database_url).await?;
    info!("Credential store backend: {}", database.backend_info());
    let connector = SocialConnector::new(registry, Arc::new(database), config)?;

    match cli.command {
        Command::AuthUrl { platform } => {
            print_json(&connector.begin_auth(&platform)?)?;
        }
        Command::Connect {
            platform,
            code,
            user,
        } => {
            let account = connector
                .complete_auth(&platform, &code, &InternalUserId::new(user))
                .await?;
            print_json(&account.summary())?;
        }
        Command::Accounts { user } => {
            print_json(&connector.list_accounts(&InternalUserId::new(user)).await?)?;
        }
        Command::Status { user } => {
            print_json(&connector.connection_status(&InternalUserId::new(user)).await?)?;
        }
        Command::Refresh { account_id } => {
            let account = connector.refresh_account(account_id).await?;
            print_json(&account.summary())?;
        }
        Command::Disconnect { account_id, user } => {
            connector
                .disconnect_account(&InternalUserId::new(user), account_id)
                .await?;
            println!("Disconnected {account_id}");
        }
        Command::Watch => {
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let scheduler = tokio::spawn(connector.refresh_scheduler().run(shutdown_rx));

            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for Ctrl-C")?;
            info!("Shutdown requested, stopping refresh scheduler");
            shutdown_tx.send(true)?;
            scheduler.await?;
        }
    }

    Ok(())
}

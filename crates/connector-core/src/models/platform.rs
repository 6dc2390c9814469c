// ABOUTME: Fixed set of social platforms the connector can link accounts for
// ABOUTME: Parses caller-supplied identifiers and rejects anything outside the set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConnectorError;

/// A supported social platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Instagram
    Instagram,
    /// Twitter / X
    Twitter,
    /// LinkedIn
    Linkedin,
}

impl Platform {
    /// Every platform variant, in registry order
    pub const ALL: [Self; 3] = [Self::Instagram, Self::Twitter, Self::Linkedin];

    /// Stable lowercase identifier used in URLs and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
        }
    }

    /// Human-readable name for user-facing messages
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Twitter => "X (Twitter)",
            Self::Linkedin => "LinkedIn",
        }
    }

    /// Prefix of the environment variables holding this platform's credentials
    #[must_use]
    pub const fn env_prefix(self) -> &'static str {
        match self {
            Self::Instagram => "INSTAGRAM",
            Self::Twitter => "TWITTER",
            Self::Linkedin => "LINKEDIN",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instagram" => Ok(Self::Instagram),
            "twitter" | "x" => Ok(Self::Twitter),
            "linkedin" => Ok(Self::Linkedin),
            _ => Err(ConnectorError::unsupported_platform(s)),
        }
    }
}

// ABOUTME: Domain models for linked social accounts and their credentials
// ABOUTME: Platform identifiers, token material, profiles, and secret wrappers

/// Linked account records and their secret-free summaries
pub mod account;
/// Supported platform identifiers
pub mod platform;
/// Redacting wrapper for credential strings
pub mod secret;
/// Token material and profile returned by providers
pub mod token;

pub use account::{InternalUserId, LinkedAccount, LinkedAccountSummary};
pub use platform::Platform;
pub use secret::SecretString;
pub use token::{Profile, TokenMaterial};

// ABOUTME: Provider endpoint URLs and default scopes for supported social platforms
// ABOUTME: Used as defaults when building the platform configuration registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Instagram (Basic Display)
/// Instagram authorization endpoint
pub const INSTAGRAM_AUTHORIZE_URL: &str = "https://api.instagram.com/oauth/authorize";
/// Instagram code exchange endpoint
pub const INSTAGRAM_TOKEN_URL: &str = "https://api.instagram.com/oauth/access_token";
/// Instagram long-lived token refresh endpoint
pub const INSTAGRAM_REFRESH_URL: &str = "https://graph.instagram.com/refresh_access_token";
/// Instagram profile lookup
pub const INSTAGRAM_PROFILE_URL: &str = "https://graph.instagram.com/me?fields=id,username";
/// Instagram default scope
pub const INSTAGRAM_DEFAULT_SCOPE: &str = "user_profile,user_media";
/// Grant type Instagram expects when refreshing with the current access token
pub const INSTAGRAM_REFRESH_GRANT: &str = "ig_refresh_token";

// Twitter / X (OAuth 2.0 with PKCE)
/// Twitter authorization endpoint
pub const TWITTER_AUTHORIZE_URL: &str = "https://twitter.com/i/oauth2/authorize";
/// Twitter code exchange endpoint
pub const TWITTER_TOKEN_URL: &str = "https://api.twitter.com/2/oauth2/token";
/// Twitter refresh endpoint (same as exchange)
pub const TWITTER_REFRESH_URL: &str = "https://api.twitter.com/2/oauth2/token";
/// Twitter profile lookup
pub const TWITTER_PROFILE_URL: &str = "https://api.twitter.com/2/users/me";
/// Twitter default scope
pub const TWITTER_DEFAULT_SCOPE: &str = "tweet.read tweet.write users.read offline.access";
/// Fixed PKCE verifier sent with the `plain` challenge method
pub const TWITTER_PKCE_VERIFIER: &str = "challenge";
/// PKCE challenge method matching [`TWITTER_PKCE_VERIFIER`]
pub const TWITTER_PKCE_METHOD: &str = "plain";

// LinkedIn
/// LinkedIn authorization endpoint
pub const LINKEDIN_AUTHORIZE_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
/// LinkedIn code exchange endpoint
pub const LINKEDIN_TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
/// LinkedIn refresh endpoint (same as exchange)
pub const LINKEDIN_REFRESH_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
/// LinkedIn profile lookup (OpenID userinfo)
pub const LINKEDIN_PROFILE_URL: &str = "https://api.linkedin.com/v2/userinfo";
/// LinkedIn default scope
pub const LINKEDIN_DEFAULT_SCOPE: &str = "openid profile w_member_social";

/// OAuth grant type for the code exchange
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
/// OAuth grant type for refresh-token refreshes
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";
/// `response_type` requested at the authorize endpoint
pub const RESPONSE_TYPE_CODE: &str = "code";

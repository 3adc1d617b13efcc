//
//  atlassian-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials the [`HttpConnector`](crate::api::HttpConnector) attaches to
//! every outgoing request.
//!
//! ## Supported Authentication Methods
//!
//! - **API token**: Atlassian account email plus API token, sent as HTTP Basic.
//!   Used for Jira, Confluence, Service Management and Assets on a site.
//! - **Bearer**: An organization API key for the Admin API, or an OAuth 2.0
//!   access token, optionally carrying its expiry.
//! - **App Password**: Bitbucket Cloud username plus app password, sent as HTTP Basic.
//!
//! ## Example
//!
//! ```rust
//! use atlassian_client::auth::AuthCredential;
//!
//! let credential = AuthCredential::api_token("dev@example.com", "ATATT3x...");
//! assert!(!credential.is_expired());
//! ```

use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;

/// Represents the credentials understood by Atlassian Cloud APIs.
///
/// # Variants
///
/// - `ApiToken`: Account email and API token, HTTP Basic.
/// - `Bearer`: Admin API key or OAuth access token, `Authorization: Bearer`.
/// - `AppPassword`: Bitbucket username and app password, HTTP Basic.
///
/// # Example
///
/// ```rust
/// use atlassian_client::auth::AuthCredential;
/// use chrono::{Duration, Utc};
///
/// let oauth = AuthCredential::Bearer {
///     token: "eyJhbGciOiJIUzI1NiIs...".to_string(),
///     expires_at: Some(Utc::now() + Duration::hours(1)),
/// };
/// assert!(!oauth.is_expired());
/// ```
#[derive(Clone)]
pub enum AuthCredential {
    /// Atlassian account email with an API token.
    ApiToken {
        /// The Atlassian account email address.
        email: String,
        /// The API token created at id.atlassian.com.
        token: String,
    },
    /// Bearer token authentication.
    ///
    /// Organization API keys never expire from the client's point of view;
    /// OAuth access tokens usually carry `expires_at`.
    Bearer {
        token: String,
        expires_at: Option<DateTime<Utc>>,
    },
    /// App password authentication for Bitbucket Cloud.
    AppPassword {
        /// The Bitbucket username.
        username: String,
        /// The app password generated from Bitbucket settings.
        password: String,
    },
}

impl AuthCredential {
    pub fn api_token(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self::ApiToken {
            email: email.into(),
            token: token.into(),
        }
    }

    /// A bearer credential without expiry, such as an Admin API key.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn app_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::AppPassword {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Applies the authentication credential to an HTTP request.
    ///
    /// Bearer credentials set `Authorization: Bearer`; the other two use HTTP
    /// Basic authentication.
    ///
    /// # Notes
    ///
    /// - Expiration is not checked here. The connector refuses to build a
    ///   request with an expired credential before this is ever called.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::ApiToken { email, token } => request.basic_auth(email, Some(token)),
            Self::Bearer { token, .. } => request.bearer_auth(token),
            Self::AppPassword { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }

    /// Checks if the credential has expired.
    ///
    /// Only bearer credentials with an explicit `expires_at` can expire.
    ///
    /// ```rust
    /// use atlassian_client::auth::AuthCredential;
    /// use chrono::{Duration, Utc};
    ///
    /// let expired = AuthCredential::Bearer {
    ///     token: "token".to_string(),
    ///     expires_at: Some(Utc::now() - Duration::hours(1)),
    /// };
    /// assert!(expired.is_expired());
    /// assert!(!AuthCredential::app_password("me", "secret").is_expired());
    /// ```
    pub fn is_expired(&self) -> bool {
        match self {
            Self::Bearer {
                expires_at: Some(exp),
                ..
            } => *exp < Utc::now(),
            _ => false,
        }
    }

    /// Short label for logs, never containing the secret.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiToken { .. } => "api-token",
            Self::Bearer { .. } => "bearer",
            Self::AppPassword { .. } => "app-password",
        }
    }
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiToken { email, .. } => f
                .debug_struct("ApiToken")
                .field("email", email)
                .field("token", &"***")
                .finish(),
            Self::Bearer { expires_at, .. } => f
                .debug_struct("Bearer")
                .field("token", &"***")
                .field("expires_at", expires_at)
                .finish(),
            Self::AppPassword { username, .. } => f
                .debug_struct("AppPassword")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

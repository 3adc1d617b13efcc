//
//  atlassian-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # atlassian-client
//!
//! Typed, traced clients for the Atlassian Cloud REST APIs: organization
//! administration, Assets, Bitbucket Cloud, Confluence (v1 and v2), Jira
//! (platform v2/v3, Agile, Service Management).
//!
//! Every service method opens an OpenTelemetry span named
//! `<module>.<operation>` on its product's tracer, validates its required
//! arguments before any I/O, and records the request and outcome on the span.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use atlassian_client::api::{admin, CallContext, HttpConnector, Telemetry};
//! use atlassian_client::auth::AuthCredential;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let connector = HttpConnector::admin()?.with_auth(AuthCredential::bearer("admin-api-key"));
//! let client = admin::Client::new(Arc::new(connector), Telemetry::global());
//!
//! let activity = client
//!     .organization
//!     .directory
//!     .activity(&CallContext::new(), "org-id", "account-id")
//!     .await?;
//! for product in &activity.data.data.product_access {
//!     println!("{}: {:?}", product.name, product.last_active);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The `atl` binary in this package drives a handful of these methods from
//! the command line.

/// Connector, service clients, errors and tracing decoration.
pub mod api;

/// Credentials applied to outgoing requests: basic (email + API token),
/// bearer (admin API key or OAuth access token) and Bitbucket app passwords.
pub mod auth;

/// Command-line interface of the `atl` binary.
pub mod cli;

/// TOML configuration of the `atl` binary.
///
/// - Linux: `~/.config/atl/config.toml`
/// - macOS: `~/Library/Application Support/atl/config.toml`
/// - Windows: `%APPDATA%\atl\config.toml`
pub mod config;

pub use cli::Cli;
pub use config::Config;

/// Name of the CLI binary, also used for the configuration directory.
pub const APP_NAME: &str = "atl";

/// The crate version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes of the `atl` binary.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16-31`: Operation-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;

    pub const ERROR: i32 = 1;

    /// A required argument was empty; nothing was sent.
    pub const USAGE: i32 = 2;

    /// 401 or 403, or an expired credential.
    pub const AUTH_ERROR: i32 = 4;

    pub const NOT_FOUND: i32 = 8;

    /// Interrupted with Ctrl+C.
    pub const CANCELLED: i32 = 16;

    pub const RATE_LIMIT: i32 = 32;

    use crate::api::{ApiError, HttpErrorKind};

    /// The exit code for a failed command, derived from the [`ApiError`] at
    /// the root of `err` when there is one.
    pub fn from_error(err: &anyhow::Error) -> i32 {
        let Some(api) = err.downcast_ref::<ApiError>() else {
            return ERROR;
        };
        match api {
            ApiError::Missing(_) => USAGE,
            ApiError::CredentialExpired => AUTH_ERROR,
            ApiError::Cancelled => CANCELLED,
            _ => match api.http_kind() {
                Some(HttpErrorKind::Unauthorized | HttpErrorKind::Forbidden) => AUTH_ERROR,
                Some(HttpErrorKind::NotFound) => NOT_FOUND,
                Some(HttpErrorKind::RateLimited) => RATE_LIMIT,
                _ => ERROR,
            },
        }
    }

}

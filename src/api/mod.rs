//
//  atlassian-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed service methods for the Atlassian Cloud REST APIs.
//!
//! ## Supported Products
//!
//! | Module | Product | Base URL |
//! |--------|---------|----------|
//! | [`admin`] | Organization administration | `api.atlassian.com` |
//! | [`assets`] | Assets | `api.atlassian.com` |
//! | [`bitbucket`] | Bitbucket Cloud | `api.bitbucket.org/2.0` |
//! | [`confluence`] | Confluence v1 | your site |
//! | [`confluence_v2`] | Confluence v2 | your site |
//! | [`jira`] | Jira platform v2/v3 | your site |
//! | [`agile`] | Jira Software | your site |
//! | [`sm`] | Jira Service Management | your site |
//!
//! ## Architecture
//!
//! - [`client`]: the [`Connector`] trait and its `reqwest` implementation
//! - [`common`]: errors, precondition sentinels, response envelope, pagination
//! - [`context`]: per-call cancellation and trace parentage
//! - [`query`]: ordered query string assembly
//! - [`telemetry`]: OpenTelemetry span decoration shared by every service
//!
//! Every service method follows the same pipeline: open a span, check the
//! required arguments, build endpoint, query and body, let the connector send
//! the request, decode the response, classify and end the span.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use atlassian_client::api::{confluence, CallContext, HttpConnector, Telemetry};
//! use atlassian_client::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), atlassian_client::api::ApiError> {
//! let connector = HttpConnector::new("https://acme.atlassian.net")?
//!     .with_auth(AuthCredential::api_token("dev@acme.com", "token"));
//! let client = confluence::Client::new(Arc::new(connector), Telemetry::global());
//!
//! let comments = client
//!     .content
//!     .comment
//!     .gets(&CallContext::new(), "65538", &["body.storage"], &[], 0, 25)
//!     .await?;
//! println!("{} comments ({})", comments.data.results.len(), comments.status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every method returns [`ApiError`]. Missing required arguments come back as
//! [`ApiError::Missing`] before anything is sent; HTTP failures keep the
//! response envelope so the status code and body stay inspectable.

pub mod client;
pub mod common;
pub mod context;
pub mod query;
pub mod telemetry;

mod operation;

#[cfg(test)]
pub(crate) mod testing;

pub mod admin;
pub mod agile;
pub mod assets;
pub mod bitbucket;
pub mod confluence;
pub mod confluence_v2;
pub mod jira;
pub mod sm;

pub use client::{Connector, HttpConnector, Payload, RequestDescriptor};
pub use common::{ApiError, ApiResponse, HttpErrorKind, MissingParam, ResponseEnvelope};
pub use context::CallContext;
pub use query::Query;
pub use telemetry::{Module, OperationSpan, Telemetry};

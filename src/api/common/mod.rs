//
//  atlassian-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types shared by every Atlassian product module
//!
//! This module provides the vocabulary every service method speaks: the error
//! taxonomy, the precondition sentinels, the response envelope returned next to
//! each decoded result, and the pagination shapes reused across products.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`MissingParam`] - Fixed sentinels for omitted required arguments
//! - [`HttpErrorKind`] - Classification of non-2xx responses
//! - [`ResponseEnvelope`] - Status, headers and raw body of a response
//! - [`ApiResponse`] - Decoded result paired with its envelope
//! - Pagination types (re-exported from the `pagination` submodule)
//!
//! # Example
//!
//! ```rust
//! use atlassian_client::api::common::{ApiError, MissingParam};
//!
//! fn describe(result: Result<(), ApiError>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(ApiError::Missing(MissingParam::AdminOrganization)) => "pick an organization".to_string(),
//!         Err(e) if e.is_not_found() => "gone".to_string(),
//!         Err(e) => e.to_string(),
//!     }
//! }
//!
//! assert_eq!(
//!     describe(Err(MissingParam::AdminOrganization.into())),
//!     "pick an organization"
//! );
//! ```

use std::borrow::Cow;
use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

mod pagination;

pub use pagination::*;

/// Precondition sentinels returned when a caller omits a required argument.
///
/// Each variant is a process-wide constant. Service methods check their
/// required arguments left to right and return the sentinel of the first one
/// that is empty, before any request is built. Callers compare by value:
///
/// ```rust
/// use atlassian_client::api::common::{ApiError, MissingParam};
///
/// let err: ApiError = MissingParam::Jql.into();
/// assert_eq!(err.missing_param(), Some(MissingParam::Jql));
/// assert_eq!(err.to_string(), "jira: no jql set");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingParam {
    #[error("admin: no organization id set")]
    AdminOrganization,

    #[error("admin: no account id set")]
    AdminAccountId,

    #[error("admin: no domain id set")]
    AdminDomainId,

    #[error("assets: no workspace id set")]
    AssetsWorkspaceId,

    #[error("assets: no object id set")]
    AssetsObjectId,

    #[error("bitbucket: no workspace set")]
    BitbucketWorkspace,

    #[error("bitbucket: no repository slug set")]
    BitbucketRepository,

    #[error("confluence: no content id set")]
    ContentId,

    #[error("confluence: no template id set")]
    TemplateId,

    #[error("confluence: no page id set")]
    PageId,

    #[error("jira: no jql set")]
    Jql,

    #[error("jira: no issue key/id set")]
    IssueKeyOrId,

    #[error("agile: no board id set")]
    BoardId,

    #[error("sm: no customer request key/id set")]
    CustomerRequestKeyOrId,
}

/// Classification of a non-2xx HTTP response.
///
/// Derived from the status code alone; the human readable detail extracted
/// from the response body travels next to it in [`ApiError::Http`].
///
/// | Variant | HTTP Status |
/// |---------|-------------|
/// | `BadRequest` | 4xx not listed below |
/// | `Unauthorized` | 401 |
/// | `Forbidden` | 403 |
/// | `NotFound` | 404 |
/// | `Conflict` | 409 |
/// | `RateLimited` | 429 |
/// | `ServerError` | 5xx |
/// | `Unexpected` | anything else outside 2xx |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimited,
    ServerError,
    Unexpected,
}

impl HttpErrorKind {
    /// Maps a status code onto its error class.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            429 => Self::RateLimited,
            400..=499 => Self::BadRequest,
            500..=599 => Self::ServerError,
            _ => Self::Unexpected,
        }
    }
}

impl fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BadRequest => "Bad request",
            Self::Unauthorized => "Authentication failed",
            Self::Forbidden => "Permission denied",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Conflict",
            Self::RateLimited => "Rate limit exceeded",
            Self::ServerError => "Server error",
            Self::Unexpected => "Unexpected response",
        };
        f.write_str(label)
    }
}

/// Unified error type for all Atlassian API operations.
///
/// `ApiError` covers the three failure families a service method can produce:
///
/// | Family | Variants | Network call made? |
/// |--------|----------|--------------------|
/// | Precondition | `Missing` | No |
/// | Request construction | `Encode`, `InvalidEndpoint`, `CredentialExpired`, `Cancelled` | No |
/// | Transport / response | `Network`, `Http`, `Decode`, `Cancelled` | Yes |
///
/// Errors are never retried or rewritten on their way back to the caller.
/// When a response was received (`Http`, `Decode`) the envelope is kept so the
/// caller can still inspect the status code and raw body through
/// [`response()`](Self::response).
///
/// # Notes
///
/// - The `Network` variant automatically converts from `reqwest::Error`
/// - The `Missing` variant automatically converts from [`MissingParam`]
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required argument was empty.
    #[error(transparent)]
    Missing(#[from] MissingParam),

    /// The request payload could not be serialized to JSON.
    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The endpoint could not be joined onto the connector's base URL.
    #[error("Invalid endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// The configured credential carries an expiry that has already passed.
    #[error("Authentication credential has expired")]
    CredentialExpired,

    /// The call context was cancelled before or while the request was in flight.
    #[error("Request cancelled")]
    Cancelled,

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// and other transport-layer issues.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{kind} ({}): {message}", .response.status)]
    Http {
        kind: HttpErrorKind,
        message: String,
        response: Box<ResponseEnvelope>,
    },

    /// The server answered 2xx but the body did not match the expected schema.
    #[error("Failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<ResponseEnvelope>,
    },
}

impl ApiError {
    /// Builds the error for a non-2xx response, extracting the product's
    /// error message from the body when one is present.
    pub fn from_response(response: ResponseEnvelope) -> Self {
        let message = crate::api::client::format_api_error(response.status, &response.body);
        Self::Http {
            kind: HttpErrorKind::from_status(response.status),
            message,
            response: Box::new(response),
        }
    }

    /// The response envelope received before the failure, if any.
    pub fn response(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::Http { response, .. } | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Status code of the response that caused the failure, if one arrived.
    pub fn status_code(&self) -> Option<StatusCode> {
        self.response().map(|response| response.status)
    }

    /// The sentinel behind a precondition failure.
    pub fn missing_param(&self) -> Option<MissingParam> {
        match self {
            Self::Missing(param) => Some(*param),
            _ => None,
        }
    }

    /// Classification of an HTTP failure.
    pub fn http_kind(&self) -> Option<HttpErrorKind> {
        match self {
            Self::Http { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.http_kind() == Some(HttpErrorKind::NotFound)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Metadata about one HTTP response.
///
/// Returned next to every decoded result (inside [`ApiResponse`]) and carried
/// by [`ApiError::Http`] / [`ApiError::Decode`] when the call failed after a
/// response arrived. The envelope is owned by the caller and never mutated by
/// the library after it is handed back.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    /// HTTP status code of the response.
    pub status: StatusCode,

    /// Method of the request that produced this response.
    pub method: Method,

    /// Fully resolved URL the request was sent to.
    pub url: Url,

    /// Response headers.
    pub headers: HeaderMap,

    /// Raw, undecoded response body.
    pub body: Vec<u8>,
}

impl ResponseEnvelope {
    /// Numeric status code.
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decodes the JSON body into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// A decoded result paired with the response it came from.
///
/// # Type Parameters
///
/// - `T` - The schema the response body was decoded into
///
/// # Example
///
/// ```rust,no_run
/// use atlassian_client::api::common::ApiResponse;
///
/// fn report<T: std::fmt::Debug>(response: ApiResponse<T>) {
///     println!("{} -> {:?}", response.response.status, response.data);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The decoded response payload.
    pub data: T,

    /// Status, headers and raw body of the response.
    pub response: ResponseEnvelope,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, response: ResponseEnvelope) -> Self {
        Self { data, response }
    }

    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn into_parts(self) -> (T, ResponseEnvelope) {
        (self.data, self.response)
    }
}

//
//  atlassian-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Connector for Atlassian APIs
//!
//! Services never talk to the network directly. They describe a request and
//! hand it to a [`Connector`], which owns transport, authentication and
//! error-response handling. [`HttpConnector`] is the production implementation
//! on top of `reqwest`; tests substitute their own.
//!
//! ## Features
//!
//! - Base URL per product (site, Admin, Bitbucket)
//! - Authentication header injection
//! - W3C trace context propagation
//! - Cancellation of in-flight requests through the [`CallContext`]
//! - Product-aware error message extraction
//! - Custom User-Agent header

use async_trait::async_trait;
use opentelemetry::propagation::Injector;
use reqwest::header::{self, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;

use super::common::{ApiError, ResponseEnvelope};
use super::context::CallContext;
use crate::auth::AuthCredential;

const JSON: &str = "application/json";

/// A serialized JSON request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    bytes: Vec<u8>,
}

impl Payload {
    /// Serializes `value` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] when `value` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_vec(value)
            .map(|bytes| Self { bytes })
            .map_err(ApiError::Encode)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A fully resolved request, ready to be sent by the connector that built it.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub content_type: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// Path and query of the resolved URL, as recorded on spans and logs.
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}

/// Transport abstraction every service talks to.
///
/// Implementations must be shareable across services and tasks.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Builds a request for `endpoint`, a path relative to the connector's base
    /// URL that may already carry a query string.
    ///
    /// When `content_type` is `None` and a payload is present the connector
    /// picks its default (`application/json` for [`HttpConnector`]).
    async fn new_request(
        &self,
        ctx: &CallContext,
        method: Method,
        endpoint: &str,
        content_type: Option<&str>,
        payload: Option<Payload>,
    ) -> Result<RequestDescriptor, ApiError>;

    /// Sends a request produced by [`new_request`](Self::new_request).
    ///
    /// Responses outside 2xx come back as [`ApiError::Http`] carrying the envelope.
    async fn call(
        &self,
        ctx: &CallContext,
        request: RequestDescriptor,
    ) -> Result<ResponseEnvelope, ApiError>;
}

/// Extracts a human readable message from an Atlassian error body.
///
/// Each product family reports errors differently:
///
/// | Product | Shape |
/// |---------|-------|
/// | Jira, Service Management | `{"errorMessages": [..], "errors": {"field": ".."}}` |
/// | Admin | `{"errors": [{"title": "..", "detail": ".."}]}` |
/// | Bitbucket | `{"type": "error", "error": {"message": "..", "detail": ".."}}` |
/// | Confluence, Assets | `{"message": ".."}` |
///
/// Falls back to the raw body, or the status' canonical reason when the body is empty.
pub fn format_api_error(status: StatusCode, body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        // Jira format: {"errorMessages": ["..."], "errors": {"summary": "..."}}
        let mut messages: Vec<String> = json
            .get("errorMessages")
            .and_then(|m| m.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|m| m.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
            messages.extend(
                errors
                    .iter()
                    .filter_map(|(field, m)| m.as_str().map(|m| format!("{}: {}", field, m))),
            );
        }

        // Admin format: {"errors": [{"title": "...", "detail": "..."}]}
        if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
            messages.extend(errors.iter().filter_map(|e| {
                let title = e.get("title").and_then(|t| t.as_str());
                let detail = e
                    .get("detail")
                    .or_else(|| e.get("message"))
                    .and_then(|d| d.as_str());
                match (title, detail) {
                    (Some(title), Some(detail)) => Some(format!("{}: {}", title, detail)),
                    (Some(text), None) | (None, Some(text)) => Some(text.to_string()),
                    (None, None) => None,
                }
            }));
        }

        if !messages.is_empty() {
            return messages.join("; ");
        }

        // Bitbucket format: {"type": "error", "error": {"message": "..."}}
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        // Alternative Bitbucket format: {"error": {"detail": "..."}}
        if let Some(detail) = json
            .get("error")
            .and_then(|e| e.get("detail"))
            .and_then(|m| m.as_str())
        {
            return detail.to_string();
        }

        // Simple message format: {"message": "..."}
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        text.to_string()
    }
}

/// The `reqwest` backed [`Connector`].
///
/// # Creating a Connector
///
/// ```rust,no_run
/// use atlassian_client::api::HttpConnector;
/// use atlassian_client::auth::AuthCredential;
///
/// // Jira, Confluence, Service Management and Assets on a site
/// let site = HttpConnector::new("https://acme.atlassian.net")?
///     .with_auth(AuthCredential::api_token("dev@acme.com", "token"));
///
/// // Organization administration
/// let admin = HttpConnector::admin()?.with_auth(AuthCredential::bearer("admin-key"));
///
/// // Bitbucket Cloud
/// let bitbucket = HttpConnector::bitbucket()?;
/// # Ok::<(), atlassian_client::api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpConnector {
    /// The underlying HTTP client
    http: Client,
    /// Base URL every endpoint is resolved against, always ending in `/`
    base_url: Url,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
}

impl HttpConnector {
    /// Base URL of the organization Admin API and Assets.
    pub const ADMIN_URL: &'static str = "https://api.atlassian.com/";

    /// Base URL of the Bitbucket Cloud API.
    pub const BITBUCKET_URL: &'static str = "https://api.bitbucket.org/2.0/";

    /// Creates a connector for `site`, e.g. `https://acme.atlassian.net`.
    ///
    /// # Errors
    ///
    /// Returns an error if `site` is not an absolute URL or the HTTP client
    /// could not be created.
    pub fn new(site: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(site).map_err(|source| ApiError::InvalidEndpoint {
            endpoint: site.to_string(),
            source,
        })?;

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("atl/{}", crate::VERSION))
                .build()?,
            base_url,
            auth: None,
        })
    }

    /// Creates a connector for the organization Admin API.
    pub fn admin() -> Result<Self, ApiError> {
        Self::new(Self::ADMIN_URL)
    }

    /// Creates a connector for Assets, which lives on the same gateway as Admin.
    pub fn assets() -> Result<Self, ApiError> {
        Self::new(Self::ADMIN_URL)
    }

    /// Creates a connector for Bitbucket Cloud.
    pub fn bitbucket() -> Result<Self, ApiError> {
        Self::new(Self::BITBUCKET_URL)
    }

    /// Sets the authentication credentials for this connector.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn new_request(
        &self,
        ctx: &CallContext,
        method: Method,
        endpoint: &str,
        content_type: Option<&str>,
        payload: Option<Payload>,
    ) -> Result<RequestDescriptor, ApiError> {
        if ctx.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        if self.auth.as_ref().is_some_and(AuthCredential::is_expired) {
            return Err(ApiError::CredentialExpired);
        }

        let url = self
            .base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|source| ApiError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let content_type = match (content_type, &payload) {
            (Some(content_type), _) => Some(content_type.to_string()),
            (None, Some(_)) => Some(JSON.to_string()),
            (None, None) => None,
        };

        Ok(RequestDescriptor {
            method,
            url,
            content_type,
            body: payload.map(Payload::into_bytes),
        })
    }

    async fn call(
        &self,
        ctx: &CallContext,
        request: RequestDescriptor,
    ) -> Result<ResponseEnvelope, ApiError> {
        let RequestDescriptor {
            method,
            url,
            content_type,
            body,
        } = request;

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(header::ACCEPT, JSON);

        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        if let Some(auth) = &self.auth {
            builder = auth.apply_to_request(builder);
        }

        let mut injector = HeaderInjector::default();
        opentelemetry::global::get_text_map_propagator(|propagator| {
            propagator.inject_context(ctx.trace_context(), &mut injector);
        });
        for (k, v) in injector.0 {
            match (HeaderName::from_bytes(k.as_bytes()), HeaderValue::from_str(&v)) {
                (Ok(name), Ok(value)) => builder = builder.header(name, value),
                _ => warn!(header = %k, "Skipping invalid trace propagation header"),
            }
        }

        if let Some(body) = body {
            builder = builder.body(body);
        }

        debug!(%method, url = %url.path(), "Sending request");

        let response = tokio::select! {
            _ = ctx.cancelled() => return Err(ApiError::Cancelled),
            response = builder.send() => response?,
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = tokio::select! {
            _ = ctx.cancelled() => return Err(ApiError::Cancelled),
            body = response.bytes() => body?,
        };

        let envelope = ResponseEnvelope {
            status,
            method,
            url,
            headers,
            body: body.to_vec(),
        };

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                url = %envelope.url.path(),
                "Request did not succeed"
            );
            return Err(ApiError::from_response(envelope));
        }

        debug!(status = status.as_u16(), bytes = envelope.body.len(), "Received response");
        Ok(envelope)
    }
}

#[derive(Default)]
struct HeaderInjector(HashMap<String, String>);

impl Injector for HeaderInjector {
    fn set(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mockito::{Matcher, Server};
    use std::time::Duration as StdDuration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_format_api_error_jira() {
        let body = br#"{"errorMessages":["Issue does not exist"],"errors":{}}"#;
        assert_eq!(
            format_api_error(StatusCode::NOT_FOUND, body),
            "Issue does not exist"
        );

        let body = br#"{"errorMessages":[],"errors":{"summary":"Summary is required"}}"#;
        assert_eq!(
            format_api_error(StatusCode::BAD_REQUEST, body),
            "summary: Summary is required"
        );
    }

    #[test]
    fn test_format_api_error_admin() {
        let body = br#"{"errors":[{"status":"403","title":"Forbidden","detail":"Key lacks scope"}]}"#;
        assert_eq!(
            format_api_error(StatusCode::FORBIDDEN, body),
            "Forbidden: Key lacks scope"
        );
    }

    #[test]
    fn test_format_api_error_bitbucket_and_fallbacks() {
        let body = br#"{"type":"error","error":{"message":"Repository not found"}}"#;
        assert_eq!(
            format_api_error(StatusCode::NOT_FOUND, body),
            "Repository not found"
        );

        assert_eq!(
            format_api_error(StatusCode::BAD_GATEWAY, b"<html>upstream</html>"),
            "<html>upstream</html>"
        );
        assert_eq!(
            format_api_error(StatusCode::SERVICE_UNAVAILABLE, b""),
            "Service Unavailable"
        );
    }

    #[tokio::test]
    async fn test_new_request_resolves_endpoint() {
        let connector = HttpConnector::new("https://acme.atlassian.net").unwrap();
        let request = connector
            .new_request(
                &CallContext::new(),
                Method::GET,
                "/wiki/rest/api/content/42?expand=body",
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(
            request.url.as_str(),
            "https://acme.atlassian.net/wiki/rest/api/content/42?expand=body"
        );
        assert_eq!(request.content_type, None);
        assert_eq!(request.path_and_query(), "/wiki/rest/api/content/42?expand=body");
    }

    #[tokio::test]
    async fn test_new_request_keeps_base_path() {
        let connector = HttpConnector::bitbucket().unwrap();
        let request = connector
            .new_request(&CallContext::new(), Method::GET, "workspaces/acme", None, None)
            .await
            .unwrap();

        assert_eq!(request.url.as_str(), "https://api.bitbucket.org/2.0/workspaces/acme");
    }

    #[test]
    fn test_product_base_urls() {
        assert_eq!(HttpConnector::admin().unwrap().base_url().as_str(), "https://api.atlassian.com/");
        assert_eq!(HttpConnector::assets().unwrap().base_url().as_str(), "https://api.atlassian.com/");
        assert_eq!(
            HttpConnector::bitbucket().unwrap().base_url().as_str(),
            "https://api.bitbucket.org/2.0/"
        );
    }

    #[tokio::test]
    async fn test_new_request_defaults_json_content_type() {
        let connector = HttpConnector::admin().unwrap();
        let payload = Payload::json(&serde_json::json!({"message": "bye"})).unwrap();
        let request = connector
            .new_request(&CallContext::new(), Method::POST, "admin/v1/x", None, Some(payload))
            .await
            .unwrap();

        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(br#"{"message":"bye"}"#.as_slice()));
    }

    #[tokio::test]
    async fn test_new_request_refuses_cancelled_or_expired() {
        let ctx = CallContext::new();
        ctx.cancellation_token().cancel();
        let connector = HttpConnector::admin().unwrap();
        let err = connector
            .new_request(&ctx, Method::GET, "admin/v1/orgs", None, None)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());

        let expired = HttpConnector::admin().unwrap().with_auth(AuthCredential::Bearer {
            token: "t".to_string(),
            expires_at: Some(Utc::now() - Duration::minutes(1)),
        });
        let err = expired
            .new_request(&CallContext::new(), Method::GET, "admin/v1/orgs", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::CredentialExpired));
    }

    #[tokio::test]
    async fn test_call_returns_envelope() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/3/myself")
            .match_header("authorization", Matcher::Regex("^Bearer key$".to_string()))
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("x-arequestid", "abc")
            .with_body(r#"{"accountId":"5b10a2844c20165700ede21g"}"#)
            .create_async()
            .await;

        let connector = HttpConnector::new(&server.url())
            .unwrap()
            .with_auth(AuthCredential::bearer("key"));
        let ctx = CallContext::new();
        let request = connector
            .new_request(&ctx, Method::GET, "rest/api/3/myself", None, None)
            .await
            .unwrap();
        let envelope = connector.call(&ctx, request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(envelope.status, StatusCode::OK);
        assert_eq!(envelope.headers["x-arequestid"], "abc");
        assert!(envelope.text().contains("5b10a2844c20165700ede21g"));
    }

    #[tokio::test]
    async fn test_call_maps_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/rest/api/3/issue/ABC-1")
            .with_status(404)
            .with_body(r#"{"errorMessages":["Issue does not exist or you do not have permission to see it."]}"#)
            .create_async()
            .await;

        let connector = HttpConnector::new(&server.url()).unwrap();
        let ctx = CallContext::new();
        let request = connector
            .new_request(&ctx, Method::DELETE, "rest/api/3/issue/ABC-1", None, None)
            .await
            .unwrap();
        let err = connector.call(&ctx, request).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.response().unwrap().code(), 404);
        assert!(err.to_string().contains("Issue does not exist"));
    }

    #[tokio::test]
    async fn test_call_sends_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/3/search/jql")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({"jql": "project = ABC"})))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let connector = HttpConnector::new(&server.url()).unwrap();
        let ctx = CallContext::new();
        let payload = Payload::json(&serde_json::json!({"jql": "project = ABC"})).unwrap();
        let request = connector
            .new_request(&ctx, Method::POST, "rest/api/3/search/jql", None, Some(payload))
            .await
            .unwrap();
        connector.call(&ctx, request).await.unwrap();

        mock.assert_async().await;
    }

    /// Serves one connection: writes `head` (possibly nothing) and then
    /// holds the socket open without finishing the response.
    async fn stalled_server(head: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket.write_all(head).await.unwrap();
            tokio::time::sleep(StdDuration::from_secs(30)).await;
            drop(socket);
        });
        format!("http://{}", addr)
    }

    async fn cancel_in_flight(site: &str) -> (ApiError, StdDuration) {
        let connector = HttpConnector::new(site).unwrap();
        let ctx = CallContext::new();
        let request = connector
            .new_request(&ctx, Method::GET, "rest/api/3/myself", None, None)
            .await
            .unwrap();

        let token = ctx.cancellation_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(StdDuration::from_millis(100)).await;
            token.cancel();
        });

        let started = std::time::Instant::now();
        let err = tokio::time::timeout(StdDuration::from_secs(5), connector.call(&ctx, request))
            .await
            .expect("call was not cancelled")
            .unwrap_err();
        (err, started.elapsed())
    }

    #[tokio::test]
    async fn test_call_cancelled_while_waiting_for_response() {
        let site = stalled_server(b"").await;

        let (err, elapsed) = cancel_in_flight(&site).await;

        assert!(err.is_cancelled());
        assert!(elapsed >= StdDuration::from_millis(50));
    }

    #[tokio::test]
    async fn test_call_cancelled_while_reading_body() {
        let site =
            stalled_server(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\n{\"partial\"").await;

        let (err, elapsed) = cancel_in_flight(&site).await;

        assert!(err.is_cancelled());
        assert!(elapsed >= StdDuration::from_millis(50));
    }
}

//
//  atlassian-client
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test doubles for service tests: a connector that records what it was
//! asked to send, and an in-memory span exporter.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use opentelemetry::Value;
use opentelemetry_sdk::trace::{
    InMemorySpanExporter, InMemorySpanExporterBuilder, SdkTracerProvider, SpanData,
};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

use super::client::{Connector, Payload, RequestDescriptor};
use super::common::{ApiError, ResponseEnvelope};
use super::context::CallContext;
use super::telemetry::Telemetry;

/// Connector answering from a queue of canned responses.
///
/// Once the queue is empty every call answers `200 {}`.
pub(crate) struct RecordingConnector {
    base_url: Url,
    responses: Mutex<VecDeque<(u16, String)>>,
    new_requests: AtomicUsize,
    sent: Mutex<Vec<RequestDescriptor>>,
}

impl RecordingConnector {
    pub(crate) fn new() -> Self {
        Self {
            base_url: Url::parse("https://test.atlassian.net/").unwrap(),
            responses: Mutex::new(VecDeque::new()),
            new_requests: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
        self
    }

    /// How many times `new_request` was entered.
    pub(crate) fn new_request_count(&self) -> usize {
        self.new_requests.load(Ordering::SeqCst)
    }

    /// Requests passed to `call`, in order.
    pub(crate) fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }

    /// The only request sent, panicking unless exactly one was.
    pub(crate) fn single(&self) -> RequestDescriptor {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one request");
        sent.into_iter().next().unwrap()
    }

    /// The JSON body of the only request sent.
    pub(crate) fn single_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.single().body.expect("request had no body")).unwrap()
    }
}

#[async_trait]
impl Connector for RecordingConnector {
    async fn new_request(
        &self,
        ctx: &CallContext,
        method: Method,
        endpoint: &str,
        content_type: Option<&str>,
        payload: Option<Payload>,
    ) -> Result<RequestDescriptor, ApiError> {
        self.new_requests.fetch_add(1, Ordering::SeqCst);
        if ctx.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let url = self
            .base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|source| ApiError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok(RequestDescriptor {
            method,
            url,
            content_type: content_type
                .map(str::to_string)
                .or_else(|| payload.as_ref().map(|_| "application/json".to_string())),
            body: payload.map(Payload::into_bytes),
        })
    }

    async fn call(
        &self,
        _ctx: &CallContext,
        request: RequestDescriptor,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.sent.lock().unwrap().push(request.clone());
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| (200, "{}".to_string()));

        let envelope = ResponseEnvelope {
            status: StatusCode::from_u16(status).unwrap(),
            method: request.method,
            url: request.url,
            headers: HeaderMap::new(),
            body: body.into_bytes(),
        };

        if envelope.is_success() {
            Ok(envelope)
        } else {
            Err(ApiError::from_response(envelope))
        }
    }
}

/// A tracer provider exporting into memory.
pub(crate) struct SpanCapture {
    exporter: InMemorySpanExporter,
    provider: SdkTracerProvider,
}

impl SpanCapture {
    pub(crate) fn new() -> Self {
        let exporter = InMemorySpanExporterBuilder::new().build();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        Self { exporter, provider }
    }

    pub(crate) fn telemetry(&self) -> Telemetry {
        Telemetry::from_provider(self.provider.clone())
    }

    /// Spans ended so far.
    pub(crate) fn finished(&self) -> Vec<SpanData> {
        self.exporter.get_finished_spans().unwrap()
    }

    pub(crate) fn attribute(span: &SpanData, key: &str) -> Option<Value> {
        span.attributes
            .iter()
            .find(|kv| kv.key.as_str() == key)
            .map(|kv| kv.value.clone())
    }
}

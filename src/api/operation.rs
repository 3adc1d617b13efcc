//
//  atlassian-client
//  api/operation.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The call pipeline shared by every service method.
//!
//! A service method describes its call with an [`Operation`] and finishes it
//! with [`send`](Operation::send) (decode the body) or
//! [`execute`](Operation::execute) (envelope only). The pipeline is always:
//!
//! 1. open the span (when the operation is created)
//! 2. check required arguments, first failure wins, no request is built
//! 3. annotate the span with method, URL and domain attributes
//! 4. encode the payload, build the request, send it
//! 5. decode the body, classify the span, end it

use std::sync::Arc;

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::client::{Connector, Payload};
use super::common::{ApiError, ApiResponse, MissingParam, ResponseEnvelope};
use super::context::CallContext;
use super::query::Query;
use super::telemetry::{Module, OperationSpan, Telemetry};

/// What every service holds: a connector, a telemetry handle and its module.
#[derive(Clone)]
pub(crate) struct ServiceCore {
    connector: Arc<dyn Connector>,
    telemetry: Telemetry,
    module: Module,
}

impl ServiceCore {
    pub(crate) fn new(connector: Arc<dyn Connector>, telemetry: Telemetry, module: Module) -> Self {
        Self {
            connector,
            telemetry,
            module,
        }
    }

    /// Starts the span for `name` and returns the builder for the call.
    pub(crate) fn operation<'a>(
        &'a self,
        ctx: &'a CallContext,
        name: &'static str,
        method: Method,
    ) -> Operation<'a> {
        Operation {
            core: self,
            ctx,
            span: OperationSpan::start(&self.telemetry, ctx, self.module, name),
            method,
            missing: None,
            endpoint: String::new(),
            query: Query::new(),
            payload: None,
            attributes: Vec::new(),
        }
    }
}

impl std::fmt::Debug for ServiceCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCore")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// One traced service call under construction.
pub(crate) struct Operation<'a> {
    core: &'a ServiceCore,
    ctx: &'a CallContext,
    span: OperationSpan,
    method: Method,
    missing: Option<MissingParam>,
    endpoint: String,
    query: Query,
    payload: Option<Result<Payload, ApiError>>,
    attributes: Vec<KeyValue>,
}

impl<'a> Operation<'a> {
    /// Requires `value` to be non-empty.
    pub(crate) fn require(mut self, value: &str, param: MissingParam) -> Self {
        if self.missing.is_none() && value.is_empty() {
            self.missing = Some(param);
        }
        self
    }

    /// Requires a numeric identifier to be non-zero.
    pub(crate) fn require_id(mut self, value: u64, param: MissingParam) -> Self {
        if self.missing.is_none() && value == 0 {
            self.missing = Some(param);
        }
        self
    }

    pub(crate) fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub(crate) fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.payload = Some(Payload::json(body));
        self
    }

    /// A domain attribute, recorded once the arguments are validated.
    pub(crate) fn attribute(mut self, attribute: KeyValue) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Runs the call and decodes a 2xx body into `T`.
    pub(crate) async fn send<T: DeserializeOwned>(mut self) -> Result<ApiResponse<T>, ApiError> {
        let result = self.dispatch().await.and_then(|response| {
            match response.decode::<T>() {
                Ok(data) => Ok(ApiResponse::new(data, response)),
                Err(source) => Err(ApiError::Decode {
                    source,
                    response: Box::new(response),
                }),
            }
        });

        match &result {
            Ok(response) => self.span.set_response(response.status()),
            Err(err) => self.span.set_error(err),
        }
        result
    }

    /// Runs the call for operations whose response has no body of interest.
    pub(crate) async fn execute(mut self) -> Result<ResponseEnvelope, ApiError> {
        let result = self.dispatch().await;

        match &result {
            Ok(response) => self.span.set_response(response.status),
            Err(err) => self.span.set_error(err),
        }
        result
    }

    async fn dispatch(&mut self) -> Result<ResponseEnvelope, ApiError> {
        if let Some(param) = self.missing {
            debug!(
                module = self.span.module().name(),
                operation = self.span.operation(),
                "{}",
                param
            );
            return Err(param.into());
        }

        let endpoint = self.query.append_to(&self.endpoint);
        self.span.set_attributes(&self.method, &endpoint);
        for attribute in self.attributes.drain(..) {
            self.span.set_attribute(attribute);
        }

        let payload = self.payload.take().transpose()?;
        let ctx = self
            .ctx
            .clone()
            .with_trace_context(self.span.trace_context().clone());

        let connector = &self.core.connector;
        let request = connector
            .new_request(&ctx, self.method.clone(), &endpoint, None, payload)
            .await?;
        connector.call(&ctx, request).await
    }
}

//
//  atlassian-client
//  api/telemetry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OpenTelemetry decoration for service calls
//!
//! Every service method runs inside an [`OperationSpan`]. The span is opened
//! before argument validation, annotated with the request attributes before
//! the network call, classified from the response status afterwards, and
//! ended exactly once when the guard is dropped, whichever way the call exits.
//!
//! ## Tracer provider injection
//!
//! Services do not look tracers up from an ambient global. They receive a
//! [`Telemetry`] handle at construction and resolve a tracer from it on each
//! call, so a provider registered at process start is picked up by every
//! service built afterwards, and tests can hand in their own provider.
//!
//! ```rust,no_run
//! use atlassian_client::api::Telemetry;
//! use opentelemetry_sdk::trace::SdkTracerProvider;
//!
//! // Whatever is registered globally at call time.
//! let global = Telemetry::global();
//!
//! // An explicit provider, e.g. one exporting to a collector.
//! let provider = SdkTracerProvider::builder().build();
//! let explicit = Telemetry::from_provider(provider);
//! ```
//!
//! ## Attribute vocabulary
//!
//! | Key | Set when |
//! |-----|----------|
//! | `http.method` | before the request is sent |
//! | `http.url` | before the request is sent (endpoint path and query) |
//! | `component` | before the request is sent, always [`COMPONENT`] |
//! | `module` | before the request is sent |
//! | `operation` | before the request is sent |
//! | `http.status_code` | once a response arrived |
//!
//! Operations may add domain attributes such as `content.id` or
//! `pagination.limit`.

use std::fmt;
use std::sync::Arc;

use opentelemetry::global::{self, BoxedTracer};
use opentelemetry::trace::{Status, TraceContextExt, Tracer, TracerProvider};
use opentelemetry::{Context as TraceContext, KeyValue};
use reqwest::{Method, StatusCode};

use super::common::ApiError;
use super::context::CallContext;

/// Value of the `component` attribute on every span.
pub const COMPONENT: &str = env!("CARGO_PKG_NAME");

/// Attribute keys used on operation spans.
pub mod keys {
    pub const HTTP_METHOD: &str = "http.method";
    pub const HTTP_URL: &str = "http.url";
    pub const HTTP_STATUS_CODE: &str = "http.status_code";
    pub const COMPONENT: &str = "component";
    pub const MODULE: &str = "module";
    pub const OPERATION: &str = "operation";
}

/// The product surfaces that own a tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Admin,
    Assets,
    Bitbucket,
    Confluence,
    ConfluenceV2,
    JiraAgile,
    JiraSm,
    JiraV2,
    JiraV3,
}

impl Module {
    pub const ALL: [Module; 9] = [
        Module::Admin,
        Module::Assets,
        Module::Bitbucket,
        Module::Confluence,
        Module::ConfluenceV2,
        Module::JiraAgile,
        Module::JiraSm,
        Module::JiraV2,
        Module::JiraV3,
    ];

    /// Value of the `module` attribute and prefix of every span name.
    pub const fn name(self) -> &'static str {
        match self {
            Module::Admin => "admin",
            Module::Assets => "assets",
            Module::Bitbucket => "bitbucket",
            Module::Confluence => "confluence",
            Module::ConfluenceV2 => "confluence.v2",
            Module::JiraAgile => "jira.agile",
            Module::JiraSm => "jira.sm",
            Module::JiraV2 => "jira.v2",
            Module::JiraV3 => "jira.v3",
        }
    }

    /// Instrumentation scope name of the module's tracer.
    pub const fn tracer_name(self) -> &'static str {
        match self {
            Module::Admin => concat!(env!("CARGO_PKG_NAME"), "/admin"),
            Module::Assets => concat!(env!("CARGO_PKG_NAME"), "/assets"),
            Module::Bitbucket => concat!(env!("CARGO_PKG_NAME"), "/bitbucket"),
            Module::Confluence => concat!(env!("CARGO_PKG_NAME"), "/confluence"),
            Module::ConfluenceV2 => concat!(env!("CARGO_PKG_NAME"), "/confluence/v2"),
            Module::JiraAgile => concat!(env!("CARGO_PKG_NAME"), "/jira/agile"),
            Module::JiraSm => concat!(env!("CARGO_PKG_NAME"), "/jira/sm"),
            Module::JiraV2 => concat!(env!("CARGO_PKG_NAME"), "/jira/v2"),
            Module::JiraV3 => concat!(env!("CARGO_PKG_NAME"), "/jira/v3"),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type TracerFactory = dyn Fn(&'static str) -> BoxedTracer + Send + Sync;

/// Capability handing out module tracers.
///
/// Cheap to clone; every product client keeps one and resolves its tracer
/// from it per call.
#[derive(Clone)]
pub struct Telemetry {
    factory: Arc<TracerFactory>,
}

impl Telemetry {
    /// Resolves tracers from the globally registered provider at call time.
    ///
    /// Until a provider is registered with
    /// [`opentelemetry::global::set_tracer_provider`] spans are no-ops.
    pub fn global() -> Self {
        Self {
            factory: Arc::new(|name| global::tracer(name)),
        }
    }

    /// Resolves tracers from an explicit provider.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: TracerProvider + Send + Sync + 'static,
        P::Tracer: Send + Sync + 'static,
        <P::Tracer as Tracer>::Span: Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(move |name| BoxedTracer::new(Box::new(provider.tracer(name)))),
        }
    }

    /// The tracer for `module`.
    pub fn tracer(&self, module: Module) -> BoxedTracer {
        (self.factory)(module.tracer_name())
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry").finish_non_exhaustive()
    }
}

/// Span status for a response code: error at 400 and above, ok below.
pub fn response_status(status: StatusCode) -> Status {
    if status.as_u16() >= 400 {
        Status::error(status.canonical_reason().unwrap_or("unknown status"))
    } else {
        Status::Ok
    }
}

/// Scoped span around one service call.
///
/// The span ends when the guard is dropped (or passed to [`finish`](Self::finish)),
/// so early returns cannot leave it open.
pub struct OperationSpan {
    module: Module,
    operation: &'static str,
    cx: TraceContext,
}

impl OperationSpan {
    /// Starts the span `<module>.<operation>` as a child of the caller's trace context.
    pub fn start(
        telemetry: &Telemetry,
        ctx: &CallContext,
        module: Module,
        operation: &'static str,
    ) -> Self {
        let tracer = telemetry.tracer(module);
        let span =
            tracer.start_with_context(format!("{}.{}", module.name(), operation), ctx.trace_context());

        Self {
            module,
            operation,
            cx: ctx.trace_context().with_span(span),
        }
    }

    pub fn module(&self) -> Module {
        self.module
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The trace context with this span active, for propagation downstream.
    pub fn trace_context(&self) -> &TraceContext {
        &self.cx
    }

    /// Sets the request attributes: method, URL, component, module and operation.
    pub fn set_attributes(&self, method: &Method, endpoint: &str) {
        let span = self.cx.span();
        span.set_attribute(KeyValue::new(keys::HTTP_METHOD, method.as_str().to_string()));
        span.set_attribute(KeyValue::new(keys::HTTP_URL, endpoint.to_string()));
        span.set_attribute(KeyValue::new(keys::COMPONENT, COMPONENT));
        span.set_attribute(KeyValue::new(keys::MODULE, self.module.name()));
        span.set_attribute(KeyValue::new(keys::OPERATION, self.operation));
    }

    pub fn set_attribute(&self, attribute: KeyValue) {
        self.cx.span().set_attribute(attribute);
    }

    /// Marks the span failed and records `err` on it.
    pub fn set_error(&self, err: &ApiError) {
        let span = self.cx.span();
        if let Some(status) = err.status_code() {
            span.set_attribute(KeyValue::new(keys::HTTP_STATUS_CODE, i64::from(status.as_u16())));
        }
        span.set_status(Status::error(err.to_string()));
        span.record_error(err);
    }

    /// Records the response status and classifies the span from it.
    pub fn set_response(&self, status: StatusCode) {
        let span = self.cx.span();
        span.set_attribute(KeyValue::new(keys::HTTP_STATUS_CODE, i64::from(status.as_u16())));
        span.set_status(response_status(status));
    }

    /// Ends the span now.
    pub fn finish(self) {}
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        self.cx.span().end();
    }
}

/// Starts a span on `module`'s tracer.
pub fn start_span(
    telemetry: &Telemetry,
    ctx: &CallContext,
    module: Module,
    operation: &'static str,
) -> OperationSpan {
    OperationSpan::start(telemetry, ctx, module, operation)
}

pub fn set_span_attributes(span: &OperationSpan, method: &Method, endpoint: &str) {
    span.set_attributes(method, endpoint);
}

pub fn set_span_error(span: &OperationSpan, err: &ApiError) {
    span.set_error(err);
}

pub fn set_span_response(span: &OperationSpan, status: StatusCode) {
    span.set_response(status);
}

pub fn finish_span(span: OperationSpan) {
    span.finish();
}

/// Declares a product module's tracing surface: its tracer name, a tracer
/// accessor, a span starter bound to the module, and the span helpers.
macro_rules! module_tracing {
    ($module:expr) => {
        pub use $crate::api::telemetry::{
            finish_span, set_span_attributes, set_span_error, set_span_response,
        };

        /// Instrumentation scope name of this module's tracer.
        pub const TRACER_NAME: &str = $module.tracer_name();

        /// This module's tracer, resolved from `telemetry`.
        pub fn tracer(
            telemetry: &$crate::api::telemetry::Telemetry,
        ) -> ::opentelemetry::global::BoxedTracer {
            telemetry.tracer($module)
        }

        /// Starts the span `<module>.<operation>` on this module's tracer.
        pub fn start_span(
            telemetry: &$crate::api::telemetry::Telemetry,
            ctx: &$crate::api::context::CallContext,
            operation: &'static str,
        ) -> $crate::api::telemetry::OperationSpan {
            $crate::api::telemetry::start_span(telemetry, ctx, $module, operation)
        }
    };
}

pub(crate) use module_tracing;

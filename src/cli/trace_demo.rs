//
//  atlassian-client
//  cli/trace_demo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `atl trace-demo`: exercises the tracing surface of every product module
//! without touching the network.
//!
//! For each module a span is started on the module's tracer, annotated with a
//! request method and endpoint, classified from a response status and ended.
//! Each span is parented to the previous one, so an exporter shows a single
//! trace nine spans deep.

use anyhow::Result;
use clap::Args;
use reqwest::{Method, StatusCode};

use crate::api::telemetry::{
    finish_span, set_span_attributes, set_span_response, OperationSpan, Telemetry,
};
use crate::api::{admin, agile, assets, bitbucket, confluence, confluence_v2, jira, sm};
use crate::api::CallContext;

#[derive(Args, Debug)]
pub struct TraceDemoCommand {
    /// Status recorded on every span; 400 and above marks them failed
    #[arg(long, value_parser = clap::value_parser!(u16).range(100..600))]
    pub status: Option<u16>,
}

type SpanStarter = fn(&Telemetry, &CallContext, &'static str) -> OperationSpan;

/// One demo step: the module's tracer, and the request it pretends to make.
struct Step {
    label: &'static str,
    tracer_name: &'static str,
    start: SpanStarter,
    method: Method,
    endpoint: &'static str,
    status: u16,
}

fn steps() -> Vec<Step> {
    vec![
        Step {
            label: "Admin",
            tracer_name: admin::TRACER_NAME,
            start: admin::start_span,
            method: Method::GET,
            endpoint: "/admin/test",
            status: 200,
        },
        Step {
            label: "Assets",
            tracer_name: assets::TRACER_NAME,
            start: assets::start_span,
            method: Method::PUT,
            endpoint: "/assets/test",
            status: 201,
        },
        Step {
            label: "Bitbucket",
            tracer_name: bitbucket::TRACER_NAME,
            start: bitbucket::start_span,
            method: Method::POST,
            endpoint: "/bitbucket/test",
            status: 202,
        },
        Step {
            label: "Confluence",
            tracer_name: confluence::TRACER_NAME,
            start: confluence::start_span,
            method: Method::DELETE,
            endpoint: "/confluence/test",
            status: 204,
        },
        Step {
            label: "Confluence v2",
            tracer_name: confluence_v2::TRACER_NAME,
            start: confluence_v2::start_span,
            method: Method::PATCH,
            endpoint: "/confluence/v2/test",
            status: 200,
        },
        Step {
            label: "Jira Agile",
            tracer_name: agile::TRACER_NAME,
            start: agile::start_span,
            method: Method::GET,
            endpoint: "/jira/agile/test",
            status: 200,
        },
        Step {
            label: "Jira Service Management",
            tracer_name: sm::TRACER_NAME,
            start: sm::start_span,
            method: Method::GET,
            endpoint: "/jira/sm/test",
            status: 200,
        },
        Step {
            label: "Jira v2",
            tracer_name: jira::v2::TRACER_NAME,
            start: jira::v2::start_span,
            method: Method::GET,
            endpoint: "/jira/v2/test",
            status: 200,
        },
        Step {
            label: "Jira v3",
            tracer_name: jira::v3::TRACER_NAME,
            start: jira::v3::start_span,
            method: Method::GET,
            endpoint: "/jira/v3/test",
            status: 200,
        },
    ]
}

impl TraceDemoCommand {
    pub async fn run(&self, ctx: &CallContext, telemetry: &Telemetry) -> Result<()> {
        println!("=== OpenTelemetry Integration Test ===");

        for name in self.emit(ctx, telemetry)? {
            println!("✓ {}", name);
        }

        println!("\n=== All modules successfully configured for OpenTelemetry tracing ===");
        Ok(())
    }

    /// Emits one span per module and returns a `<label> module tracer: <name>`
    /// line for each.
    fn emit(&self, ctx: &CallContext, telemetry: &Telemetry) -> Result<Vec<String>> {
        let mut parent = ctx.clone();
        let mut lines = Vec::new();

        for step in steps() {
            let code = self.status.unwrap_or(step.status);
            let status = StatusCode::from_u16(code)?;

            let span = (step.start)(telemetry, &parent, "operation");
            set_span_attributes(&span, &step.method, step.endpoint);
            set_span_response(&span, status);
            parent = parent.with_trace_context(span.trace_context().clone());
            finish_span(span);

            tracing::debug!("{} span ended with status {}", step.tracer_name, code);
            lines.push(format!("{} module tracer: {}", step.label, step.tracer_name));
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry::trace::Status;
    use opentelemetry::Value;

    use super::*;
    use crate::api::telemetry::keys;
    use crate::api::testing::SpanCapture;

    #[test]
    fn test_emits_one_span_per_module() {
        let capture = SpanCapture::new();
        let command = TraceDemoCommand { status: None };

        let lines = command
            .emit(&CallContext::new(), &capture.telemetry())
            .unwrap();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Admin module tracer: atlassian-client/admin");
        assert_eq!(lines[8], "Jira v3 module tracer: atlassian-client/jira/v3");

        let spans = capture.finished();
        assert_eq!(spans.len(), 9);

        let names: Vec<_> = spans.iter().map(|span| span.name.to_string()).collect();
        assert!(names.contains(&"assets.operation".to_string()));
        assert!(names.contains(&"jira.sm.operation".to_string()));

        let assets = spans
            .iter()
            .find(|span| span.name == "assets.operation")
            .unwrap();
        assert_eq!(
            SpanCapture::attribute(assets, keys::HTTP_METHOD),
            Some(Value::from("PUT"))
        );
        assert_eq!(
            SpanCapture::attribute(assets, keys::HTTP_STATUS_CODE),
            Some(Value::I64(201))
        );
        assert_eq!(assets.instrumentation_scope.name(), "atlassian-client/assets");
    }

    #[test]
    fn test_spans_form_one_trace() {
        let capture = SpanCapture::new();
        TraceDemoCommand { status: None }
            .emit(&CallContext::new(), &capture.telemetry())
            .unwrap();

        let spans = capture.finished();
        let trace_id = spans[0].span_context.trace_id();
        assert!(spans
            .iter()
            .all(|span| span.span_context.trace_id() == trace_id));
    }

    #[test]
    fn test_status_override_marks_spans_failed() {
        let capture = SpanCapture::new();
        TraceDemoCommand { status: Some(503) }
            .emit(&CallContext::new(), &capture.telemetry())
            .unwrap();

        let spans = capture.finished();
        assert!(spans
            .iter()
            .all(|span| matches!(span.status, Status::Error { .. })));
    }
}

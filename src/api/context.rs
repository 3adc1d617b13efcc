//
//  atlassian-client
//  api/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Per-call context threaded from the caller down to the connector.
//!
//! A [`CallContext`] carries two things: a cancellation token, so a caller can
//! abandon an in-flight request, and the OpenTelemetry context the operation
//! span is parented to. Service methods never store a context; each call
//! receives one and hands a child of it to the connector.

use opentelemetry::Context as TraceContext;
use tokio_util::sync::CancellationToken;

/// Cancellation and trace parentage for a single service call.
///
/// # Example
///
/// ```rust
/// use atlassian_client::api::CallContext;
///
/// let ctx = CallContext::new();
/// let token = ctx.cancellation_token().clone();
///
/// assert!(!ctx.is_cancelled());
/// token.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancellation: CancellationToken,
    trace: TraceContext,
}

impl CallContext {
    /// A fresh context with its own cancellation token and no trace parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context parented to the OpenTelemetry context active on this thread.
    pub fn current() -> Self {
        Self {
            cancellation: CancellationToken::new(),
            trace: TraceContext::current(),
        }
    }

    /// Replaces the cancellation token, e.g. with a child of an app-wide token.
    pub fn with_cancellation(self, cancellation: CancellationToken) -> Self {
        Self {
            cancellation,
            ..self
        }
    }

    /// Replaces the trace parent.
    pub fn with_trace_context(self, trace: TraceContext) -> Self {
        Self { trace, ..self }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn trace_context(&self) -> &TraceContext {
        &self.trace
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Resolves once the context is cancelled.
    pub async fn cancelled(&self) {
        self.cancellation.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_token_follows_parent() {
        let parent = CancellationToken::new();
        let ctx = CallContext::new().with_cancellation(parent.child_token());

        assert!(!ctx.is_cancelled());
        parent.cancel();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let ctx = CallContext::new();
        let token = ctx.cancellation_token().clone();

        let waiter = tokio::spawn({
            let ctx = ctx.clone();
            async move { ctx.cancelled().await }
        });
        token.cancel();

        tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .expect("cancellation should wake the waiter")
            .unwrap();
    }
}

//
//  atlassian-client
//  api/bitbucket/workspace.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Workspaces, the top-level unit holding repositories and projects.
//!
//! # Notes
//!
//! - Workspace slugs are globally unique and URL-safe
//! - A user can be a member of multiple workspaces

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResponse, MissingParam};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;

/// A Bitbucket Cloud workspace.
///
/// ```rust,no_run
/// use atlassian_client::api::bitbucket::Workspace;
///
/// fn list_workspaces(workspaces: &[Workspace]) {
///     for ws in workspaces {
///         println!("{} ({})", ws.name, ws.slug);
///         if ws.is_private {
///             println!("  [Private workspace]");
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique identifier, e.g. `{a1b2c3d4-...}`.
    pub uuid: String,

    /// URL-safe identifier used in API paths.
    pub slug: String,

    pub name: String,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub created_on: Option<String>,
}

/// Workspace operations of the Bitbucket API.
#[derive(Debug, Clone)]
pub struct WorkspaceService {
    core: ServiceCore,
}

impl WorkspaceService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    /// Gets a workspace by slug or UUID.
    pub async fn get(
        &self,
        ctx: &CallContext,
        workspace: &str,
    ) -> Result<ApiResponse<Workspace>, ApiError> {
        self.core
            .operation(ctx, "workspace.get", Method::GET)
            .require(workspace, MissingParam::BitbucketWorkspace)
            .endpoint(format!("workspaces/{}", workspace))
            .attribute(KeyValue::new("workspace", workspace.to_string()))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::bitbucket::Client;
    use crate::api::testing::{RecordingConnector, SpanCapture};

    #[tokio::test]
    async fn test_get_workspace() {
        let connector = Arc::new(RecordingConnector::new().respond(
            200,
            r#"{"uuid": "{ws-1}", "slug": "acme", "name": "Acme", "is_private": true,
                "created_on": "2020-01-01T00:00:00+00:00"}"#,
        ));
        let capture = SpanCapture::new();
        let client = Client::new(connector.clone(), capture.telemetry());

        let workspace = client
            .workspace
            .get(&CallContext::new(), "acme")
            .await
            .unwrap()
            .into_data();

        assert!(workspace.is_private);
        assert_eq!(connector.single().url.path(), "/workspaces/acme");
        assert_eq!(capture.finished()[0].name, "bitbucket.workspace.get");
    }

    #[tokio::test]
    async fn test_get_requires_workspace() {
        let connector = Arc::new(RecordingConnector::new());
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let err = client
            .workspace
            .get(&CallContext::new(), "")
            .await
            .unwrap_err();

        assert_eq!(err.missing_param(), Some(MissingParam::BitbucketWorkspace));
        assert_eq!(connector.new_request_count(), 0);
    }
}

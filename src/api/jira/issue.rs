//
//  atlassian-client
//  api/jira/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use super::{SearchService, Version};
use crate::api::common::{ApiError, ApiResponse, MissingParam, ResponseEnvelope};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

/// A Jira issue.
///
/// Only the system fields most callers need are typed; everything else
/// (custom fields included) lands in [`IssueFields::other`].
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default)]
    pub url: Option<String>,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    /// Wiki markup in v2, an Atlassian Document Format tree in v3.
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<NamedEntity>,
    #[serde(default)]
    pub issuetype: Option<NamedEntity>,
    #[serde(default)]
    pub priority: Option<NamedEntity>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub reporter: Option<User>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// Status, issue type, priority and similar `{id, name}` references.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntity {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Issue operations of the Jira platform API.
#[derive(Debug, Clone)]
pub struct IssueService {
    core: ServiceCore,
    version: Version,
    /// JQL search over issues.
    pub search: SearchService,
}

impl IssueService {
    pub(crate) fn new(core: ServiceCore, version: Version) -> Self {
        Self {
            search: SearchService::new(core.clone(), version),
            core,
            version,
        }
    }

    /// Gets an issue by key or id.
    ///
    /// `fields` and `expand` are omitted when empty, in which case Jira
    /// returns all navigable fields.
    pub async fn get(
        &self,
        ctx: &CallContext,
        issue_key_or_id: &str,
        fields: &[&str],
        expand: &[&str],
    ) -> Result<ApiResponse<Issue>, ApiError> {
        self.core
            .operation(ctx, "issue.get", Method::GET)
            .require(issue_key_or_id, MissingParam::IssueKeyOrId)
            .endpoint(format!(
                "rest/api/{}/issue/{}",
                self.version.as_str(),
                issue_key_or_id
            ))
            .query(Query::new().list("fields", fields).list("expand", expand))
            .attribute(KeyValue::new("issue.key", issue_key_or_id.to_string()))
            .send()
            .await
    }

    /// Deletes an issue. Issues with subtasks need `delete_subtasks`.
    pub async fn delete(
        &self,
        ctx: &CallContext,
        issue_key_or_id: &str,
        delete_subtasks: bool,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.core
            .operation(ctx, "issue.delete", Method::DELETE)
            .require(issue_key_or_id, MissingParam::IssueKeyOrId)
            .endpoint(format!(
                "rest/api/{}/issue/{}",
                self.version.as_str(),
                issue_key_or_id
            ))
            .query(Query::new().param("deleteSubtasks", delete_subtasks))
            .attribute(KeyValue::new("issue.key", issue_key_or_id.to_string()))
            .execute()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use opentelemetry::trace::Status;

    use super::*;
    use crate::api::jira::Client;
    use crate::api::testing::{RecordingConnector, SpanCapture};

    #[tokio::test]
    async fn test_get_issue_v2() {
        let connector = Arc::new(RecordingConnector::new().respond(
            200,
            r#"{
                "id": "10001", "key": "ABC-1",
                "self": "https://acme.atlassian.net/rest/api/2/issue/10001",
                "fields": {
                    "summary": "Login fails",
                    "description": "h1. Steps",
                    "status": {"id": "3", "name": "In Progress"},
                    "assignee": {"accountId": "5b10", "displayName": "Dev"},
                    "customfield_10010": 8
                }
            }"#,
        ));
        let capture = SpanCapture::new();
        let client = Client::new(connector.clone(), capture.telemetry(), Version::V2);

        let issue = client
            .issue
            .get(&CallContext::new(), "ABC-1", &["summary", "status"], &[])
            .await
            .unwrap()
            .into_data();

        assert_eq!(issue.fields.summary, "Login fails");
        assert_eq!(issue.fields.status.unwrap().name, "In Progress");
        assert_eq!(issue.fields.other["customfield_10010"], 8);
        assert_eq!(
            connector.single().path_and_query(),
            "/rest/api/2/issue/ABC-1?fields=summary,status"
        );
        assert_eq!(capture.finished()[0].name, "jira.v2.issue.get");
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let connector = Arc::new(RecordingConnector::new().respond(
            404,
            r#"{"errorMessages": ["Issue does not exist or you do not have permission to see it."], "errors": {}}"#,
        ));
        let capture = SpanCapture::new();
        let client = Client::new(connector.clone(), capture.telemetry(), Version::V3);

        let err = client
            .issue
            .get(&CallContext::new(), "ABC-404", &[], &[])
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.response().unwrap().code(), 404);

        let spans = capture.finished();
        assert_eq!(spans.len(), 1);
        assert!(matches!(spans[0].status, Status::Error { .. }));
    }

    #[tokio::test]
    async fn test_delete_requires_key() {
        let connector = Arc::new(RecordingConnector::new());
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry(), Version::V3);

        let err = client
            .issue
            .delete(&CallContext::new(), "", true)
            .await
            .unwrap_err();

        assert_eq!(err.missing_param(), Some(MissingParam::IssueKeyOrId));
        assert_eq!(connector.new_request_count(), 0);
    }
}

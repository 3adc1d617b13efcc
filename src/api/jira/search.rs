//
//  atlassian-client
//  api/jira/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Enhanced JQL search (`search/jql`) and JQL match checks (`jql/match`).
//!
//! Enhanced search pages with an opaque `nextPageToken` instead of a start
//! offset; pass [`IssueSearch::next_page_token`] back in
//! [`SearchOptions::next_page_token`] until it is `None`.

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{Issue, Version};
use crate::api::common::{ApiError, ApiResponse, MissingParam};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

/// Optional inputs of a JQL search, shared by [`SearchService::get`] and
/// [`SearchService::post`].
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub next_page_token: Option<String>,
    /// Always sent, even when zero.
    pub max_results: u32,
    pub fields: Vec<String>,
    pub expand: Vec<String>,
    pub properties: Vec<String>,
    pub fields_by_key: bool,
    pub fail_fast: bool,
    /// Issue ids whose latest state must be reflected in the results.
    pub reconcile_issues: Vec<u64>,
}

/// Request body of the POST search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    /// Never empty; `post` rejects an empty query first.
    jql: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page_token: Option<&'a str>,
    #[serde(skip_serializing_if = "is_zero")]
    max_results: u32,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    fields: &'a [String],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    expand: &'a [String],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    properties: &'a [String],
    #[serde(skip_serializing_if = "is_false")]
    fields_by_key: bool,
    #[serde(skip_serializing_if = "is_false")]
    fail_fast: bool,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    reconcile_issues: &'a [u64],
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One page of enhanced search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSearch {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub is_last: Option<bool>,
    /// Field names keyed by field id, present when `names` is expanded.
    #[serde(default)]
    pub names: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Request body of [`SearchService::checks`]: which of these issues match
/// which of these queries.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueMatchCheck {
    pub issue_ids: Vec<u64>,
    pub jqls: Vec<String>,
}

/// Per-query results of a match check, in the order of [`IssueMatchCheck::jqls`].
#[derive(Debug, Clone, Deserialize)]
pub struct IssueMatches {
    #[serde(default)]
    pub matches: Vec<IssueMatch>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueMatch {
    #[serde(default)]
    pub matched_issues: Vec<u64>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// JQL search operations of the Jira platform API.
#[derive(Debug, Clone)]
pub struct SearchService {
    core: ServiceCore,
    version: Version,
}

impl SearchService {
    pub(crate) fn new(core: ServiceCore, version: Version) -> Self {
        Self { core, version }
    }

    /// Checks which of the given issues match each JQL query.
    pub async fn checks(
        &self,
        ctx: &CallContext,
        payload: &IssueMatchCheck,
    ) -> Result<ApiResponse<IssueMatches>, ApiError> {
        self.core
            .operation(ctx, "search.checks", Method::POST)
            .endpoint(format!("rest/api/{}/jql/match", self.version.as_str()))
            .json(payload)
            .send()
            .await
    }

    /// Searches issues with JQL, sending the query in the URL.
    ///
    /// `jql`, `maxResults`, `fieldsByKey` and `failFast` are always sent; the
    /// list options are comma-joined and omitted when empty.
    ///
    /// # Errors
    ///
    /// [`MissingParam::Jql`] when `jql` is empty.
    pub async fn get(
        &self,
        ctx: &CallContext,
        jql: &str,
        options: &SearchOptions,
    ) -> Result<ApiResponse<IssueSearch>, ApiError> {
        self.core
            .operation(ctx, "search.get", Method::GET)
            .require(jql, MissingParam::Jql)
            .endpoint(format!("rest/api/{}/search/jql", self.version.as_str()))
            .query(
                Query::new()
                    .param("jql", jql)
                    .opt("nextPageToken", options.next_page_token.as_deref())
                    .param("maxResults", options.max_results)
                    .param("fieldsByKey", options.fields_by_key)
                    .param("failFast", options.fail_fast)
                    .list("expand", &options.expand)
                    .list("fields", &options.fields)
                    .list("properties", &options.properties)
                    .ids("reconcileIssues", &options.reconcile_issues),
            )
            .attribute(KeyValue::new("jql", jql.to_string()))
            .attribute(KeyValue::new(
                "pagination.limit",
                i64::from(options.max_results),
            ))
            .send()
            .await
    }

    /// Searches issues with JQL, sending the query in the request body.
    ///
    /// Use this over [`get`](Self::get) for queries too long for a URL. Zero
    /// and empty options are left out of the body.
    ///
    /// # Errors
    ///
    /// [`MissingParam::Jql`] when `jql` is empty.
    pub async fn post(
        &self,
        ctx: &CallContext,
        jql: &str,
        options: &SearchOptions,
    ) -> Result<ApiResponse<IssueSearch>, ApiError> {
        let body = SearchRequest {
            jql,
            next_page_token: options.next_page_token.as_deref(),
            max_results: options.max_results,
            fields: &options.fields,
            expand: &options.expand,
            properties: &options.properties,
            fields_by_key: options.fields_by_key,
            fail_fast: options.fail_fast,
            reconcile_issues: &options.reconcile_issues,
        };

        self.core
            .operation(ctx, "search.post", Method::POST)
            .require(jql, MissingParam::Jql)
            .endpoint(format!("rest/api/{}/search/jql", self.version.as_str()))
            .json(&body)
            .attribute(KeyValue::new("jql", jql.to_string()))
            .attribute(KeyValue::new(
                "pagination.limit",
                i64::from(options.max_results),
            ))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use opentelemetry::Value;
    use serde_json::json;

    use super::*;
    use crate::api::jira::Client;
    use crate::api::testing::{RecordingConnector, SpanCapture};

    const PAGE: &str = r#"{
        "issues": [{"id": "10001", "key": "ABC-1", "fields": {"summary": "First"}}],
        "nextPageToken": "CAEaAggD"
    }"#;

    #[tokio::test]
    async fn test_get_builds_query() {
        let connector = Arc::new(RecordingConnector::new().respond(200, PAGE));
        let capture = SpanCapture::new();
        let client = Client::new(connector.clone(), capture.telemetry(), Version::V3);

        let options = SearchOptions {
            max_results: 50,
            fields: vec!["summary".to_string(), "status".to_string()],
            reconcile_issues: vec![10001, 10002],
            ..Default::default()
        };
        let page = client
            .issue
            .search
            .get(&CallContext::new(), "project = ABC", &options)
            .await
            .unwrap()
            .into_data();

        assert_eq!(page.issues[0].key, "ABC-1");
        assert_eq!(page.next_page_token.as_deref(), Some("CAEaAggD"));
        assert_eq!(
            connector.single().path_and_query(),
            "/rest/api/3/search/jql?jql=project+%3D+ABC&maxResults=50&fieldsByKey=false\
             &failFast=false&fields=summary,status&reconcileIssues=10001,10002"
        );

        let spans = capture.finished();
        assert_eq!(spans[0].name, "jira.v3.search.get");
        assert_eq!(
            SpanCapture::attribute(&spans[0], "jql"),
            Some(Value::from("project = ABC"))
        );
    }

    #[tokio::test]
    async fn test_get_and_post_require_jql() {
        let connector = Arc::new(RecordingConnector::new());
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry(), Version::V3);
        let ctx = CallContext::new();

        let err = client
            .issue
            .search
            .get(&ctx, "", &SearchOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.missing_param(), Some(MissingParam::Jql));

        let err = client
            .issue
            .search
            .post(&ctx, "", &SearchOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.missing_param(), Some(MissingParam::Jql));

        assert_eq!(connector.new_request_count(), 0);
    }

    #[tokio::test]
    async fn test_post_omits_zero_values() {
        let connector = Arc::new(RecordingConnector::new().respond(200, PAGE));
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry(), Version::V2);

        let options = SearchOptions {
            next_page_token: Some("CAEaAggD".to_string()),
            expand: vec!["names".to_string()],
            fail_fast: true,
            ..Default::default()
        };
        client
            .issue
            .search
            .post(&CallContext::new(), "assignee = currentUser()", &options)
            .await
            .unwrap();

        assert_eq!(connector.single().url.path(), "/rest/api/2/search/jql");
        assert_eq!(
            connector.single_body(),
            json!({
                "jql": "assignee = currentUser()",
                "nextPageToken": "CAEaAggD",
                "expand": ["names"],
                "failFast": true
            })
        );
    }

    #[tokio::test]
    async fn test_checks() {
        let connector = Arc::new(RecordingConnector::new().respond(
            200,
            r#"{"matches": [{"matchedIssues": [10001], "errors": []}]}"#,
        ));
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry(), Version::V3);

        let payload = IssueMatchCheck {
            issue_ids: vec![10001, 10002],
            jqls: vec!["project = ABC".to_string()],
        };
        let matches = client
            .issue
            .search
            .checks(&CallContext::new(), &payload)
            .await
            .unwrap()
            .into_data();

        assert_eq!(matches.matches[0].matched_issues, vec![10001]);
        assert_eq!(
            connector.single_body(),
            json!({"issueIds": [10001, 10002], "jqls": ["project = ABC"]})
        );
    }
}

//
//  atlassian-client
//  api/sm/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use crate::api::common::{ApiError, ApiResponse, MissingParam};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

/// A customer request as seen through the service desk portal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub issue_id: String,
    pub issue_key: String,
    #[serde(default)]
    pub request_type_id: String,
    #[serde(default)]
    pub service_desk_id: String,
    #[serde(default)]
    pub created_date: Option<ServiceDeskDate>,
    #[serde(default)]
    pub reporter: Option<Customer>,
    #[serde(default)]
    pub request_field_values: Vec<RequestFieldValue>,
    #[serde(default)]
    pub current_status: Option<RequestStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDeskDate {
    pub iso8601: String,
    #[serde(default)]
    pub friendly: String,
    #[serde(default)]
    pub epoch_millis: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub account_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFieldValue {
    pub field_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatus {
    pub status: String,
    #[serde(default)]
    pub status_category: String,
    #[serde(default)]
    pub status_date: Option<ServiceDeskDate>,
}

/// Customer request operations.
#[derive(Debug, Clone)]
pub struct RequestService {
    core: ServiceCore,
}

impl RequestService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    /// Gets a customer request by issue key or id.
    pub async fn get(
        &self,
        ctx: &CallContext,
        issue_key_or_id: &str,
        expand: &[&str],
    ) -> Result<ApiResponse<CustomerRequest>, ApiError> {
        self.core
            .operation(ctx, "request.get", Method::GET)
            .require(issue_key_or_id, MissingParam::CustomerRequestKeyOrId)
            .endpoint(format!("rest/servicedeskapi/request/{}", issue_key_or_id))
            .query(Query::new().list("expand", expand))
            .attribute(KeyValue::new("issue.key", issue_key_or_id.to_string()))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::sm::Client;
    use crate::api::testing::{RecordingConnector, SpanCapture};

    #[tokio::test]
    async fn test_get_request() {
        let connector = Arc::new(RecordingConnector::new().respond(
            200,
            r#"{
                "issueId": "107001", "issueKey": "HELPDESK-1",
                "requestTypeId": "25", "serviceDeskId": "10",
                "reporter": {"accountId": "qm:a713c8ea", "displayName": "Fred F. User"},
                "requestFieldValues": [{"fieldId": "summary", "label": "What do you need?", "value": "Request JSD help"}],
                "currentStatus": {"status": "Waiting for Support", "statusCategory": "NEW"}
            }"#,
        ));
        let capture = SpanCapture::new();
        let client = Client::new(connector.clone(), capture.telemetry());

        let request = client
            .request
            .get(&CallContext::new(), "HELPDESK-1", &["participant", "status"])
            .await
            .unwrap()
            .into_data();

        assert_eq!(request.issue_key, "HELPDESK-1");
        assert_eq!(request.request_field_values[0].value, "Request JSD help");
        assert_eq!(
            connector.single().path_and_query(),
            "/rest/servicedeskapi/request/HELPDESK-1?expand=participant,status"
        );
        assert_eq!(capture.finished()[0].name, "jira.sm.request.get");
    }

    #[tokio::test]
    async fn test_get_requires_key() {
        let connector = Arc::new(RecordingConnector::new());
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let err = client
            .request
            .get(&CallContext::new(), "", &[])
            .await
            .unwrap_err();

        assert_eq!(err.missing_param(), Some(MissingParam::CustomerRequestKeyOrId));
        assert_eq!(connector.new_request_count(), 0);
    }
}

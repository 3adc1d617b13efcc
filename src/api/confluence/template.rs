//
//  atlassian-client
//  api/confluence/template.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content templates (page and blueprint templates).

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::BodyRepresentation;
use crate::api::common::{ApiError, ApiResponse, MissingParam};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;

/// Body of a template in one representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBody {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub storage: Option<BodyRepresentation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLabel {
    pub prefix: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpace {
    pub key: String,
}

/// Request body of [`TemplateService::create`].
///
/// Optional fields left empty are not sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplate {
    pub name: String,
    /// Always `page` for page templates.
    pub template_type: String,
    pub body: TemplateBody,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<TemplateLabel>,
    /// The space of a space template; global templates have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<TemplateSpace>,
}

/// Request body of [`TemplateService::update`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplate {
    pub template_id: String,
    pub name: String,
    pub template_type: String,
    pub body: TemplateBody,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<TemplateLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<TemplateSpace>,
}

/// A content template as returned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTemplate {
    pub template_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template_type: String,
    #[serde(default)]
    pub editor_version: Option<String>,
    #[serde(default)]
    pub labels: Vec<TemplateLabel>,
    #[serde(default)]
    pub space: Option<TemplateSpace>,
    #[serde(default)]
    pub body: Option<TemplateBody>,
}

/// Template operations of the Confluence v1 API.
#[derive(Debug, Clone)]
pub struct TemplateService {
    core: ServiceCore,
}

impl TemplateService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    /// Creates a page template, global or in a space.
    pub async fn create(
        &self,
        ctx: &CallContext,
        payload: &CreateTemplate,
    ) -> Result<ApiResponse<ContentTemplate>, ApiError> {
        self.core
            .operation(ctx, "template.create", Method::POST)
            .endpoint("wiki/rest/api/template")
            .json(payload)
            .send()
            .await
    }

    /// Updates a page template.
    pub async fn update(
        &self,
        ctx: &CallContext,
        payload: &UpdateTemplate,
    ) -> Result<ApiResponse<ContentTemplate>, ApiError> {
        self.core
            .operation(ctx, "template.update", Method::PUT)
            .require(&payload.template_id, MissingParam::TemplateId)
            .endpoint("wiki/rest/api/template")
            .json(payload)
            .attribute(KeyValue::new("template.id", payload.template_id.clone()))
            .send()
            .await
    }

    /// Gets a template by id.
    ///
    /// # Errors
    ///
    /// [`MissingParam::TemplateId`] when `template_id` is empty.
    pub async fn get(
        &self,
        ctx: &CallContext,
        template_id: &str,
    ) -> Result<ApiResponse<ContentTemplate>, ApiError> {
        self.core
            .operation(ctx, "template.get", Method::GET)
            .require(template_id, MissingParam::TemplateId)
            .endpoint(format!("wiki/rest/api/template/{}", template_id))
            .attribute(KeyValue::new("template.id", template_id.to_string()))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::api::confluence::Client;
    use crate::api::testing::{RecordingConnector, SpanCapture};

    const TEMPLATE: &str = r#"{
        "templateId": "98765",
        "name": "Incident review",
        "templateType": "page",
        "body": {"storage": {"value": "<h1>Timeline</h1>", "representation": "storage"}}
    }"#;

    #[tokio::test]
    async fn test_create_omits_empty_fields() {
        let connector = Arc::new(RecordingConnector::new().respond(200, TEMPLATE));
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let payload = CreateTemplate {
            name: "Incident review".to_string(),
            template_type: "page".to_string(),
            body: TemplateBody {
                storage: Some(BodyRepresentation::storage("<h1>Timeline</h1>")),
            },
            ..Default::default()
        };
        let template = client
            .template
            .create(&CallContext::new(), &payload)
            .await
            .unwrap()
            .into_data();

        assert_eq!(template.template_id, "98765");
        assert_eq!(connector.single().method, Method::POST);
        assert_eq!(
            connector.single_body(),
            json!({
                "name": "Incident review",
                "templateType": "page",
                "body": {"storage": {"value": "<h1>Timeline</h1>", "representation": "storage"}}
            })
        );
    }

    #[tokio::test]
    async fn test_update_sends_template_id() {
        let connector = Arc::new(RecordingConnector::new().respond(200, TEMPLATE));
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let payload = UpdateTemplate {
            template_id: "98765".to_string(),
            name: "Incident review".to_string(),
            template_type: "page".to_string(),
            description: "Post-incident template".to_string(),
            space: Some(TemplateSpace {
                key: "OPS".to_string(),
            }),
            ..Default::default()
        };
        client
            .template
            .update(&CallContext::new(), &payload)
            .await
            .unwrap();

        let body = connector.single_body();
        assert_eq!(connector.single().method, Method::PUT);
        assert_eq!(body["templateId"], "98765");
        assert_eq!(body["space"]["key"], "OPS");
        assert!(body.get("labels").is_none());
    }

    #[tokio::test]
    async fn test_get_requires_template_id() {
        let connector = Arc::new(RecordingConnector::new());
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let err = client
            .template
            .get(&CallContext::new(), "")
            .await
            .unwrap_err();

        assert_eq!(err.missing_param(), Some(MissingParam::TemplateId));
        assert_eq!(connector.new_request_count(), 0);
    }

    #[tokio::test]
    async fn test_get_template() {
        let connector = Arc::new(RecordingConnector::new().respond(200, TEMPLATE));
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let template = client
            .template
            .get(&CallContext::new(), "98765")
            .await
            .unwrap()
            .into_data();

        assert_eq!(template.name, "Incident review");
        assert_eq!(connector.single().url.path(), "/wiki/rest/api/template/98765");
    }
}

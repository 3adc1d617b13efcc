//
//  atlassian-client
//  api/assets/object.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use crate::api::common::{ApiError, ApiResponse, MissingParam, ResponseEnvelope};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    pub id: String,
    #[serde(default)]
    pub workspace_id: String,
    #[serde(default)]
    pub global_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub object_key: String,
    #[serde(default)]
    pub object_type: Option<ObjectType>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub has_avatar: bool,
    #[serde(default)]
    pub attributes: Vec<ObjectAttribute>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub object_schema_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAttribute {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object_type_attribute_id: String,
    #[serde(default)]
    pub object_attribute_values: Vec<ObjectAttributeValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAttributeValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub display_value: Option<String>,
}

/// Object operations of the Assets API.
#[derive(Debug, Clone)]
pub struct ObjectService {
    core: ServiceCore,
}

impl ObjectService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    pub async fn get(
        &self,
        ctx: &CallContext,
        workspace_id: &str,
        object_id: &str,
    ) -> Result<ApiResponse<Object>, ApiError> {
        self.core
            .operation(ctx, "object.get", Method::GET)
            .require(workspace_id, MissingParam::AssetsWorkspaceId)
            .require(object_id, MissingParam::AssetsObjectId)
            .endpoint(format!(
                "jsm/assets/workspace/{}/v1/object/{}",
                workspace_id, object_id
            ))
            .attribute(KeyValue::new("workspace.id", workspace_id.to_string()))
            .attribute(KeyValue::new("object.id", object_id.to_string()))
            .send()
            .await
    }

    pub async fn delete(
        &self,
        ctx: &CallContext,
        workspace_id: &str,
        object_id: &str,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.core
            .operation(ctx, "object.delete", Method::DELETE)
            .require(workspace_id, MissingParam::AssetsWorkspaceId)
            .require(object_id, MissingParam::AssetsObjectId)
            .endpoint(format!(
                "jsm/assets/workspace/{}/v1/object/{}",
                workspace_id, object_id
            ))
            .attribute(KeyValue::new("workspace.id", workspace_id.to_string()))
            .attribute(KeyValue::new("object.id", object_id.to_string()))
            .execute()
            .await
    }
}

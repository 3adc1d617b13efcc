//
//  atlassian-client
//  api/confluence/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use super::{BodyRepresentation, CommentService};
use crate::api::common::{ApiError, ApiResponse, MissingParam, ResponseEnvelope};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

/// A piece of Confluence content: page, blog post, comment or attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub space: Option<ContentSpace>,
    #[serde(default)]
    pub version: Option<ContentVersion>,
    #[serde(default)]
    pub body: Option<ContentBody>,
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentSpace {
    #[serde(default)]
    pub id: Option<u64>,
    pub key: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentVersion {
    pub number: u32,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "minorEdit", default)]
    pub minor_edit: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBody {
    #[serde(default)]
    pub storage: Option<BodyRepresentation>,
    #[serde(default)]
    pub view: Option<BodyRepresentation>,
}

/// An offset-paginated list of content, as returned by the child endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentPage {
    #[serde(default)]
    pub results: Vec<Content>,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub size: u32,
}

impl ContentPage {
    /// Whether the server filled the page, i.e. more results may follow.
    pub fn has_more(&self) -> bool {
        self.limit > 0 && self.size >= self.limit
    }
}

/// Content operations of the Confluence v1 API.
#[derive(Debug, Clone)]
pub struct ContentService {
    core: ServiceCore,
    /// Comments attached to a piece of content.
    pub comment: CommentService,
}

impl ContentService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self {
            comment: CommentService::new(core.clone()),
            core,
        }
    }

    /// Gets a piece of content.
    ///
    /// `version` selects a historical version; `0` means the current one.
    pub async fn get(
        &self,
        ctx: &CallContext,
        content_id: &str,
        expand: &[&str],
        version: u32,
    ) -> Result<ApiResponse<Content>, ApiError> {
        self.core
            .operation(ctx, "content.get", Method::GET)
            .require(content_id, MissingParam::ContentId)
            .endpoint(format!("wiki/rest/api/content/{}", content_id))
            .query(
                Query::new()
                    .list("expand", expand)
                    .nonzero("version", i64::from(version)),
            )
            .attribute(KeyValue::new("content.id", content_id.to_string()))
            .send()
            .await
    }

    /// Moves content to the trash, or purges it when `status` is `"trashed"`.
    pub async fn delete(
        &self,
        ctx: &CallContext,
        content_id: &str,
        status: &str,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.core
            .operation(ctx, "content.delete", Method::DELETE)
            .require(content_id, MissingParam::ContentId)
            .endpoint(format!("wiki/rest/api/content/{}", content_id))
            .query(Query::new().text("status", status))
            .attribute(KeyValue::new("content.id", content_id.to_string()))
            .execute()
            .await
    }
}

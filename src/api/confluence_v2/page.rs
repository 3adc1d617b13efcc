//
//  atlassian-client
//  api/confluence_v2/page.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use crate::api::common::{ApiError, ApiResponse, MissingParam};
use crate::api::confluence::BodyRepresentation;
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub space_id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub version: Option<PageVersion>,
    #[serde(default)]
    pub body: Option<PageBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    pub number: u32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub minor_edit: bool,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageBody {
    #[serde(default)]
    pub storage: Option<BodyRepresentation>,
    #[serde(default)]
    pub atlas_doc_format: Option<BodyRepresentation>,
}

/// A cursor page of pages.
#[derive(Debug, Clone, Deserialize)]
pub struct PageChunk {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(rename = "_links", default)]
    pub links: ChunkLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub base: Option<String>,
}

impl PageChunk {
    /// The `cursor` parameter of the next page, if there is one.
    pub fn next_cursor(&self) -> Option<String> {
        let next = self.links.next.as_deref()?;
        let (_, query) = next.split_once('?')?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "cursor")
            .map(|(_, value)| value.into_owned())
    }
}

/// Filters of [`PageService::gets`]. Empty fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    pub ids: Vec<u64>,
    pub space_ids: Vec<u64>,
    pub status: Vec<String>,
    pub title: String,
    /// `storage` or `atlas_doc_format`.
    pub body_format: String,
    pub sort: String,
}

/// Page operations of the Confluence v2 API.
#[derive(Debug, Clone)]
pub struct PageService {
    core: ServiceCore,
}

impl PageService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    /// Gets a page.
    ///
    /// `version` selects a historical version; `0` means the current one.
    pub async fn get(
        &self,
        ctx: &CallContext,
        page_id: u64,
        body_format: &str,
        draft: bool,
        version: u32,
    ) -> Result<ApiResponse<Page>, ApiError> {
        self.core
            .operation(ctx, "page.get", Method::GET)
            .require_id(page_id, MissingParam::PageId)
            .endpoint(format!("wiki/api/v2/pages/{}", page_id))
            .query(
                Query::new()
                    .text("body-format", body_format)
                    .opt("get-draft", draft.then_some(true))
                    .nonzero("version", i64::from(version)),
            )
            .attribute(KeyValue::new("page.id", page_id.to_string()))
            .send()
            .await
    }

    /// Lists pages matching `filter`, one cursor page at a time.
    pub async fn gets(
        &self,
        ctx: &CallContext,
        filter: &PageFilter,
        cursor: &str,
        limit: u32,
    ) -> Result<ApiResponse<PageChunk>, ApiError> {
        self.core
            .operation(ctx, "page.gets", Method::GET)
            .endpoint("wiki/api/v2/pages")
            .query(
                Query::new()
                    .ids("id", &filter.ids)
                    .ids("space-id", &filter.space_ids)
                    .list("status", &filter.status)
                    .text("title", &filter.title)
                    .text("body-format", &filter.body_format)
                    .text("sort", &filter.sort)
                    .text("cursor", cursor)
                    .param("limit", limit),
            )
            .attribute(KeyValue::new("pagination.limit", i64::from(limit)))
            .send()
            .await
    }
}

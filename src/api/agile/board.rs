//
//  atlassian-client
//  api/agile/board.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use crate::api::common::{ApiError, ApiResponse, MissingParam, OffsetPage};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// `scrum`, `kanban` or `simple`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub location: Option<BoardLocation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocation {
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Filters of [`BoardService::gets`]. Empty fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    pub kind: String,
    pub name: String,
    pub project_key_or_id: String,
}

/// Board operations of the Jira Software API.
#[derive(Debug, Clone)]
pub struct BoardService {
    core: ServiceCore,
}

impl BoardService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    pub async fn get(
        &self,
        ctx: &CallContext,
        board_id: u64,
    ) -> Result<ApiResponse<Board>, ApiError> {
        self.core
            .operation(ctx, "board.get", Method::GET)
            .require_id(board_id, MissingParam::BoardId)
            .endpoint(format!("rest/agile/1.0/board/{}", board_id))
            .attribute(KeyValue::new("board.id", board_id.to_string()))
            .send()
            .await
    }

    /// Lists the boards visible to the caller.
    pub async fn gets(
        &self,
        ctx: &CallContext,
        filter: &BoardFilter,
        start_at: u32,
        max_results: u32,
    ) -> Result<ApiResponse<OffsetPage<Board>>, ApiError> {
        self.core
            .operation(ctx, "board.gets", Method::GET)
            .endpoint("rest/agile/1.0/board")
            .query(
                Query::new()
                    .param("startAt", start_at)
                    .param("maxResults", max_results)
                    .text("type", &filter.kind)
                    .text("name", &filter.name)
                    .text("projectKeyOrId", &filter.project_key_or_id),
            )
            .attribute(KeyValue::new("pagination.start", i64::from(start_at)))
            .attribute(KeyValue::new("pagination.limit", i64::from(max_results)))
            .send()
            .await
    }
}

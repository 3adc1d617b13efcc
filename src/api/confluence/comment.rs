//
//  atlassian-client
//  api/confluence/comment.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;

use super::ContentPage;
use crate::api::common::{ApiError, ApiResponse, MissingParam};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

/// Comments on Confluence content.
#[derive(Debug, Clone)]
pub struct CommentService {
    core: ServiceCore,
}

impl CommentService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    /// Lists the comments of a piece of content.
    ///
    /// `start` and `limit` are always sent. `location` filters by comment
    /// location (`inline`, `footer`, `resolved`); `expand` and `location` are
    /// omitted when empty.
    ///
    /// # Errors
    ///
    /// [`MissingParam::ContentId`] when `content_id` is empty.
    pub async fn gets(
        &self,
        ctx: &CallContext,
        content_id: &str,
        expand: &[&str],
        location: &[&str],
        start: u32,
        limit: u32,
    ) -> Result<ApiResponse<ContentPage>, ApiError> {
        self.core
            .operation(ctx, "content.comment.gets", Method::GET)
            .require(content_id, MissingParam::ContentId)
            .endpoint(format!("wiki/rest/api/content/{}/child/comment", content_id))
            .query(
                Query::new()
                    .param("start", start)
                    .param("limit", limit)
                    .list("expand", expand)
                    .list("location", location),
            )
            .attribute(KeyValue::new("content.id", content_id.to_string()))
            .attribute(KeyValue::new("pagination.start", i64::from(start)))
            .attribute(KeyValue::new("pagination.limit", i64::from(limit)))
            .send()
            .await
    }
}

//
//  atlassian-client
//  api/sm/service_desk.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use crate::api::common::{ApiError, ApiResponse, OffsetPage};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDesk {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub project_key: String,
}

/// Service desk operations.
#[derive(Debug, Clone)]
pub struct ServiceDeskService {
    core: ServiceCore,
}

impl ServiceDeskService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    /// Lists the service desks the caller is an agent or customer of.
    pub async fn gets(
        &self,
        ctx: &CallContext,
        start: u32,
        limit: u32,
    ) -> Result<ApiResponse<OffsetPage<ServiceDesk>>, ApiError> {
        self.core
            .operation(ctx, "service_desk.gets", Method::GET)
            .endpoint("rest/servicedeskapi/servicedesk")
            .query(Query::new().param("start", start).param("limit", limit))
            .attribute(KeyValue::new("pagination.start", i64::from(start)))
            .attribute(KeyValue::new("pagination.limit", i64::from(limit)))
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
    async fn test_gets_service_desks() {
        let connector = Arc::new(RecordingConnector::new().respond(
            200,
            r#"{"size": 1, "start": 0, "limit": 50, "isLastPage": true,
                "values": [{"id": "10", "projectId": "11001", "projectName": "IT Help", "projectKey": "IT"}]}"#,
        ));
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let page = client
            .service_desk
            .gets(&CallContext::new(), 0, 50)
            .await
            .unwrap()
            .into_data();

        assert_eq!(page.values[0].project_key, "IT");
        assert!(!page.has_next());
        assert_eq!(
            connector.single().path_and_query(),
            "/rest/servicedeskapi/servicedesk?start=0&limit=50"
        );
    }
}

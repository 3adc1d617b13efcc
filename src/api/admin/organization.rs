//
//  atlassian-client
//  api/admin/organization.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organizations, managed users and verified domains.

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use super::{DirectoryService, PageLinks};
use crate::api::common::{ApiError, ApiResponse, MissingParam};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

/// A single Admin resource wrapped in `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

/// A cursor-paginated Admin collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub links: PageLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub attributes: OrganizationAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationAttributes {
    #[serde(default)]
    pub name: String,
}

/// A managed account in an organization.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationUser {
    pub account_id: String,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub account_status: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub access_billable: bool,
    #[serde(default)]
    pub last_active: Option<String>,
    #[serde(default)]
    pub product_access: Vec<ProductAccess>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductAccess {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub last_active: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub attributes: DomainAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub claim: Option<DomainClaim>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainClaim {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
}

/// Organization level operations of the Admin API.
#[derive(Debug, Clone)]
pub struct OrganizationService {
    core: ServiceCore,
    /// Directory operations on the organization's managed users.
    pub directory: DirectoryService,
}

impl OrganizationService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self {
            directory: DirectoryService::new(core.clone()),
            core,
        }
    }

    /// Lists the organizations the API key has access to.
    ///
    /// `cursor` comes from [`PageLinks::next_cursor`] of a previous page.
    pub async fn gets(
        &self,
        ctx: &CallContext,
        cursor: &str,
    ) -> Result<ApiResponse<Collection<Organization>>, ApiError> {
        self.core
            .operation(ctx, "organization.gets", Method::GET)
            .endpoint("admin/v1/orgs")
            .query(Query::new().text("cursor", cursor))
            .send()
            .await
    }

    /// Gets one organization.
    pub async fn get(
        &self,
        ctx: &CallContext,
        organization_id: &str,
    ) -> Result<ApiResponse<Document<Organization>>, ApiError> {
        self.core
            .operation(ctx, "organization.get", Method::GET)
            .require(organization_id, MissingParam::AdminOrganization)
            .endpoint(format!("admin/v1/orgs/{}", organization_id))
            .attribute(KeyValue::new("organization.id", organization_id.to_string()))
            .send()
            .await
    }

    /// Lists the managed accounts of an organization.
    pub async fn users(
        &self,
        ctx: &CallContext,
        organization_id: &str,
        cursor: &str,
    ) -> Result<ApiResponse<Collection<OrganizationUser>>, ApiError> {
        self.core
            .operation(ctx, "organization.users", Method::GET)
            .require(organization_id, MissingParam::AdminOrganization)
            .endpoint(format!("admin/v1/orgs/{}/users", organization_id))
            .query(Query::new().text("cursor", cursor))
            .attribute(KeyValue::new("organization.id", organization_id.to_string()))
            .send()
            .await
    }

    /// Lists the verified domains of an organization.
    pub async fn domains(
        &self,
        ctx: &CallContext,
        organization_id: &str,
        cursor: &str,
    ) -> Result<ApiResponse<Collection<Domain>>, ApiError> {
        self.core
            .operation(ctx, "organization.domains", Method::GET)
            .require(organization_id, MissingParam::AdminOrganization)
            .endpoint(format!("admin/v1/orgs/{}/domains", organization_id))
            .query(Query::new().text("cursor", cursor))
            .attribute(KeyValue::new("organization.id", organization_id.to_string()))
            .send()
            .await
    }

    /// Gets one verified domain.
    pub async fn domain(
        &self,
        ctx: &CallContext,
        organization_id: &str,
        domain_id: &str,
    ) -> Result<ApiResponse<Document<Domain>>, ApiError> {
        self.core
            .operation(ctx, "organization.domain", Method::GET)
            .require(organization_id, MissingParam::AdminOrganization)
            .require(domain_id, MissingParam::AdminDomainId)
            .endpoint(format!(
                "admin/v1/orgs/{}/domains/{}",
                organization_id, domain_id
            ))
            .attribute(KeyValue::new("organization.id", organization_id.to_string()))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::admin::Client;
    use crate::api::common::MissingParam;
    use crate::api::context::CallContext;
    use crate::api::testing::{RecordingConnector, SpanCapture};

    #[tokio::test]
    async fn test_gets_decodes_page() {
        let connector = Arc::new(RecordingConnector::new().respond(
            200,
            r#"{
                "data": [{"id": "org-1", "type": "orgs", "attributes": {"name": "Acme"}}],
                "links": {"self": "https://api.atlassian.com/admin/v1/orgs",
                          "next": "https://api.atlassian.com/admin/v1/orgs?cursor=page2"}
            }"#,
        ));
        let capture = SpanCapture::new();
        let client = Client::new(connector.clone(), capture.telemetry());

        let page = client
            .organization
            .gets(&CallContext::new(), "")
            .await
            .unwrap()
            .into_data();

        assert_eq!(page.data[0].attributes.name, "Acme");
        assert_eq!(page.links.next_cursor().as_deref(), Some("page2"));
        assert_eq!(connector.single().path_and_query(), "/admin/v1/orgs");
        assert_eq!(capture.finished()[0].name, "admin.organization.gets");
    }

    #[tokio::test]
    async fn test_users_sends_cursor() {
        let connector = Arc::new(RecordingConnector::new().respond(
            200,
            r#"{"data": [{
                "account_id": "5b10ac8d82e05b22cc7d4ef5",
                "account_status": "active",
                "name": "Dev",
                "product_access": [{"key": "jira-software", "name": "Jira Software"}]
            }]}"#,
        ));
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let users = client
            .organization
            .users(&CallContext::new(), "org-1", "abc")
            .await
            .unwrap()
            .into_data();

        assert_eq!(users.data[0].account_id, "5b10ac8d82e05b22cc7d4ef5");
        assert_eq!(users.data[0].product_access[0].key, "jira-software");
        assert!(users.links.next_cursor().is_none());
        assert_eq!(
            connector.single().path_and_query(),
            "/admin/v1/orgs/org-1/users?cursor=abc"
        );
    }

    #[tokio::test]
    async fn test_domains_decodes_claims() {
        let connector = Arc::new(RecordingConnector::new().respond(
            200,
            r#"{"data": [{"id": "d-1", "type": "domains",
                          "attributes": {"name": "acme.com",
                                         "claim": {"type": "dns", "status": "VERIFIED"}}}]}"#,
        ));
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());

        let domains = client
            .organization
            .domains(&CallContext::new(), "org-1", "")
            .await
            .unwrap()
            .into_data();

        assert_eq!(domains.data[0].attributes.name, "acme.com");
        assert_eq!(domains.data[0].attributes.claim.as_ref().unwrap().status, "VERIFIED");
        assert_eq!(connector.single().path_and_query(), "/admin/v1/orgs/org-1/domains");
    }

    #[tokio::test]
    async fn test_domains_without_data_is_empty() {
        let connector = Arc::new(RecordingConnector::new().respond(200, r#"{"links": {}}"#));
        let client = Client::new(connector, SpanCapture::new().telemetry());

        let domains = client
            .organization
            .domains(&CallContext::new(), "org-1", "")
            .await
            .unwrap()
            .into_data();

        assert!(domains.data.is_empty());
    }

    #[tokio::test]
    async fn test_domain_requires_both_ids() {
        let connector = Arc::new(RecordingConnector::new());
        let client = Client::new(connector.clone(), SpanCapture::new().telemetry());
        let ctx = CallContext::new();

        let err = client.organization.domain(&ctx, "", "").await.unwrap_err();
        assert_eq!(err.missing_param(), Some(MissingParam::AdminOrganization));

        let err = client.organization.domain(&ctx, "org-1", "").await.unwrap_err();
        assert_eq!(err.missing_param(), Some(MissingParam::AdminDomainId));

        assert_eq!(connector.new_request_count(), 0);
    }
}

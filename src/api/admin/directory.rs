//
//  atlassian-client
//  api/admin/directory.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization directory: last-active dates, removal, suspension and
//! restoration of managed accounts.

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::Deserialize;

use crate::api::common::{ApiError, ApiResponse, MissingParam, ResponseEnvelope};
use crate::api::context::CallContext;
use crate::api::operation::{Operation, ServiceCore};

/// Last-active dates of an account per product.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProductAccess {
    pub data: UserProductAccessData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProductAccessData {
    #[serde(default)]
    pub product_access: Vec<ProductLastActive>,
    #[serde(default)]
    pub added_to_org: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductLastActive {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub last_active: Option<String>,
}

/// Acknowledgement returned by directory actions.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionSuccess {
    #[serde(default)]
    pub message: String,
}

/// Directory operations on the managed accounts of an organization.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    core: ServiceCore,
}

impl DirectoryService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    /// Opens an operation scoped to one account of one organization.
    fn account<'a>(
        &'a self,
        ctx: &'a CallContext,
        name: &'static str,
        method: Method,
        organization_id: &str,
        account_id: &str,
        endpoint: String,
    ) -> Operation<'a> {
        self.core
            .operation(ctx, name, method)
            .require(organization_id, MissingParam::AdminOrganization)
            .require(account_id, MissingParam::AdminAccountId)
            .endpoint(endpoint)
            .attribute(KeyValue::new("organization.id", organization_id.to_string()))
            .attribute(KeyValue::new("account.id", account_id.to_string()))
    }

    /// Returns the last-active dates of an account for each product it can access.
    ///
    /// # Errors
    ///
    /// [`MissingParam::AdminOrganization`] or [`MissingParam::AdminAccountId`]
    /// when an identifier is empty, checked in that order.
    pub async fn activity(
        &self,
        ctx: &CallContext,
        organization_id: &str,
        account_id: &str,
    ) -> Result<ApiResponse<UserProductAccess>, ApiError> {
        self.account(
            ctx,
            "organization.directory.activity",
            Method::GET,
            organization_id,
            account_id,
            format!(
                "admin/v1/orgs/{}/directory/users/{}/last-active-dates",
                organization_id, account_id
            ),
        )
        .send()
        .await
    }

    /// Removes an account from the organization directory.
    pub async fn remove(
        &self,
        ctx: &CallContext,
        organization_id: &str,
        account_id: &str,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.account(
            ctx,
            "organization.directory.remove",
            Method::DELETE,
            organization_id,
            account_id,
            format!(
                "admin/v1/orgs/{}/directory/users/{}",
                organization_id, account_id
            ),
        )
        .execute()
        .await
    }

    /// Suspends an account's access to every product in the organization.
    pub async fn suspend(
        &self,
        ctx: &CallContext,
        organization_id: &str,
        account_id: &str,
    ) -> Result<ApiResponse<ActionSuccess>, ApiError> {
        self.account(
            ctx,
            "organization.directory.suspend",
            Method::POST,
            organization_id,
            account_id,
            format!(
                "admin/v1/orgs/{}/directory/users/{}/suspend-access",
                organization_id, account_id
            ),
        )
        .send()
        .await
    }

    /// Restores a suspended account's access.
    pub async fn restore(
        &self,
        ctx: &CallContext,
        organization_id: &str,
        account_id: &str,
    ) -> Result<ApiResponse<ActionSuccess>, ApiError> {
        self.account(
            ctx,
            "organization.directory.restore",
            Method::POST,
            organization_id,
            account_id,
            format!(
                "admin/v1/orgs/{}/directory/users/{}/restore-access",
                organization_id, account_id
            ),
        )
        .send()
        .await
    }
}

//
//  atlassian-client
//  api/bitbucket/repository.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use opentelemetry::KeyValue;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResponse, CursorPage, MissingParam};
use crate::api::context::CallContext;
use crate::api::operation::ServiceCore;
use crate::api::query::Query;

/// A repository in a workspace.
///
/// ```rust,no_run
/// use atlassian_client::api::bitbucket::Repository;
///
/// fn display_repo(repo: &Repository) {
///     println!("Repository: {}", repo.full_name);
///     println!("  Private: {}", repo.is_private);
///     if let Some(ref lang) = repo.language {
///         println!("  Language: {}", lang);
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub uuid: String,

    pub name: String,

    /// Full path in format `{workspace_slug}/{repo_slug}`.
    pub full_name: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_private: bool,

    /// Primary programming language, as set by the owner.
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub mainbranch: Option<Branch>,

    #[serde(default)]
    pub workspace: Option<WorkspaceRef>,

    #[serde(default)]
    pub project: Option<ProjectRef>,

    #[serde(default)]
    pub created_on: Option<String>,

    #[serde(default)]
    pub updated_on: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,

    /// Usually `branch` or `named_branch`.
    #[serde(rename = "type", default)]
    pub branch_type: Option<String>,
}

/// A lightweight reference to a workspace, embedded in other resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub uuid: String,
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A lightweight reference to a project within a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub uuid: String,

    /// Short alphanumeric key, typically uppercase.
    pub key: String,

    pub name: String,
}

/// Filters of [`RepositoryService::gets`]. Empty fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct RepositoryFilter {
    /// `member`, `contributor`, `admin` or `owner`.
    pub role: String,
    /// Bitbucket query language, e.g. `project.key="BACKEND"`.
    pub q: String,
    /// Field to sort by, `-` prefixed for descending.
    pub sort: String,
}

/// Repository operations of the Bitbucket API.
#[derive(Debug, Clone)]
pub struct RepositoryService {
    core: ServiceCore,
}

impl RepositoryService {
    pub(crate) fn new(core: ServiceCore) -> Self {
        Self { core }
    }

    pub async fn get(
        &self,
        ctx: &CallContext,
        workspace: &str,
        repo_slug: &str,
    ) -> Result<ApiResponse<Repository>, ApiError> {
        self.core
            .operation(ctx, "repository.get", Method::GET)
            .require(workspace, MissingParam::BitbucketWorkspace)
            .require(repo_slug, MissingParam::BitbucketRepository)
            .endpoint(format!("repositories/{}/{}", workspace, repo_slug))
            .attribute(KeyValue::new("workspace", workspace.to_string()))
            .attribute(KeyValue::new("repository", repo_slug.to_string()))
            .send()
            .await
    }

    /// Lists the repositories of a workspace, one page at a time.
    ///
    /// `page` is 1-based; follow [`CursorPage::next_url`] or increment it.
    pub async fn gets(
        &self,
        ctx: &CallContext,
        workspace: &str,
        filter: &RepositoryFilter,
        page: u32,
        pagelen: u32,
    ) -> Result<ApiResponse<CursorPage<Repository>>, ApiError> {
        self.core
            .operation(ctx, "repository.gets", Method::GET)
            .require(workspace, MissingParam::BitbucketWorkspace)
            .endpoint(format!("repositories/{}", workspace))
            .query(
                Query::new()
                    .param("page", page)
                    .param("pagelen", pagelen)
                    .text("role", &filter.role)
                    .text("q", &filter.q)
                    .text("sort", &filter.sort),
            )
            .attribute(KeyValue::new("workspace", workspace.to_string()))
            .attribute(KeyValue::new("pagination.start", i64::from(page)))
            .attribute(KeyValue::new("pagination.limit", i64::from(pagelen)))
            .send()
            .await
    }
}

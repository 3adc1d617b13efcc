//
//  atlassian-client
//  api/jira/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Jira Platform REST API (v2 and v3)
//!
//! Both versions share endpoints and schemas; v3 returns rich text fields as
//! Atlassian Document Format instead of wiki markup. Pick the version when
//! building the [`Client`]; each version reports to its own tracer
//! ([`v2::TRACER_NAME`], [`v3::TRACER_NAME`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use atlassian_client::api::jira::{self, SearchOptions, Version};
//! use atlassian_client::api::{CallContext, HttpConnector, Telemetry};
//!
//! # async fn example() -> Result<(), atlassian_client::api::ApiError> {
//! let connector = Arc::new(HttpConnector::new("https://acme.atlassian.net")?);
//! let client = jira::Client::new(connector, Telemetry::global(), Version::V3);
//!
//! let options = SearchOptions {
//!     fields: vec!["summary".to_string(), "status".to_string()],
//!     max_results: 50,
//!     ..Default::default()
//! };
//! let page = client
//!     .issue
//!     .search
//!     .get(&CallContext::new(), "project = ABC ORDER BY created DESC", &options)
//!     .await?;
//! for issue in &page.data.issues {
//!     println!("{} {}", issue.key, issue.fields.summary);
//! }
//! # Ok(())
//! # }
//! ```

mod issue;
mod search;

pub use issue::*;
pub use search::*;

use std::sync::Arc;

use super::client::Connector;
use super::operation::ServiceCore;
use super::telemetry::{Module, Telemetry};

/// Tracing surface of the v2 API.
pub mod v2 {
    use crate::api::telemetry::{module_tracing, Module};

    module_tracing!(Module::JiraV2);
}

/// Tracing surface of the v3 API.
pub mod v3 {
    use crate::api::telemetry::{module_tracing, Module};

    module_tracing!(Module::JiraV3);
}

/// Jira platform API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    V2,
    #[default]
    V3,
}

impl Version {
    /// The version segment of `rest/api/<version>/...` endpoints.
    pub const fn as_str(self) -> &'static str {
        match self {
            Version::V2 => "2",
            Version::V3 => "3",
        }
    }

    pub const fn module(self) -> Module {
        match self {
            Version::V2 => Module::JiraV2,
            Version::V3 => Module::JiraV3,
        }
    }
}

/// Entry point to the Jira platform services.
#[derive(Debug, Clone)]
pub struct Client {
    pub issue: IssueService,
}

impl Client {
    pub fn new(connector: Arc<dyn Connector>, telemetry: Telemetry, version: Version) -> Self {
        let core = ServiceCore::new(connector, telemetry, version.module());
        Self {
            issue: IssueService::new(core, version),
        }
    }
}

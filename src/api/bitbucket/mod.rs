//
//  atlassian-client
//  api/bitbucket/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud REST API 2.0
//!
//! Workspaces and repositories on `api.bitbucket.org/2.0`. Build the
//! connector with [`HttpConnector::bitbucket`](crate::api::HttpConnector::bitbucket).
//!
//! # Workspace Hierarchy
//!
//! ```text
//! Workspace
//! ├── Projects (optional grouping)
//! │   └── Repositories
//! └── Repositories (not in projects)
//! ```

mod repository;
mod workspace;

pub use repository::*;
pub use workspace::*;

use std::sync::Arc;

use super::client::Connector;
use super::operation::ServiceCore;
use super::telemetry::{module_tracing, Module, Telemetry};

module_tracing!(Module::Bitbucket);

/// Entry point to the Bitbucket services.
#[derive(Debug, Clone)]
pub struct Client {
    pub workspace: WorkspaceService,
    pub repository: RepositoryService,
}

impl Client {
    pub fn new(connector: Arc<dyn Connector>, telemetry: Telemetry) -> Self {
        let core = ServiceCore::new(connector, telemetry, Module::Bitbucket);
        Self {
            workspace: WorkspaceService::new(core.clone()),
            repository: RepositoryService::new(core),
        }
    }
}

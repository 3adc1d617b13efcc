//
//  atlassian-client
//  api/confluence_v2/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence REST API v2
//!
//! Page-centric endpoints under `wiki/api/v2`, paginated with opaque cursors.

mod page;

pub use page::*;

use std::sync::Arc;

use super::client::Connector;
use super::operation::ServiceCore;
use super::telemetry::{module_tracing, Module, Telemetry};

module_tracing!(Module::ConfluenceV2);

/// Entry point to the Confluence v2 services.
#[derive(Debug, Clone)]
pub struct Client {
    pub page: PageService,
}

impl Client {
    pub fn new(connector: Arc<dyn Connector>, telemetry: Telemetry) -> Self {
        Self {
            page: PageService::new(ServiceCore::new(connector, telemetry, Module::ConfluenceV2)),
        }
    }
}

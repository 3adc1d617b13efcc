//
//  atlassian-client
//  api/confluence/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence REST API (v1)
//!
//! Content, content comments and templates under `wiki/rest/api` on a site.
//! The page-centric v2 API lives in [`confluence_v2`](crate::api::confluence_v2).

mod comment;
mod content;
mod template;

pub use comment::*;
pub use content::*;
pub use template::*;

use std::sync::Arc;

use super::client::Connector;
use super::operation::ServiceCore;
use super::telemetry::{module_tracing, Module, Telemetry};

module_tracing!(Module::Confluence);

/// Entry point to the Confluence v1 services.
#[derive(Debug, Clone)]
pub struct Client {
    pub content: ContentService,
    pub template: TemplateService,
}

impl Client {
    pub fn new(connector: Arc<dyn Connector>, telemetry: Telemetry) -> Self {
        let core = ServiceCore::new(connector, telemetry, Module::Confluence);
        Self {
            content: ContentService::new(core.clone()),
            template: TemplateService::new(core),
        }
    }
}

/// A `{"value": .., "representation": ..}` body, e.g. storage format XHTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BodyRepresentation {
    pub value: String,
    pub representation: String,
}

impl BodyRepresentation {
    /// A body in Confluence storage format.
    pub fn storage(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            representation: "storage".to_string(),
        }
    }
}

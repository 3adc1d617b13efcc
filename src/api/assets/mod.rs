//
//  atlassian-client
//  api/assets/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Assets REST API
//!
//! Objects of an Assets (formerly Insight) workspace, served from
//! `api.atlassian.com/jsm/assets/workspace/<workspace id>/v1`. Use
//! [`HttpConnector::assets`](crate::api::HttpConnector::assets) with the
//! site's API token credential.

mod object;

pub use object::*;

use std::sync::Arc;

use super::client::Connector;
use super::operation::ServiceCore;
use super::telemetry::{module_tracing, Module, Telemetry};

module_tracing!(Module::Assets);

/// Entry point to the Assets services.
#[derive(Debug, Clone)]
pub struct Client {
    pub object: ObjectService,
}

impl Client {
    pub fn new(connector: Arc<dyn Connector>, telemetry: Telemetry) -> Self {
        Self {
            object: ObjectService::new(ServiceCore::new(connector, telemetry, Module::Assets)),
        }
    }
}

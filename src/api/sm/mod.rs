//
//  atlassian-client
//  api/sm/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Jira Service Management REST API
//!
//! Customer requests and service desks under `rest/servicedeskapi`.

mod request;
mod service_desk;

pub use request::*;
pub use service_desk::*;

use std::sync::Arc;

use super::client::Connector;
use super::operation::ServiceCore;
use super::telemetry::{module_tracing, Module, Telemetry};

module_tracing!(Module::JiraSm);

/// Entry point to the Service Management services.
#[derive(Debug, Clone)]
pub struct Client {
    pub request: RequestService,
    pub service_desk: ServiceDeskService,
}

impl Client {
    pub fn new(connector: Arc<dyn Connector>, telemetry: Telemetry) -> Self {
        let core = ServiceCore::new(connector, telemetry, Module::JiraSm);
        Self {
            request: RequestService::new(core.clone()),
            service_desk: ServiceDeskService::new(core),
        }
    }
}

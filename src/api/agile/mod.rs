//
//  atlassian-client
//  api/agile/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Jira Software (Agile) REST API
//!
//! Boards under `rest/agile/1.0`, paginated by offset
//! ([`OffsetPage`](crate::api::common::OffsetPage)).

mod board;

pub use board::*;

use std::sync::Arc;

use super::client::Connector;
use super::operation::ServiceCore;
use super::telemetry::{module_tracing, Module, Telemetry};

module_tracing!(Module::JiraAgile);

/// Entry point to the Jira Software services.
#[derive(Debug, Clone)]
pub struct Client {
    pub board: BoardService,
}

impl Client {
    pub fn new(connector: Arc<dyn Connector>, telemetry: Telemetry) -> Self {
        Self {
            board: BoardService::new(ServiceCore::new(connector, telemetry, Module::JiraAgile)),
        }
    }
}

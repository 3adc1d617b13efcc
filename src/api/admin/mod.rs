//
//  atlassian-client
//  api/admin/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Atlassian Admin API
//!
//! Organization administration on `api.atlassian.com`, authenticated with an
//! organization API key ([`AuthCredential::bearer`](crate::auth::AuthCredential::bearer)).
//!
//! ## Services
//!
//! - [`OrganizationService`]: organizations, their managed users and domains
//! - [`DirectoryService`]: user lifecycle inside an organization directory,
//!   reached through `client.organization.directory`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use atlassian_client::api::{admin, CallContext, HttpConnector, Telemetry};
//! use atlassian_client::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), atlassian_client::api::ApiError> {
//! let connector = HttpConnector::admin()?.with_auth(AuthCredential::bearer("admin-key"));
//! let client = admin::Client::new(Arc::new(connector), Telemetry::global());
//!
//! let ctx = CallContext::new();
//! let activity = client
//!     .organization
//!     .directory
//!     .activity(&ctx, "9a1jj823-jac8-123d-jj01-63315k059cb2", "5b10a2844c20165700ede21g")
//!     .await?;
//! println!("{:?}", activity.data);
//! # Ok(())
//! # }
//! ```

mod directory;
mod organization;

pub use directory::*;
pub use organization::*;

use std::sync::Arc;

use super::client::Connector;
use super::operation::ServiceCore;
use super::telemetry::{module_tracing, Module, Telemetry};

module_tracing!(Module::Admin);

/// Entry point to the Admin API services.
#[derive(Debug, Clone)]
pub struct Client {
    pub organization: OrganizationService,
}

impl Client {
    pub fn new(connector: Arc<dyn Connector>, telemetry: Telemetry) -> Self {
        let core = ServiceCore::new(connector, telemetry, Module::Admin);
        Self {
            organization: OrganizationService::new(core),
        }
    }
}

/// Links block returned next to cursor-paginated Admin collections.
///
/// `next` is the URL of the next page; the cursor to pass back is its
/// `cursor` query parameter.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PageLinks {
    #[serde(default, rename = "self")]
    pub this: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

impl PageLinks {
    /// The `cursor` parameter of the next page link, if there is one.
    pub fn next_cursor(&self) -> Option<String> {
        let next = url::Url::parse(self.next.as_deref()?).ok()?;
        next.query_pairs()
            .find(|(key, _)| key == "cursor")
            .map(|(_, value)| value.into_owned())
    }
}

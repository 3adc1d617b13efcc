//
//  atlassian-client
//  cli/admin.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization administration commands

use anyhow::Result;
use clap::Args;

use crate::api::admin::{self, UserProductAccess};
use crate::api::{CallContext, Telemetry};
use crate::config::Config;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ActivityCommand {
    /// Organization ID
    pub organization: String,

    /// Account ID of the managed user
    pub account: String,
}

impl ActivityCommand {
    pub async fn run(
        &self,
        global: &GlobalOptions,
        config: &Config,
        ctx: &CallContext,
        telemetry: &Telemetry,
    ) -> Result<()> {
        let client = admin::Client::new(global.admin_connector(config)?, telemetry.clone());
        let response = client
            .organization
            .directory
            .activity(ctx, &self.organization, &self.account)
            .await?;

        let (data, envelope) = response.into_parts();
        if global.json {
            println!("{}", envelope.text());
            return Ok(());
        }

        for line in render_activity(&data) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn render_activity(access: &UserProductAccess) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(added) = &access.data.added_to_org {
        lines.push(format!("Added to organization: {}", added));
    }
    if access.data.product_access.is_empty() {
        lines.push("No product activity".to_string());
    }
    for product in &access.data.product_access {
        lines.push(format!(
            "{:<24} {:<16} {}",
            product.name,
            product.key,
            product.last_active.as_deref().unwrap_or("never")
        ));
    }
    lines
}

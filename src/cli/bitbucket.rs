//
//  atlassian-client
//  cli/bitbucket.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud commands

use anyhow::Result;
use clap::Args;

use crate::api::bitbucket::{self, Repository, RepositoryFilter};
use crate::api::common::CursorPage;
use crate::api::{CallContext, Telemetry};
use crate::config::Config;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ReposCommand {
    /// Workspace slug
    pub workspace: String,

    /// Filter with Bitbucket query language, e.g. project.key="BACKEND"
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    #[arg(long, value_parser = ["member", "contributor", "admin", "owner"])]
    pub role: Option<String>,

    #[arg(long, default_value = "1")]
    pub page: u32,

    #[arg(long, short = 'l', default_value = "25")]
    pub limit: u32,
}

impl ReposCommand {
    pub async fn run(
        &self,
        global: &GlobalOptions,
        config: &Config,
        ctx: &CallContext,
        telemetry: &Telemetry,
    ) -> Result<()> {
        let client = bitbucket::Client::new(global.bitbucket_connector(config)?, telemetry.clone());
        let filter = RepositoryFilter {
            role: self.role.clone().unwrap_or_default(),
            q: self.query.clone().unwrap_or_default(),
            sort: "-updated_on".to_string(),
        };

        let response = client
            .repository
            .gets(ctx, &self.workspace, &filter, self.page, self.limit)
            .await?;

        let (data, envelope) = response.into_parts();
        if global.json {
            println!("{}", envelope.text());
            return Ok(());
        }

        for line in render_repositories(&data, self.page) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn render_repositories(page: &CursorPage<Repository>, current: u32) -> Vec<String> {
    if page.values.is_empty() {
        return vec!["No repositories".to_string()];
    }

    let mut lines: Vec<String> = page
        .values
        .iter()
        .map(|repo| {
            let visibility = if repo.is_private { "private" } else { "public" };
            format!(
                "{:<40} {:<8} {}",
                repo.full_name,
                visibility,
                repo.language.as_deref().unwrap_or("")
            )
        })
        .collect();
    if page.has_next() {
        lines.push(format!("More repositories; use --page {}", current + 1));
    }
    lines
}

//
//  atlassian-client
//  cli/jira.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira commands

use anyhow::Result;
use clap::Args;

use crate::api::jira::{self, IssueSearch, SearchOptions, Version};
use crate::api::{CallContext, Telemetry};
use crate::config::Config;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct SearchCommand {
    /// JQL query, e.g. "project = ABC ORDER BY created DESC"
    pub jql: String,

    /// Fields to return
    #[arg(long, short = 'f', value_delimiter = ',', default_value = "summary,status")]
    pub fields: Vec<String>,

    #[arg(long, short = 'l', default_value = "50")]
    pub max_results: u32,

    /// Token of the page to fetch, as printed after the previous page
    #[arg(long)]
    pub page_token: Option<String>,

    /// Send the query in the request body instead of the URL
    #[arg(long)]
    pub post: bool,

    /// Use the v2 API instead of v3
    #[arg(long)]
    pub v2: bool,
}

impl SearchCommand {
    pub async fn run(
        &self,
        global: &GlobalOptions,
        config: &Config,
        ctx: &CallContext,
        telemetry: &Telemetry,
    ) -> Result<()> {
        let version = if self.v2 { Version::V2 } else { Version::V3 };
        let client = jira::Client::new(global.site_connector(config)?, telemetry.clone(), version);

        let options = SearchOptions {
            next_page_token: self.page_token.clone(),
            max_results: self.max_results,
            fields: self.fields.clone(),
            ..Default::default()
        };

        let response = if self.post {
            client.issue.search.post(ctx, &self.jql, &options).await?
        } else {
            client.issue.search.get(ctx, &self.jql, &options).await?
        };

        let (data, envelope) = response.into_parts();
        if global.json {
            println!("{}", envelope.text());
            return Ok(());
        }

        for line in render_search(&data) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn render_search(page: &IssueSearch) -> Vec<String> {
    let mut lines: Vec<String> = page
        .issues
        .iter()
        .map(|issue| {
            let status = issue
                .fields
                .status
                .as_ref()
                .map(|status| status.name.as_str())
                .unwrap_or("-");
            format!("{:<12} {:<16} {}", issue.key, status, issue.fields.summary)
        })
        .collect();

    if lines.is_empty() {
        lines.push("No issues match".to_string());
    }
    if let Some(token) = &page.next_page_token {
        lines.push(format!("Next page: --page-token {}", token));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_search() {
        let page: IssueSearch = serde_json::from_str(
            r#"{"issues": [
                    {"id": "1", "key": "ABC-1", "fields": {"summary": "Login fails", "status": {"name": "Done"}}},
                    {"id": "2", "key": "ABC-2", "fields": {"summary": "No status"}}
                ],
                "nextPageToken": "CAEaAggD"}"#,
        )
        .unwrap();

        let lines = render_search(&page);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ABC-1"));
        assert!(lines[0].contains("Done"));
        assert!(lines[1].contains(" - "));
        assert_eq!(lines[2], "Next page: --page-token CAEaAggD");
    }

    #[test]
    fn test_render_no_matches() {
        let page: IssueSearch = serde_json::from_str(r#"{"issues": [], "isLast": true}"#).unwrap();
        assert_eq!(render_search(&page), vec!["No issues match"]);
    }
}

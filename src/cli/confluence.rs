//
//  atlassian-client
//  cli/confluence.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Confluence commands

use anyhow::Result;
use clap::Args;

use crate::api::confluence::{self, ContentPage};
use crate::api::{CallContext, Telemetry};
use crate::config::Config;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct CommentsCommand {
    /// ID of the page or blog post
    pub content_id: String,

    /// Properties to expand, e.g. body.storage
    #[arg(long, short = 'e', value_delimiter = ',')]
    pub expand: Vec<String>,

    /// Comment locations to include
    #[arg(long, value_delimiter = ',', value_parser = ["inline", "footer", "resolved"])]
    pub location: Vec<String>,

    #[arg(long, default_value = "0")]
    pub start: u32,

    #[arg(long, short = 'l', default_value = "25")]
    pub limit: u32,
}

impl CommentsCommand {
    pub async fn run(
        &self,
        global: &GlobalOptions,
        config: &Config,
        ctx: &CallContext,
        telemetry: &Telemetry,
    ) -> Result<()> {
        let client = confluence::Client::new(global.site_connector(config)?, telemetry.clone());
        let expand: Vec<&str> = self.expand.iter().map(String::as_str).collect();
        let location: Vec<&str> = self.location.iter().map(String::as_str).collect();

        let response = client
            .content
            .comment
            .gets(
                ctx,
                &self.content_id,
                &expand,
                &location,
                self.start,
                self.limit,
            )
            .await?;

        let (data, envelope) = response.into_parts();
        if global.json {
            println!("{}", envelope.text());
            return Ok(());
        }

        for line in render_comments(&data) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn render_comments(page: &ContentPage) -> Vec<String> {
    if page.results.is_empty() {
        return vec!["No comments".to_string()];
    }

    let mut lines: Vec<String> = page
        .results
        .iter()
        .map(|comment| format!("{:<12} {:<10} {}", comment.id, comment.status, comment.title))
        .collect();
    if page.has_more() {
        lines.push(format!(
            "More comments available; use --start {}",
            page.start + page.size
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_full_page_points_at_next_start() {
        let page: ContentPage = serde_json::from_str(
            r#"{"results": [
                    {"id": "101", "type": "comment", "status": "current", "title": "Re: Welcome"},
                    {"id": "102", "type": "comment", "status": "current", "title": "Re: Welcome"}
                ],
                "start": 0, "limit": 2, "size": 2}"#,
        )
        .unwrap();

        let lines = render_comments(&page);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("101"));
        assert_eq!(lines[2], "More comments available; use --start 2");
    }

    #[test]
    fn test_render_empty_page() {
        let page: ContentPage = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(render_comments(&page), vec!["No comments"]);
    }
}

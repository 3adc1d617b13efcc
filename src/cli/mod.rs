//
//  atlassian-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod admin;
mod assets;
mod bitbucket;
mod config;
mod confluence;
mod jira;
mod trace_demo;

pub use admin::ActivityCommand;
pub use assets::ObjectCommand;
pub use bitbucket::ReposCommand;
pub use config::{ConfigCommand, ConfigSubcommand};
pub use confluence::CommentsCommand;
pub use jira::SearchCommand;
pub use trace_demo::TraceDemoCommand;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::{Connector, HttpConnector};
use crate::auth::AuthCredential;
use crate::config::{Config, TelemetryConfig};

#[derive(Parser, Debug)]
#[command(
    name = "atl",
    version,
    about = "Call the Atlassian Cloud REST APIs with OpenTelemetry tracing",
    long_about = "atl drives the atlassian-client service methods from the command line.\n\n\
                  Every call is traced; set [telemetry] otlp_endpoint in the config file \
                  to export the spans.",
    propagate_version = true,
    after_help = "Use 'atl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options shared by every command. Each one overrides the config file.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Site URL, e.g. https://acme.atlassian.net
    #[arg(long, global = true, env = "ATLASSIAN_SITE")]
    pub site: Option<String>,

    #[arg(long, global = true, env = "ATLASSIAN_EMAIL")]
    pub email: Option<String>,

    #[arg(long, global = true, env = "ATLASSIAN_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Organization admin API key
    #[arg(long, global = true, env = "ATLASSIAN_ADMIN_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,

    #[arg(long, global = true, env = "BITBUCKET_APP_PASSWORD", hide_env_values = true)]
    pub bitbucket_app_password: Option<String>,

    /// Print the raw JSON response body
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit one span per module tracer
    #[command(name = "trace-demo")]
    TraceDemo(TraceDemoCommand),

    /// Last active dates of a managed account
    Activity(ActivityCommand),

    /// Comments on a Confluence page or blog post
    Comments(CommentsCommand),

    /// Search Jira issues with JQL
    Search(SearchCommand),

    /// An object of an Assets workspace
    Object(ObjectCommand),

    /// Repositories of a Bitbucket workspace
    #[command(visible_alias = "repo")]
    Repos(ReposCommand),

    /// Read and write the configuration file
    Config(ConfigCommand),

    Version,
}

impl Commands {
    /// Whether finished spans go to stdout. Only `trace-demo` does this, and
    /// only while no OTLP endpoint is configured.
    pub fn exports_spans_to_stdout(&self, telemetry: &TelemetryConfig) -> bool {
        matches!(self, Commands::TraceDemo(_)) && telemetry.otlp_endpoint.is_none()
    }
}

impl GlobalOptions {
    /// Connector for the configured site, with basic auth when both an email
    /// and an API token are known.
    pub fn site_connector(&self, config: &Config) -> Result<Arc<dyn Connector>> {
        let site = self
            .site
            .as_deref()
            .or(config.site.url.as_deref())
            .context("No site configured; pass --site or set [site] url")?;

        let mut connector = HttpConnector::new(site)?;
        let email = self.email.as_deref().or(config.site.email.as_deref());
        let token = self.api_token.as_deref().or(config.site.api_token.as_deref());
        if let (Some(email), Some(token)) = (email, token) {
            connector = connector.with_auth(AuthCredential::api_token(email, token));
        }
        Ok(Arc::new(connector))
    }

    /// Connector for `api.atlassian.com`, authenticated with the admin API key.
    pub fn admin_connector(&self, config: &Config) -> Result<Arc<dyn Connector>> {
        let key = self
            .admin_key
            .as_deref()
            .or(config.admin.api_key.as_deref())
            .context("No admin API key; pass --admin-key or set ATLASSIAN_ADMIN_KEY")?;
        Ok(Arc::new(
            HttpConnector::admin()?.with_auth(AuthCredential::bearer(key)),
        ))
    }

    /// Connector for Assets on `api.atlassian.com`, with the site's basic auth.
    pub fn assets_connector(&self, config: &Config) -> Result<Arc<dyn Connector>> {
        let email = self
            .email
            .as_deref()
            .or(config.site.email.as_deref())
            .context("No email configured; pass --email or set [site] email")?;
        let token = self
            .api_token
            .as_deref()
            .or(config.site.api_token.as_deref())
            .context("No API token; pass --api-token or set ATLASSIAN_API_TOKEN")?;
        Ok(Arc::new(
            HttpConnector::assets()?.with_auth(AuthCredential::api_token(email, token)),
        ))
    }

    /// Connector for Bitbucket Cloud, with app password auth when configured.
    pub fn bitbucket_connector(&self, config: &Config) -> Result<Arc<dyn Connector>> {
        let mut connector = HttpConnector::bitbucket()?;
        let password = self
            .bitbucket_app_password
            .as_deref()
            .or(config.bitbucket.app_password.as_deref());
        if let (Some(username), Some(password)) = (config.bitbucket.username.as_deref(), password) {
            connector = connector.with_auth(AuthCredential::app_password(username, password));
        }
        Ok(Arc::new(connector))
    }
}

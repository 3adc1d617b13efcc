//
//  atlassian-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings of the `atl` binary, stored as TOML in the platform config
//! directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/atl/config.toml`
//! - **macOS**: `~/Library/Application Support/atl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\atl\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [site]
//! url = "https://acme.atlassian.net"
//! email = "dev@acme.com"
//!
//! [admin]
//! api_key = "ATCTT3x..."
//!
//! [bitbucket]
//! username = "dev"
//!
//! [telemetry]
//! otlp_endpoint = "http://localhost:4317"
//! service_name = "atl"
//! ```
//!
//! Secrets are better kept out of the file: the API token, admin key and
//! app password are also read from `ATLASSIAN_API_TOKEN`,
//! `ATLASSIAN_ADMIN_KEY` and `BITBUCKET_APP_PASSWORD`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::APP_NAME;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub bitbucket: BitbucketConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// The Atlassian Cloud site serving Jira, Confluence and JSM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// e.g. `https://acme.atlassian.net`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Account email paired with the API token for basic auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

/// Organization administration (`api.atlassian.com/admin`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BitbucketConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_password: Option<String>,
}

/// Span export. Nothing is exported while `otlp_endpoint` is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otlp_endpoint: Option<String>,

    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            service_name: default_service_name(),
        }
    }
}

fn default_service_name() -> String {
    APP_NAME.to_string()
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file is not an error; the defaults are returned instead.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the configuration to `path` as pretty TOML, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Keys accepted by [`get`](Self::get) and [`set`](Self::set).
    pub const KEYS: [&'static str; 8] = [
        "site.url",
        "site.email",
        "site.api_token",
        "admin.api_key",
        "bitbucket.username",
        "bitbucket.app_password",
        "telemetry.otlp_endpoint",
        "telemetry.service_name",
    ];

    /// Gets a value by its dotted key, e.g. `site.url`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "site.url" => self.site.url.clone(),
            "site.email" => self.site.email.clone(),
            "site.api_token" => self.site.api_token.clone(),
            "admin.api_key" => self.admin.api_key.clone(),
            "bitbucket.username" => self.bitbucket.username.clone(),
            "bitbucket.app_password" => self.bitbucket.app_password.clone(),
            "telemetry.otlp_endpoint" => self.telemetry.otlp_endpoint.clone(),
            "telemetry.service_name" => Some(self.telemetry.service_name.clone()),
            _ => None,
        }
    }

    /// Sets a value by its dotted key. An empty value clears optional keys and
    /// resets `telemetry.service_name` to its default.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = (!value.is_empty()).then(|| value.to_string());
        match key {
            "site.url" => self.site.url = value,
            "site.email" => self.site.email = value,
            "site.api_token" => self.site.api_token = value,
            "admin.api_key" => self.admin.api_key = value,
            "bitbucket.username" => self.bitbucket.username = value,
            "bitbucket.app_password" => self.bitbucket.app_password = value,
            "telemetry.otlp_endpoint" => self.telemetry.otlp_endpoint = value,
            "telemetry.service_name" => {
                self.telemetry.service_name = value.unwrap_or_else(default_service_name)
            }
            _ => anyhow::bail!(
                "Unknown config key '{}'; expected one of: {}",
                key,
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Path of `config.toml` in the platform config directory. The file may
    /// not exist.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.telemetry.service_name, "atl");
        assert!(config.telemetry.otlp_endpoint.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [site]
                url = "https://acme.atlassian.net"
                email = "dev@acme.com"

                [telemetry]
                otlp_endpoint = "http://localhost:4317"
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://acme.atlassian.net"));
        assert_eq!(config.site.email.as_deref(), Some("dev@acme.com"));
        assert_eq!(config.telemetry.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
        assert_eq!(config.telemetry.service_name, "atl");
        assert!(config.admin.api_key.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.bitbucket.username = Some("dev".to_string());
        config.admin.api_key = Some("key".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = Config::default();

        config.set("site.url", "https://acme.atlassian.net").unwrap();
        config.set("telemetry.service_name", "nightly-sync").unwrap();
        assert_eq!(config.get("site.url").as_deref(), Some("https://acme.atlassian.net"));
        assert_eq!(config.get("telemetry.service_name").as_deref(), Some("nightly-sync"));

        config.set("site.url", "").unwrap();
        config.set("telemetry.service_name", "").unwrap();
        assert_eq!(config.get("site.url"), None);
        assert_eq!(config.get("telemetry.service_name").as_deref(), Some("atl"));

        for key in Config::KEYS {
            config.set(key, "x").unwrap();
            assert_eq!(config.get(key).as_deref(), Some("x"));
        }
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        assert!(config.get("site.token").is_none());

        let err = config.set("site.token", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key 'site.token'"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[site\nurl = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}

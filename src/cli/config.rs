//
//  atlassian-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a configuration value
    Get {
        /// Dotted key, e.g. site.url
        key: String,
    },

    /// Set a configuration value; an empty value clears it
    Set { key: String, value: String },

    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    pub async fn run(&self) -> Result<()> {
        if let ConfigSubcommand::Path = self.command {
            println!("{}", Config::config_path()?.display());
            return Ok(());
        }

        let mut config = Config::load()?;
        if let Some(line) = self.apply(&mut config)? {
            println!("{}", line);
        }
        if let ConfigSubcommand::Set { .. } = self.command {
            config.save()?;
        }
        Ok(())
    }

    /// Applies a `get` or `set` to `config`, returning the line to print.
    fn apply(&self, config: &mut Config) -> Result<Option<String>> {
        match &self.command {
            ConfigSubcommand::Get { key } => {
                if !Config::KEYS.contains(&key.as_str()) {
                    anyhow::bail!(
                        "Unknown config key '{}'; expected one of: {}",
                        key,
                        Config::KEYS.join(", ")
                    );
                }
                let value = config.get(key).with_context(|| format!("{} is not set", key))?;
                Ok(Some(value))
            }
            ConfigSubcommand::Set { key, value } => {
                config.set(key, value)?;
                Ok(None)
            }
            ConfigSubcommand::Path => Ok(None),
        }
    }
}
